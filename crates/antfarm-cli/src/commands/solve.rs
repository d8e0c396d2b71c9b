//! `solve`: the full pipeline from farm description to move log.

use std::io;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::debug;

use antfarm_lib::{solve, SolutionSummary};

use crate::commands::load_input;
use crate::output::Renderer;
use crate::GlobalOptions;

pub fn handle_solve(global: &GlobalOptions, input: &Path) -> Result<()> {
    let started = Instant::now();
    let farm = load_input(input)?;
    let solution = solve(&farm, &global.solve_options()).context("failed to solve farm")?;
    debug!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        "solve finished"
    );

    let summary = SolutionSummary::from_solution(&farm, &solution);
    Renderer::default().render_solution(&mut io::stdout().lock(), &summary, global.format)?;
    Ok(())
}
