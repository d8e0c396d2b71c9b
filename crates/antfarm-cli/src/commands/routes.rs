//! `routes`: candidate and selected routes, without scheduling ants.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use antfarm_lib::{plan_routes, PlanSummary};

use crate::commands::load_input;
use crate::output::Renderer;
use crate::GlobalOptions;

pub fn handle_routes(global: &GlobalOptions, input: &Path) -> Result<()> {
    let farm = load_input(input)?;
    let plan = plan_routes(&farm.graph, &global.solve_options()).context("failed to plan routes")?;
    let summary = PlanSummary::from_plan(&farm, &plan);
    Renderer::default().render_plan(&mut io::stdout().lock(), &summary, global.format)?;
    Ok(())
}
