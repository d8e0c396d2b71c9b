//! `check`: validate a farm without solving it.

use std::io;
use std::path::Path;

use anyhow::Result;

use crate::commands::load_input;
use crate::output::{FarmReport, Renderer};
use crate::GlobalOptions;

pub fn handle_check(global: &GlobalOptions, input: &Path) -> Result<()> {
    let farm = load_input(input)?;
    let report = FarmReport::new(&farm);
    Renderer::default().render_check(&mut io::stdout().lock(), &report, global.format)?;
    Ok(())
}
