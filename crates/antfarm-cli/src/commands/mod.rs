//! Subcommand handlers. `main.rs` parses arguments and dispatches here.

pub mod check;
pub mod routes;
pub mod solve;

use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use antfarm_lib::{load_farm, parse_farm, Farm};

/// Load a farm from `path`, or from stdin when `path` is `-`.
pub fn load_input(path: &Path) -> Result<Farm> {
    if path.as_os_str() == "-" {
        debug!("reading farm from stdin");
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read farm from stdin")?;
        return parse_farm(&text).context("invalid farm on stdin");
    }

    load_farm(path).with_context(|| format!("failed to load farm from {}", path.display()))
}
