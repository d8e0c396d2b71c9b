//! antfarm CLI library.
//!
//! Shared argument types, command handlers and terminal rendering for the
//! `antfarm` binary.

pub mod commands;
pub mod output;
pub mod terminal;

use clap::Args;

use antfarm_lib::{CandidateMode, SolveOptions, DEFAULT_ROUTE_LIMIT};

use crate::output::OutputFormat;

/// Options accepted before or after any subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalOptions {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Report every simple route through each start neighbour, not just the
    /// shortest. Route selection is unaffected.
    #[arg(long, global = true)]
    pub all_routes: bool,

    /// Maximum routes enumerated per start neighbour with `--all-routes`.
    #[arg(long, default_value_t = DEFAULT_ROUTE_LIMIT, value_parser = parse_route_limit, global = true)]
    pub route_limit: usize,

    /// Tracing filter overriding `RUST_LOG`, e.g. `debug` or `antfarm_lib=trace`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

impl GlobalOptions {
    /// Library options derived from the command line.
    pub fn solve_options(&self) -> SolveOptions {
        let candidates = if self.all_routes {
            CandidateMode::AllSimple {
                limit: self.route_limit,
            }
        } else {
            CandidateMode::ShortestPerNeighbor
        };
        SolveOptions { candidates }
    }
}

fn parse_route_limit(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("route limit must be at least 1".to_string()),
        Ok(limit) => Ok(limit),
        Err(err) => Err(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(all_routes: bool) -> GlobalOptions {
        GlobalOptions {
            format: OutputFormat::Text,
            all_routes,
            route_limit: 5,
            log_level: None,
        }
    }

    #[test]
    fn all_routes_switches_candidate_mode() {
        assert_eq!(
            options(false).solve_options().candidates,
            CandidateMode::ShortestPerNeighbor
        );
        assert_eq!(
            options(true).solve_options().candidates,
            CandidateMode::AllSimple { limit: 5 }
        );
    }

    #[test]
    fn route_limit_rejects_zero() {
        assert_eq!(parse_route_limit("3"), Ok(3));
        assert!(parse_route_limit("0").is_err());
        assert!(parse_route_limit("many").is_err());
    }
}
