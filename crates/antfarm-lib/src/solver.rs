//! End-to-end solving: route planning, ant allocation and simulation.
//!
//! # Example
//!
//! ```
//! use antfarm_lib::{parse_farm, solve, SolveOptions};
//!
//! let farm = parse_farm("2\n##start\nstart -2 0\n##end\nend 10 0\n1 0 3\nstart-1\n1-end\n")?;
//! let solution = solve(&farm, &SolveOptions::default())?;
//! assert_eq!(solution.stats.total_turns, 3);
//! # Ok::<(), antfarm_lib::Error>(())
//! ```

use serde::Serialize;
use tracing::info;

use crate::allocation::{allocate_ants, Allocation};
use crate::error::{Error, Result};
use crate::farm::Farm;
use crate::graph::Graph;
use crate::path::Route;
use crate::schedule::{simulate, Schedule};
use crate::selection::{candidate_routes, select_disjoint_routes, CandidateMode, RouteSelection};

/// Tunables for [`solve`] and [`plan_routes`].
#[derive(Debug, Clone, Default)]
pub struct SolveOptions {
    /// How the reported candidate routes are gathered. Does not affect the
    /// selected routes.
    pub candidates: CandidateMode,
}

/// Candidate and selected routes for a farm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePlan {
    pub candidates: Vec<Route>,
    pub selection: RouteSelection,
}

/// Summary figures for a finished schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolutionStats {
    pub total_turns: usize,
    /// [`lower_bound`] over the routes that carry ants.
    pub lower_bound: usize,
    /// `lower_bound / total_turns`; 1.0 means the schedule is optimal for
    /// the selected routes.
    pub efficiency: f64,
    /// Selected routes that carry at least one ant.
    pub routes_used: usize,
}

impl SolutionStats {
    fn new(ants: usize, routes: &[Route], allocation: &Allocation, schedule: &Schedule) -> Self {
        // Routes without ants contribute nothing to the finish time.
        let used: Vec<Route> = routes
            .iter()
            .zip(allocation.counts())
            .filter(|(_, count)| **count > 0)
            .map(|(route, _)| route.clone())
            .collect();
        let total_turns = schedule.turn_count();
        let lower_bound = lower_bound(ants, &used);
        let efficiency = if total_turns == 0 {
            1.0
        } else {
            lower_bound as f64 / total_turns as f64
        };
        Self {
            total_turns,
            lower_bound,
            efficiency,
            routes_used: used.len(),
        }
    }
}

/// Result of solving a farm.
#[derive(Debug, Clone)]
pub struct Solution {
    pub candidates: Vec<Route>,
    pub selection: RouteSelection,
    pub allocation: Allocation,
    pub schedule: Schedule,
    pub stats: SolutionStats,
}

impl Solution {
    /// Selected routes in selection order.
    pub fn routes(&self) -> &[Route] {
        &self.selection.routes
    }
}

/// Theoretical minimum turn count when `ants` share `routes`:
/// `ceil((ants + total hops - route count) / route count)`.
///
/// A direct start-end tunnel carries every ant in one turn, so its presence
/// drops the bound to 1.
pub fn lower_bound(ants: usize, routes: &[Route]) -> usize {
    if ants == 0 || routes.is_empty() {
        return 0;
    }
    if routes.iter().any(|route| route.hop_count() == 1) {
        return 1;
    }
    let total_hops: usize = routes.iter().map(Route::hop_count).sum();
    (ants + total_hops - routes.len()).div_ceil(routes.len())
}

/// Gather candidate routes and select the disjoint route set.
pub fn plan_routes(graph: &Graph, options: &SolveOptions) -> Result<RoutePlan> {
    let start = graph.start();
    if graph.degree(start) == 0 {
        return Err(Error::StartIsolated {
            start: graph.room_name(start).to_string(),
        });
    }

    let candidates = candidate_routes(graph, options.candidates);
    let selection = select_disjoint_routes(graph);
    if selection.is_empty() {
        return Err(Error::NoRoute {
            start: graph.room_name(start).to_string(),
            end: graph.room_name(graph.end()).to_string(),
        });
    }

    Ok(RoutePlan {
        candidates,
        selection,
    })
}

/// Plan routes, allocate ants and simulate until every ant reaches end.
pub fn solve(farm: &Farm, options: &SolveOptions) -> Result<Solution> {
    let RoutePlan {
        candidates,
        selection,
    } = plan_routes(&farm.graph, options)?;

    let allocation = allocate_ants(farm.ants, &selection.routes)?;
    let schedule = simulate(&farm.graph, &selection.routes, &allocation)?;
    let stats = SolutionStats::new(farm.ants, &selection.routes, &allocation, &schedule);

    info!(
        ants = farm.ants,
        routes = selection.routes.len(),
        turns = stats.total_turns,
        lower_bound = stats.lower_bound,
        "solved farm"
    );

    Ok(Solution {
        candidates,
        selection,
        allocation,
        schedule,
        stats,
    })
}
