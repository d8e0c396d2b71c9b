//! Greedy selection of vertex-disjoint routes.
//!
//! Start's neighbours are tried in ascending order of degree, ties in
//! declaration order. Every accepted route blocks its intermediate rooms for
//! the searches that follow. There is no backtracking: the result is locally
//! maximal, not a proven maximum.

use serde::Serialize;
use tracing::{debug, info};

use crate::graph::{Graph, RoomId};
use crate::path::{enumerate_routes_through, find_route_through, PathConstraints, Route};

/// Default cap on routes per first hop in [`CandidateMode::AllSimple`].
pub const DEFAULT_ROUTE_LIMIT: usize = 64;

/// Outcome of the disjoint route selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSelection {
    /// Accepted routes in the order they were selected.
    pub routes: Vec<Route>,
    /// First hops that could not host a disjoint route.
    pub skipped: Vec<RoomId>,
}

impl RouteSelection {
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Select a maximal set of routes whose intermediate rooms do not overlap.
pub fn select_disjoint_routes(graph: &Graph) -> RouteSelection {
    let mut constraints = PathConstraints::unrestricted(graph);
    let mut routes = Vec::new();
    let mut skipped = Vec::new();

    for first_hop in first_hops_by_degree(graph) {
        match find_route_through(graph, first_hop, &constraints) {
            Some(route) => {
                debug!(
                    first_hop = graph.room_name(first_hop),
                    hops = route.hop_count(),
                    "accepted route"
                );
                constraints
                    .blocked
                    .extend(route.intermediates().iter().copied());
                routes.push(route);
            }
            None => {
                info!(
                    first_hop = graph.room_name(first_hop),
                    "no disjoint route through neighbour; skipping"
                );
                skipped.push(first_hop);
            }
        }
    }

    info!(
        selected = routes.len(),
        skipped = skipped.len(),
        "disjoint route selection finished"
    );
    RouteSelection { routes, skipped }
}

/// Start's neighbours sorted by ascending degree, ties kept in declaration
/// order.
pub fn first_hops_by_degree(graph: &Graph) -> Vec<RoomId> {
    let mut hops = graph.neighbours(graph.start()).to_vec();
    hops.sort_by_key(|room| graph.degree(*room));
    hops
}

/// How candidate routes are gathered for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum CandidateMode {
    /// The shortest unblocked route through each neighbour of start.
    #[default]
    ShortestPerNeighbor,
    /// Every simple route through each neighbour, capped per neighbour.
    AllSimple { limit: usize },
}

/// Collect candidate routes, neighbour by neighbour in declaration order.
pub fn candidate_routes(graph: &Graph, mode: CandidateMode) -> Vec<Route> {
    let neighbours = graph.neighbours(graph.start());
    match mode {
        CandidateMode::ShortestPerNeighbor => {
            let constraints = PathConstraints::unrestricted(graph);
            neighbours
                .iter()
                .filter_map(|hop| find_route_through(graph, *hop, &constraints))
                .collect()
        }
        CandidateMode::AllSimple { limit } => neighbours
            .iter()
            .flat_map(|hop| enumerate_routes_through(graph, *hop, limit))
            .collect(),
    }
}
