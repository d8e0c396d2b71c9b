use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::path::Route;

/// One-based ant identifier, as printed in move notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AntId(usize);

impl AntId {
    /// Identifier of the ant at zero-based position `index`.
    pub fn from_index(index: usize) -> Self {
        Self(index + 1)
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 - 1
    }
}

impl fmt::Display for AntId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which route each ant travels, and how many ants share each route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allocation {
    assignments: Vec<usize>,
    counts: Vec<usize>,
    hops: Vec<usize>,
}

impl Allocation {
    pub fn ant_count(&self) -> usize {
        self.assignments.len()
    }

    /// Index of the route assigned to `ant`.
    pub fn route_of(&self, ant: AntId) -> usize {
        self.assignments[ant.index()]
    }

    /// Route index per ant, in ant order.
    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }

    /// Number of ants per route, in route order.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Turn on which the last ant of `route` arrives, or `None` if the route
    /// carries no ants.
    ///
    /// A route releases one ant per turn, except a direct start-end tunnel,
    /// which every ant crosses on the first turn.
    pub fn finish_turn(&self, route: usize) -> Option<usize> {
        match (self.counts[route], self.hops[route]) {
            (0, _) => None,
            (_, 1) => Some(1),
            (count, hops) => Some(hops + count - 1),
        }
    }

    /// Latest finish turn over all routes.
    pub fn expected_turns(&self) -> usize {
        (0..self.counts.len())
            .filter_map(|route| self.finish_turn(route))
            .max()
            .unwrap_or(0)
    }
}

/// Assign ants `1..=ants` to routes one at a time.
///
/// Each ant takes the route minimising `hops + ants already assigned`, which
/// is the turn it would arrive on given that a route releases one ant per
/// turn. Ties go to the lowest route index.
pub fn allocate_ants(ants: usize, routes: &[Route]) -> Result<Allocation> {
    if routes.is_empty() {
        return Err(Error::EmptyRouteSet);
    }

    let hops: Vec<usize> = routes.iter().map(Route::hop_count).collect();
    let mut counts = vec![0usize; routes.len()];
    let mut assignments = Vec::with_capacity(ants);

    for _ in 0..ants {
        let (route, _) = hops
            .iter()
            .zip(&counts)
            .map(|(hops, assigned)| hops + assigned)
            .enumerate()
            .min_by_key(|(_, cost)| *cost)
            .ok_or(Error::EmptyRouteSet)?;
        counts[route] += 1;
        assignments.push(route);
    }

    debug!(ants, routes = routes.len(), ?counts, "allocated ants");
    Ok(Allocation {
        assignments,
        counts,
        hops,
    })
}
