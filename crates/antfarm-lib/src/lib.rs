//! antfarm library entry points.
//!
//! This crate loads ant farm descriptions, selects vertex-disjoint routes from
//! start to end, spreads the ants over those routes and simulates their walk
//! turn by turn. Higher-level consumers (the CLI) should only depend on the
//! functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod allocation;
pub mod error;
pub mod farm;
pub mod graph;
pub mod output;
pub mod path;
pub mod schedule;
pub mod selection;
pub mod solver;

pub use allocation::{allocate_ants, Allocation, AntId};
pub use error::{Error, ErrorKind, Result};
pub use farm::{load_farm, parse_farm, Farm, MAX_ANTS};
pub use graph::{Graph, GraphBuilder, GraphConflict, Room, RoomId, RoomSet};
pub use output::{PlanSummary, RouteView, SolutionSummary};
pub use path::{enumerate_routes_through, find_route_through, PathConstraints, Route};
pub use schedule::{simulate, Move, Schedule, Turn};
pub use selection::{
    candidate_routes, first_hops_by_degree, select_disjoint_routes, CandidateMode, RouteSelection,
    DEFAULT_ROUTE_LIMIT,
};
pub use solver::{
    lower_bound, plan_routes, solve, RoutePlan, Solution, SolutionStats, SolveOptions,
};
