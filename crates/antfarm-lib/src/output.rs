use serde::Serialize;

use crate::error::Result;
use crate::farm::Farm;
use crate::graph::Graph;
use crate::path::Route;
use crate::solver::{RoutePlan, Solution, SolutionStats};

/// Route with room names resolved, ready for display or serialisation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteView {
    pub index: usize,
    pub hops: usize,
    pub rooms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ants: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_turn: Option<usize>,
}

impl RouteView {
    fn new(graph: &Graph, index: usize, route: &Route) -> Self {
        Self {
            index,
            hops: route.hop_count(),
            rooms: route.names(graph).into_iter().map(String::from).collect(),
            ants: None,
            finish_turn: None,
        }
    }

    /// Rooms joined with arrows, e.g. `start -> 1 -> end`.
    pub fn path_label(&self) -> String {
        self.rooms.join(" -> ")
    }
}

/// Candidate and selected routes of a farm.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PlanSummary {
    pub ants: usize,
    pub start: String,
    pub end: String,
    pub rooms: usize,
    pub tunnels: usize,
    pub candidates: Vec<RouteView>,
    pub routes: Vec<RouteView>,
    pub skipped: Vec<String>,
}

impl PlanSummary {
    /// Resolve a [`RoutePlan`] against the farm it was computed for.
    pub fn from_plan(farm: &Farm, plan: &RoutePlan) -> Self {
        let graph = &farm.graph;
        Self {
            ants: farm.ants,
            start: graph.room_name(graph.start()).to_string(),
            end: graph.room_name(graph.end()).to_string(),
            rooms: graph.room_count(),
            tunnels: graph.tunnel_count(),
            candidates: plan
                .candidates
                .iter()
                .enumerate()
                .map(|(index, route)| RouteView::new(graph, index + 1, route))
                .collect(),
            routes: plan
                .selection
                .routes
                .iter()
                .enumerate()
                .map(|(index, route)| RouteView::new(graph, index + 1, route))
                .collect(),
            skipped: plan
                .selection
                .skipped
                .iter()
                .map(|room| graph.room_name(*room).to_string())
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Everything a reporter needs about a solved farm.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SolutionSummary {
    #[serde(flatten)]
    pub plan: PlanSummary,
    pub turns: Vec<String>,
    pub stats: SolutionStats,
}

impl SolutionSummary {
    /// Resolve a [`Solution`] against the farm it was computed for.
    pub fn from_solution(farm: &Farm, solution: &Solution) -> Self {
        let plan = RoutePlan {
            candidates: solution.candidates.clone(),
            selection: solution.selection.clone(),
        };
        let mut plan = PlanSummary::from_plan(farm, &plan);
        for (index, view) in plan.routes.iter_mut().enumerate() {
            view.ants = Some(solution.allocation.counts()[index]);
            view.finish_turn = solution.allocation.finish_turn(index);
        }

        Self {
            plan,
            turns: solution.schedule.lines(&farm.graph),
            stats: solution.stats,
        }
    }

    /// Move lines joined with newlines, without a trailing newline.
    pub fn moves_text(&self) -> String {
        self.turns.join("\n")
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
