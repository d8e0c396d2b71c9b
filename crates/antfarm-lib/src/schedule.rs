//! Turn-by-turn simulation of ants walking their assigned routes.

use serde::Serialize;
use tracing::debug;

use crate::allocation::{Allocation, AntId};
use crate::error::{Error, Result};
use crate::graph::{Graph, RoomId, RoomSet};
use crate::path::Route;

/// A single ant stepping into a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Move {
    pub ant: AntId,
    pub room: RoomId,
}

impl Move {
    /// Render in `L<ant>-<room>` notation.
    pub fn render(&self, graph: &Graph) -> String {
        format!("L{}-{}", self.ant, graph.room_name(self.room))
    }
}

/// Moves made during one turn, in ant order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub moves: Vec<Move>,
}

impl Turn {
    /// Space separated move notation for this turn.
    pub fn render(&self, graph: &Graph) -> String {
        self.moves
            .iter()
            .map(|step| step.render(graph))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Complete move log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schedule {
    pub turns: Vec<Turn>,
}

impl Schedule {
    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    pub fn move_count(&self) -> usize {
        self.turns.iter().map(|turn| turn.moves.len()).sum()
    }

    /// One rendered line per turn.
    pub fn lines(&self, graph: &Graph) -> Vec<String> {
        self.turns.iter().map(|turn| turn.render(graph)).collect()
    }
}

/// Walk every ant from start to end.
///
/// Within a turn ants are processed in increasing id order. An ant may step
/// into end at any time; any other room must be neither claimed by an earlier
/// move this turn nor still held by an ant that has not left it. Blocked ants
/// wait and retry on the next turn.
pub fn simulate(graph: &Graph, routes: &[Route], allocation: &Allocation) -> Result<Schedule> {
    debug_assert_eq!(allocation.counts().len(), routes.len());

    let start = graph.start();
    let end = graph.end();
    let ants = allocation.ant_count();

    let mut positions = vec![0usize; ants];
    let mut occupant: Vec<Option<AntId>> = vec![None; graph.room_count()];
    let mut claimed = RoomSet::for_graph(graph);
    let mut remaining = ants;
    let mut turns = Vec::new();

    while remaining > 0 {
        claimed.clear();
        let mut moves = Vec::new();

        for (index, position) in positions.iter_mut().enumerate() {
            let ant = AntId::from_index(index);
            let rooms = routes[allocation.route_of(ant)].rooms();
            let Some(&next) = rooms.get(*position + 1) else {
                continue;
            };

            if next != end && (claimed.contains(next) || occupant[next.index()].is_some()) {
                continue;
            }

            let current = rooms[*position];
            if current != start {
                occupant[current.index()] = None;
            }
            if next == end {
                remaining -= 1;
            } else {
                claimed.insert(next);
                occupant[next.index()] = Some(ant);
            }
            *position += 1;
            moves.push(Move { ant, room: next });
        }

        if moves.is_empty() {
            return Err(Error::SchedulerStalled {
                turn: turns.len() + 1,
                remaining,
            });
        }
        turns.push(Turn { moves });
    }

    debug!(turns = turns.len(), ants, "simulation finished");
    Ok(Schedule { turns })
}
