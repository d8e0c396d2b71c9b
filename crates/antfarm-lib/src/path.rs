use std::collections::VecDeque;

use serde::Serialize;
use tracing::{debug, warn};

use crate::graph::{Graph, RoomId, RoomSet};

/// Simple start-to-end path through the farm.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Route {
    rooms: Vec<RoomId>,
}

impl Route {
    fn new_unchecked(rooms: Vec<RoomId>) -> Self {
        debug_assert!(rooms.len() >= 2);
        Self { rooms }
    }

    /// Build a route from room identifiers, checking that it runs from start
    /// to end along existing tunnels without revisiting a room.
    pub fn from_rooms(graph: &Graph, rooms: Vec<RoomId>) -> Option<Self> {
        let route = Self { rooms };
        route.is_valid_in(graph).then_some(route)
    }

    /// Build a route from room names. See [`Route::from_rooms`].
    pub fn from_names(graph: &Graph, names: &[&str]) -> Option<Self> {
        let rooms = names
            .iter()
            .map(|name| graph.room_id(name))
            .collect::<Option<Vec<_>>>()?;
        Self::from_rooms(graph, rooms)
    }

    pub fn rooms(&self) -> &[RoomId] {
        &self.rooms
    }

    /// Number of tunnels walked, i.e. turns a lone ant needs.
    pub fn hop_count(&self) -> usize {
        self.rooms.len().saturating_sub(1)
    }

    /// Rooms strictly between start and end.
    pub fn intermediates(&self) -> &[RoomId] {
        &self.rooms[1..self.rooms.len() - 1]
    }

    /// Resolve room names for display.
    pub fn names<'g>(&self, graph: &'g Graph) -> Vec<&'g str> {
        self.rooms.iter().map(|id| graph.room_name(*id)).collect()
    }

    /// Check every route invariant against `graph`.
    pub fn is_valid_in(&self, graph: &Graph) -> bool {
        let room_count = graph.room_count();
        if self.rooms.len() < 2
            || self.rooms.first() != Some(&graph.start())
            || self.rooms.last() != Some(&graph.end())
            || self.rooms.iter().any(|id| id.index() >= room_count)
        {
            return false;
        }

        let mut seen = RoomSet::for_graph(graph);
        if !self.rooms.iter().all(|id| seen.insert(*id)) {
            return false;
        }

        self.rooms
            .windows(2)
            .all(|pair| graph.neighbours(pair[0]).contains(&pair[1]))
    }
}

/// Constraints applied during a single route search.
#[derive(Debug, Clone)]
pub struct PathConstraints {
    /// Rooms that must not appear between start and end.
    pub blocked: RoomSet,
}

impl PathConstraints {
    /// No rooms blocked.
    pub fn unrestricted(graph: &Graph) -> Self {
        Self {
            blocked: RoomSet::for_graph(graph),
        }
    }

    /// Block the given rooms.
    pub fn blocking(graph: &Graph, rooms: impl IntoIterator<Item = RoomId>) -> Self {
        let mut blocked = RoomSet::for_graph(graph);
        blocked.extend(rooms);
        Self { blocked }
    }

    fn allows(&self, room: RoomId) -> bool {
        !self.blocked.contains(room)
    }
}

/// Find the shortest route `start -> first_hop -> ... -> end` that avoids the
/// blocked rooms.
///
/// Visited marks are shared by the whole search so the first arrival at end is
/// a shortest route. Neighbours expand in tunnel declaration order, which
/// makes ties between equally short routes deterministic. `end` is never
/// treated as blocked.
pub fn find_route_through(
    graph: &Graph,
    first_hop: RoomId,
    constraints: &PathConstraints,
) -> Option<Route> {
    let start = graph.start();
    let end = graph.end();

    if !graph.neighbours(start).contains(&first_hop) {
        return None;
    }
    if first_hop == end {
        return Some(Route::new_unchecked(vec![start, end]));
    }
    if !constraints.allows(first_hop) {
        return None;
    }

    let mut parents: Vec<Option<RoomId>> = vec![None; graph.room_count()];
    let mut visited = RoomSet::for_graph(graph);
    let mut queue = VecDeque::new();

    visited.insert(start);
    visited.insert(first_hop);
    parents[first_hop.index()] = Some(start);
    queue.push_back(first_hop);

    while let Some(current) = queue.pop_front() {
        for &next in graph.neighbours(current) {
            if visited.contains(next) {
                continue;
            }
            if next != end && !constraints.allows(next) {
                continue;
            }

            visited.insert(next);
            parents[next.index()] = Some(current);
            if next == end {
                return Some(reconstruct_route(&parents, start, end));
            }
            queue.push_back(next);
        }
    }

    debug!(
        first_hop = graph.room_name(first_hop),
        "no route through first hop"
    );
    None
}

/// Enumerate every simple route through `first_hop`, shortest first, stopping
/// after `limit` routes.
///
/// Unlike [`find_route_through`] the visited check is per path, so the number
/// of routes (and the work done) grows exponentially with graph density.
pub fn enumerate_routes_through(graph: &Graph, first_hop: RoomId, limit: usize) -> Vec<Route> {
    let start = graph.start();
    let end = graph.end();
    let mut found = Vec::new();

    if limit == 0 || !graph.neighbours(start).contains(&first_hop) {
        return found;
    }

    let mut queue: VecDeque<Vec<RoomId>> = VecDeque::new();
    queue.push_back(vec![start, first_hop]);

    while let Some(path) = queue.pop_front() {
        let last = path[path.len() - 1];
        if last == end {
            found.push(Route::new_unchecked(path));
            if found.len() == limit {
                warn!(
                    first_hop = graph.room_name(first_hop),
                    limit, "route enumeration limit reached"
                );
                break;
            }
            continue;
        }

        for &next in graph.neighbours(last) {
            if path.contains(&next) {
                continue;
            }
            let mut extended = Vec::with_capacity(path.len() + 1);
            extended.extend_from_slice(&path);
            extended.push(next);
            queue.push_back(extended);
        }
    }

    found
}

fn reconstruct_route(parents: &[Option<RoomId>], start: RoomId, end: RoomId) -> Route {
    let mut rooms = Vec::new();
    let mut current = Some(end);
    while let Some(room) = current {
        rooms.push(room);
        if room == start {
            break;
        }
        current = parents[room.index()];
    }
    rooms.reverse();
    Route::new_unchecked(rooms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::farm::parse_farm;

    // start has two ways out; `a` leads to a short and a long branch.
    const BRANCHING: &str = "\
1
##start
s 0 0
##end
e 9 9
a 1 0
b 0 1
c 2 0
d 3 0
f 4 0
s-a
s-b
a-c
a-d
c-e
d-f
f-e
b-e
";

    fn graph() -> Graph {
        parse_farm(BRANCHING).expect("valid farm").graph
    }

    fn id(graph: &Graph, name: &str) -> RoomId {
        graph.room_id(name).expect("room exists")
    }

    #[test]
    fn finds_shortest_route_through_first_hop() {
        let graph = graph();
        let constraints = PathConstraints::unrestricted(&graph);
        let route = find_route_through(&graph, id(&graph, "a"), &constraints).unwrap();
        assert_eq!(route.names(&graph), ["s", "a", "c", "e"]);
        assert_eq!(route.hop_count(), 3);
        assert_eq!(route.rooms()[1], id(&graph, "a"));
        assert!(route.is_valid_in(&graph));
    }

    #[test]
    fn detours_around_blocked_rooms() {
        let graph = graph();
        let constraints = PathConstraints::blocking(&graph, [id(&graph, "c")]);
        let route = find_route_through(&graph, id(&graph, "a"), &constraints).unwrap();
        assert_eq!(route.names(&graph), ["s", "a", "d", "f", "e"]);
    }

    #[test]
    fn reports_unreachable_when_everything_is_blocked() {
        let graph = graph();
        let (a, b) = (id(&graph, "a"), id(&graph, "b"));
        let constraints = PathConstraints::blocking(&graph, [id(&graph, "c"), id(&graph, "f")]);
        assert!(find_route_through(&graph, a, &constraints).is_none());

        let constraints = PathConstraints::blocking(&graph, [b]);
        assert!(find_route_through(&graph, b, &constraints).is_none());
    }

    #[test]
    fn rejects_first_hops_that_are_not_start_neighbours() {
        let graph = graph();
        let constraints = PathConstraints::unrestricted(&graph);
        let c = id(&graph, "c");
        assert!(find_route_through(&graph, c, &constraints).is_none());
    }

    #[test]
    fn end_adjacent_to_start_is_a_single_hop() {
        let graph = parse_farm("1\n##start\ns 0 0\n##end\ne 1 0\ns-e\n")
            .unwrap()
            .graph;
        let constraints = PathConstraints::blocking(&graph, [graph.end()]);
        let route = find_route_through(&graph, graph.end(), &constraints).unwrap();
        assert_eq!(route.hop_count(), 1);
        assert!(route.intermediates().is_empty());
    }

    #[test]
    fn ties_follow_tunnel_declaration_order() {
        let input = "\
1
##start
s 0 0
##end
e 5 5
a 1 0
x 2 0
y 2 1
s-a
a-y
a-x
x-e
y-e
";
        let graph = parse_farm(input).unwrap().graph;
        let constraints = PathConstraints::unrestricted(&graph);
        let route = find_route_through(&graph, id(&graph, "a"), &constraints).unwrap();
        assert_eq!(route.names(&graph), ["s", "a", "y", "e"]);
    }

    #[test]
    fn enumerates_all_simple_routes_shortest_first() {
        let graph = graph();
        let routes = enumerate_routes_through(&graph, id(&graph, "a"), 10);
        let names: Vec<Vec<&str>> = routes.iter().map(|r| r.names(&graph)).collect();
        assert_eq!(
            names,
            vec![vec!["s", "a", "c", "e"], vec!["s", "a", "d", "f", "e"]]
        );
        assert!(routes.iter().all(|r| r.is_valid_in(&graph)));
    }

    #[test]
    fn enumeration_respects_limit() {
        let graph = graph();
        let a = id(&graph, "a");
        assert_eq!(enumerate_routes_through(&graph, a, 1).len(), 1);
        assert!(enumerate_routes_through(&graph, a, 0).is_empty());
    }

    #[test]
    fn from_names_validates_routes() {
        let graph = graph();
        assert!(Route::from_names(&graph, &["s", "b", "e"]).is_some());
        assert!(Route::from_names(&graph, &["s", "c", "e"]).is_none());
        let revisits_start = ["s", "a", "s", "b", "e"];
        assert!(Route::from_names(&graph, &revisits_start).is_none());
        assert!(Route::from_names(&graph, &["a", "c", "e"]).is_none());
        assert!(Route::from_names(&graph, &["s", "ghost", "e"]).is_none());
    }
}
