mod common;

use std::collections::HashSet;

use antfarm_lib::{select_disjoint_routes, solve, ErrorKind, Farm, RoomSet, SolveOptions};
use proptest::prelude::*;

use common::graph_from_edges;

/// Random farms of 2 to 11 rooms with up to 30 tunnel declarations.
fn farms() -> impl Strategy<Value = Farm> {
    (2usize..12)
        .prop_flat_map(|rooms| {
            (
                Just(rooms),
                proptest::collection::vec((0..rooms, 0..rooms), 0..30),
                1usize..20,
            )
        })
        .prop_map(|(rooms, edges, ants)| Farm {
            ants,
            graph: graph_from_edges(rooms, &edges),
        })
}

proptest! {
    #[test]
    fn selected_routes_are_valid_and_disjoint(farm in farms()) {
        let selection = select_disjoint_routes(&farm.graph);
        let mut used = RoomSet::for_graph(&farm.graph);
        for route in &selection.routes {
            prop_assert!(route.is_valid_in(&farm.graph));
            for room in route.intermediates() {
                prop_assert!(used.insert(*room), "room {room} shared by two routes");
            }
        }
    }

    #[test]
    fn solutions_respect_capacity_and_bounds(farm in farms()) {
        let solution = match solve(&farm, &SolveOptions::default()) {
            Ok(solution) => solution,
            Err(err) => {
                prop_assert_eq!(err.kind(), ErrorKind::Unsolvable);
                return Ok(());
            }
        };

        let end = farm.graph.end();
        for turn in &solution.schedule.turns {
            let mut entered = HashSet::new();
            let mut ants = HashSet::new();
            for step in &turn.moves {
                prop_assert!(ants.insert(step.ant), "ant {} moved twice", step.ant);
                if step.room != end {
                    prop_assert!(entered.insert(step.room), "room {} entered twice", step.room);
                }
            }
        }

        let routes = solution.routes();
        let expected_moves: usize = solution
            .allocation
            .assignments()
            .iter()
            .map(|route| routes[*route].hop_count())
            .sum();
        prop_assert_eq!(solution.schedule.move_count(), expected_moves);

        prop_assert_eq!(solution.stats.total_turns, solution.allocation.expected_turns());
        prop_assert!(solution.stats.total_turns >= solution.stats.lower_bound);
        let longest_used = routes
            .iter()
            .zip(solution.allocation.counts())
            .filter(|(_, count)| **count > 0)
            .map(|(route, _)| route.hop_count())
            .max()
            .unwrap_or(0);
        prop_assert!(solution.stats.total_turns >= longest_used);
    }

    #[test]
    fn solving_is_deterministic(farm in farms()) {
        let first = solve(&farm, &SolveOptions::default());
        let second = solve(&farm, &SolveOptions::default());
        match (first, second) {
            (Ok(first), Ok(second)) => {
                prop_assert_eq!(first.schedule, second.schedule);
                prop_assert_eq!(first.allocation, second.allocation);
            }
            (Err(first), Err(second)) => {
                prop_assert_eq!(first.to_string(), second.to_string());
            }
            _ => prop_assert!(false, "solve outcome changed between runs"),
        }
    }
}
