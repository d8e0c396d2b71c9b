//! Shared helpers for the integration tests.

use std::path::PathBuf;

use antfarm_lib::{load_farm, Farm, Graph, GraphBuilder};

/// Directory holding the `.map` fixtures shared with the CLI tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Load a fixture by file name, panicking if it fails to parse.
#[allow(dead_code)]
pub fn load_fixture(name: &str) -> Farm {
    load_farm(&fixtures_dir().join(name)).expect("fixture loads")
}

/// Build a graph from room indices. Room 0 is start and room 1 is end;
/// other rooms are named `r<index>`.
#[allow(dead_code)]
pub fn graph_from_edges(rooms: usize, edges: &[(usize, usize)]) -> Graph {
    let mut builder = GraphBuilder::default();
    let names: Vec<String> = (0..rooms)
        .map(|index| match index {
            0 => "start".to_string(),
            1 => "end".to_string(),
            _ => format!("r{index}"),
        })
        .collect();
    let ids: Vec<_> = names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            builder
                .add_room(name, index as i64, 0)
                .expect("unique room")
        })
        .collect();
    for &(a, b) in edges {
        if a != b {
            builder
                .add_tunnel(&names[a], &names[b])
                .expect("known rooms");
        }
    }
    builder.set_start(ids[0]).set_end(ids[1]);
    builder.build().expect("start and end set")
}
