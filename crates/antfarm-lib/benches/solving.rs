use antfarm_lib::{
    candidate_routes, parse_farm, select_disjoint_routes, solve, CandidateMode, Farm, SolveOptions,
};
use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use std::fmt::Write;
use std::hint::black_box;

/// `lanes` parallel corridors, `depth` rooms deep, with rungs between
/// neighbouring lanes every five rooms.
fn grid_farm(lanes: usize, depth: usize, ants: usize) -> String {
    let mut input = format!("{ants}\n##start\nstart 0 0\n##end\nend {} 0\n", depth + 1);
    for lane in 0..lanes {
        for step in 0..depth {
            let _ = writeln!(input, "r{lane}_{step} {} {}", step + 1, lane + 1);
        }
    }
    for lane in 0..lanes {
        let _ = writeln!(input, "start-r{lane}_0");
        for step in 1..depth {
            let _ = writeln!(input, "r{lane}_{}-r{lane}_{step}", step - 1);
        }
        let _ = writeln!(input, "r{lane}_{}-end", depth - 1);
        if lane + 1 < lanes {
            for step in (0..depth).step_by(5) {
                let _ = writeln!(input, "r{lane}_{step}-r{}_{step}", lane + 1);
            }
        }
    }
    input
}

static GRID_TEXT: Lazy<String> = Lazy::new(|| grid_farm(24, 40, 500));
static GRID: Lazy<Farm> = Lazy::new(|| parse_farm(&GRID_TEXT).expect("grid parses"));
// Exhaustive enumeration is exponential, so it runs on a much smaller grid.
static SMALL_GRID: Lazy<Farm> =
    Lazy::new(|| parse_farm(&grid_farm(4, 6, 10)).expect("grid parses"));

fn benchmark_solving(c: &mut Criterion) {
    let farm = &*GRID;

    c.bench_function("parse_grid", |b| {
        let text = GRID_TEXT.as_str();
        b.iter(|| {
            let farm = parse_farm(text).expect("grid parses");
            black_box(farm.graph.room_count())
        });
    });

    c.bench_function("select_disjoint_grid", |b| {
        b.iter(|| {
            let selection = select_disjoint_routes(&farm.graph);
            black_box(selection.routes.len())
        });
    });

    c.bench_function("enumerate_candidates_small_grid", |b| {
        let small = &*SMALL_GRID;
        let mode = CandidateMode::AllSimple { limit: 8 };
        b.iter(|| black_box(candidate_routes(&small.graph, mode).len()));
    });

    c.bench_function("solve_grid_500_ants", |b| {
        let options = SolveOptions::default();
        b.iter(|| {
            let solution = solve(farm, &options).expect("grid is solvable");
            black_box(solution.stats.total_turns)
        });
    });
}

criterion_group!(benches, benchmark_solving);
criterion_main!(benches);
