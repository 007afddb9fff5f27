use criterion::{criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

use mazecrawl::{
    generators,
    level::{World, DEFAULT_LEVEL_SPACING},
    units::{LevelsCount, MazeSize},
};

fn bench_recursive_backtracker_maze_50(c: &mut Criterion) {
    let side = MazeSize(50).side_length();
    let mut rng = XorShiftRng::seed_from_u64(50);
    c.bench_function("recursive_backtracker_maze_50", move |b| {
        b.iter(|| generators::recursive_backtracker(side, &mut rng))
    });
}

fn bench_pick_exit_maze_50(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(50);
    let g = generators::recursive_backtracker(MazeSize(50).side_length(), &mut rng).unwrap();
    c.bench_function("pick_exit_maze_50", move |b| {
        b.iter(|| generators::pick_exit(&g, &mut rng))
    });
}

fn bench_world_10_levels_of_50(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(10);
    c.bench_function("world_10_levels_of_50", move |b| {
        b.iter(|| World::generate(MazeSize(50), LevelsCount(10), DEFAULT_LEVEL_SPACING, &mut rng))
    });
}

criterion_group!(
    benches,
    bench_recursive_backtracker_maze_50,
    bench_pick_exit_maze_50,
    bench_world_10_levels_of_50
);
criterion_main!(benches);
