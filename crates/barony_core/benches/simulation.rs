//! Turn-resolution benchmarks for barony_core.
//!
//! Run with: `cargo bench -p barony_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use barony_core::game::Game;
use barony_test_utils::fixtures::{play_out, play_turn, Raider};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Benchmarks a single contested turn and a full twelve-turn game.
pub fn simulation_benchmark(c: &mut Criterion) {
    c.bench_function("contested_turn", |b| {
        b.iter(|| {
            let mut game = Game::new();
            black_box(play_turn(&mut game, &mut Raider))
        })
    });

    c.bench_function("full_game", |b| {
        b.iter(|| {
            let mut game = Game::new();
            black_box(play_out(&mut game, &mut Raider))
        })
    });
}

criterion_group!(benches, simulation_benchmark);
criterion_main!(benches);
