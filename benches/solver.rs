//! Benchmarks for the grid-clearing analyzer.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gridclear::metrics::blockers;
use gridclear::{analyze, generate, quick_solve, GeneratorConfig, Hex, Puzzle, SearchConfig, Square};

fn square_puzzle(blocks: usize) -> Puzzle<Square> {
    let config = GeneratorConfig {
        blocks,
        holes: 2,
        max_attempts: 10_000,
        ..GeneratorConfig::default()
    };
    generate(Square::new(8, 8), &config, 1).expect("no solvable square level")
}

fn hex_puzzle(blocks: usize) -> Puzzle<Hex> {
    let config = GeneratorConfig {
        blocks,
        holes: 4,
        max_attempts: 10_000,
        ..GeneratorConfig::default()
    };
    generate(Hex::new(6), &config, 1).expect("no solvable hex level")
}

/// Benchmark the exhaustive search on a small square board.
fn bench_analyze_exact(c: &mut Criterion) {
    let puzzle = square_puzzle(10);
    let config = SearchConfig::default();

    let mut group = c.benchmark_group("analyze");
    group.sample_size(20);
    group.bench_function("square_exact_10", |b| {
        b.iter(|| analyze(black_box(&puzzle), &config))
    });
    group.finish();
}

/// Benchmark the sampling path on a large hex board.
fn bench_analyze_sampled(c: &mut Criterion) {
    let puzzle = hex_puzzle(30);
    let config = SearchConfig::default();

    c.bench_function("hex_sampled_30", |b| {
        b.iter(|| analyze(black_box(&puzzle), &config))
    });
}

/// Benchmark the greedy check used by level generators.
fn bench_quick_solve(c: &mut Criterion) {
    let puzzle = hex_puzzle(30);

    c.bench_function("quick_solve", |b| b.iter(|| quick_solve(black_box(&puzzle))));
}

/// Benchmark per-block blocker counting.
fn bench_blockers(c: &mut Criterion) {
    let puzzle = square_puzzle(20);

    c.bench_function("blockers", |b| b.iter(|| blockers(black_box(&puzzle))));
}

criterion_group!(
    benches,
    bench_analyze_exact,
    bench_analyze_sampled,
    bench_quick_solve,
    bench_blockers
);
criterion_main!(benches);
