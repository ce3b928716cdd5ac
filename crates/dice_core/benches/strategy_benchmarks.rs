//! Criterion benchmarks for the die-roll strategies.
//!
//! Benchmarks cover:
//! - Raw roll generator throughput
//! - Sequential vs eager-parallel vs lazy-deferred on the same trial count
//! - Histogram aggregation over many chunks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dice_core::{
    aggregate, build_strategy, detect_workers, Histogram, RollGenerator, SimulationConfig,
    StrategyKind,
};

fn bench_roll_generator(c: &mut Criterion) {
    let mut group = c.benchmark_group("roll_generator");

    for trials in [10_000_u64, 100_000, 1_000_000] {
        group.throughput(Throughput::Elements(trials));
        group.bench_with_input(BenchmarkId::from_parameter(trials), &trials, |b, &trials| {
            let mut generator = RollGenerator::from_seed(42);
            b.iter(|| generator.roll(black_box(trials)));
        });
    }

    group.finish();
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("strategies");
    group.sample_size(20);

    let trials = 2_000_000_u64;
    let config = SimulationConfig::builder()
        .trials(trials)
        .workers(detect_workers())
        .seed(7)
        .build()
        .expect("valid configuration");

    group.throughput(Throughput::Elements(trials));
    for kind in StrategyKind::ALL {
        let strategy = build_strategy(kind, &config).expect("strategy builds");
        group.bench_function(BenchmarkId::new("run", kind.name()), |b| {
            b.iter(|| strategy.execute(black_box(trials)).expect("run succeeds"));
        });
    }

    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for n in [8_usize, 64, 1024] {
        let parts: Vec<Histogram> = (0..n as u64)
            .map(|i| Histogram::from_counts([i, i + 1, i + 2, i + 3, i + 4, i + 5]))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &parts, |b, parts| {
            b.iter(|| aggregate(black_box(parts)).expect("no overflow"));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_roll_generator, bench_strategies, bench_aggregate);
criterion_main!(benches);
