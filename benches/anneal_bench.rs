//! Criterion benchmarks for memetic-anneal.
//!
//! Uses synthetic objectives (Sphere, Rastrigin) so the numbers measure
//! algorithm overhead rather than objective cost.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use memetic_anneal::{
    Bounds, Candidate, ClimberConfig, Evaluator, HybridConfig, HybridRunner, LocalClimber,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum()
}

fn rastrigin(x: &[f64]) -> f64 {
    10.0 * x.len() as f64
        + x.iter()
            .map(|&v| v * v - 10.0 * (2.0 * std::f64::consts::PI * v).cos())
            .sum::<f64>()
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_hybrid_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("hybrid_sphere");
    group.sample_size(10);

    for &dim in &[2usize, 10, 50] {
        let bounds = Bounds::uniform(-5.0, 5.0, dim).unwrap();
        let config = HybridConfig::default()
            .with_max_evaluations(5_000)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(dim), &(bounds, config), |b, (bo, c)| {
            b.iter(|| {
                let result = HybridRunner::run(&sphere, black_box(bo), black_box(c));
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_hybrid_rastrigin(c: &mut Criterion) {
    let mut group = c.benchmark_group("hybrid_rastrigin");
    group.sample_size(10);

    for &dim in &[2usize, 10] {
        let bounds = Bounds::uniform(-5.12, 5.12, dim).unwrap();
        let config = HybridConfig::default()
            .with_max_evaluations(20_000)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(dim), &(bounds, config), |b, (bo, c)| {
            b.iter(|| {
                let result = HybridRunner::run(&rastrigin, black_box(bo), black_box(c));
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_local_climb(c: &mut Criterion) {
    let mut group = c.benchmark_group("local_climb");

    for &dim in &[2usize, 10, 50] {
        let bounds = Bounds::uniform(-5.0, 5.0, dim).unwrap();
        let config = ClimberConfig::default();
        group.bench_with_input(BenchmarkId::from_parameter(dim), &bounds, |b, bo| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| {
                let mut evaluator = Evaluator::new(&sphere, 1_000);
                let start = Candidate::within(bo, vec![1.0; dim]).unwrap();
                let outcome = LocalClimber::climb(&mut evaluator, bo, start, &config, &mut rng);
                black_box(outcome)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_hybrid_sphere, bench_hybrid_rastrigin, bench_local_climb);
criterion_main!(benches);
