//! Criterion benchmarks for candidate evaluation, ranking and decomposition.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use simstat_core::traits::ContinuousDistribution;
use simstat_fitting::{
    build_example, DistributionFitter, FitEvaluator, FitterConfig, FitterInput,
    MultiModalDecomposer,
};
use simstat_models::distributions::{Gamma, Normal};
use simstat_models::DistributionRegistry;
use simstat_random::{Algorithm, RandomStream};

fn gamma_input(n: usize) -> FitterInput {
    let d = Gamma::new(4.0, 10.0).unwrap();
    let mut rng = RandomStream::new(Algorithm::L32X64Mix, 11);
    let samples: Vec<f64> = (0..n).map(|_| d.sample(&mut rng)).collect();
    FitterInput::from_samples(&samples).unwrap()
}

/// Single candidate against inputs of growing sample count.
fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_normal");
    let config = FitterConfig::default();
    let candidate = Normal::new(40.0, 20.0).unwrap();

    for n in [1_000, 10_000, 100_000] {
        let input = gamma_input(n);
        let evaluator = FitEvaluator::new(&input, &config);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| black_box(evaluator.evaluate(&candidate)))
        });
    }

    group.finish();
}

/// Full ranking over every shipped family.
fn bench_fit_all_families(c: &mut Criterion) {
    let registry = DistributionRegistry::with_default_families();
    let input = gamma_input(50_000);
    c.bench_function("fit_all_families", |b| {
        b.iter(|| {
            let mut fitter = DistributionFitter::new(&registry);
            black_box(fitter.fit(&input).len())
        })
    });
}

fn bench_decompose_example(c: &mut Criterion) {
    let density = build_example(1);
    let mut group = c.benchmark_group("decompose");
    group.sample_size(10);
    group.bench_function("two_lognormal_example", |b| {
        b.iter(|| {
            let mut decomposer = MultiModalDecomposer::new();
            black_box(decomposer.decompose(&density).len())
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_evaluate,
    bench_fit_all_families,
    bench_decompose_example
);
criterion_main!(benches);
