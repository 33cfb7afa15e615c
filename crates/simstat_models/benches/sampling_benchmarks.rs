//! Criterion benchmarks for the per-family variate generators.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use simstat_core::traits::ContinuousDistribution;
use simstat_models::DistributionRegistry;
use simstat_random::{Algorithm, Seed};

const BATCH: usize = 10_000;

/// Direct samplers versus inverse-CDF sampling, per family.
fn bench_sample_into(c: &mut Criterion) {
    let registry = DistributionRegistry::with_default_families();
    let mut group = c.benchmark_group("sample_into");
    group.throughput(Throughput::Elements(BATCH as u64));

    for family in registry.families() {
        let Some(d) = family.construct_for_fit(20.0, 6.0, 1.0, 60.0) else {
            continue;
        };
        let mut rng = Algorithm::L32X64Mix.create(Seed::Long(1));
        let mut buffer = vec![0.0; BATCH];
        group.bench_function(BenchmarkId::from_parameter(family.name()), |b| {
            b.iter(|| d.sample_into(&mut rng, black_box(&mut buffer)))
        });
    }

    group.finish();
}

/// Gamma rejection sampling across the two shape regimes.
fn bench_gamma_shapes(c: &mut Criterion) {
    let registry = DistributionRegistry::with_default_families();
    let mut group = c.benchmark_group("gamma_shape");

    for shape in [0.3, 0.9, 1.0, 2.5, 30.0] {
        let d = registry
            .family("Gamma")
            .and_then(|f| f.from_parameters(&[shape, 1.0]).ok());
        let Some(d) = d else { continue };
        let mut rng = Algorithm::XoRoShiRo64StarStar.create(Seed::Long(7));
        group.bench_with_input(BenchmarkId::from_parameter(shape), &shape, |b, _| {
            b.iter(|| black_box(d.sample(&mut rng)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sample_into, bench_gamma_shapes);
criterion_main!(benches);
