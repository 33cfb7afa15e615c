//! Criterion benchmarks for the bit-stream generators.
//!
//! Measures raw 32-bit draws, doubles and Gaussians for every algorithm,
//! plus the overhead of reaching a generator through the thread-local pool.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use simstat_core::traits::RandomSource;
use simstat_random::{
    Algorithm, GeneratorPolicy, PlatformGenerator, Seed, ThreadLocalGenerators,
};

const BATCH: usize = 10_000;

/// Benchmark uniform doubles for each algorithm.
fn bench_next_double(c: &mut Criterion) {
    let mut group = c.benchmark_group("next_double");
    group.throughput(Throughput::Elements(BATCH as u64));

    for algorithm in Algorithm::ALL {
        let mut rng = algorithm.create(Seed::Long(42));
        let mut buffer = vec![0.0; BATCH];
        group.bench_function(BenchmarkId::from_parameter(algorithm), |b| {
            b.iter(|| rng.fill_uniform(black_box(&mut buffer)))
        });
    }

    let mut platform = PlatformGenerator::new();
    let mut buffer = vec![0.0; BATCH];
    group.bench_function(BenchmarkId::from_parameter("Platform"), |b| {
        b.iter(|| platform.fill_uniform(black_box(&mut buffer)))
    });

    group.finish();
}

/// Benchmark Gaussian draws: polar transform versus Ziggurat.
fn bench_next_gaussian(c: &mut Criterion) {
    let mut group = c.benchmark_group("next_gaussian");
    group.throughput(Throughput::Elements(BATCH as u64));

    let mut rng = Algorithm::L32X64Mix.create(Seed::Long(42));
    let mut buffer = vec![0.0; BATCH];
    group.bench_function("L32X64Mix_polar", |b| {
        b.iter(|| rng.fill_gaussian(black_box(&mut buffer)))
    });

    let mut platform = PlatformGenerator::new();
    group.bench_function("Platform_ziggurat", |b| {
        b.iter(|| platform.fill_gaussian(black_box(&mut buffer)))
    });

    group.finish();
}

/// Benchmark access through the thread-local pool.
fn bench_thread_local(c: &mut Criterion) {
    let pool = ThreadLocalGenerators::new(GeneratorPolicy::Seeded {
        algorithm: Algorithm::XoRoShiRo64StarStar,
        seed: 1,
    });

    c.bench_function("thread_local_next_double", |b| {
        b.iter(|| pool.with_generator(|rng| black_box(rng.next_double())))
    });
}

criterion_group!(benches, bench_next_double, bench_next_gaussian, bench_thread_local);
criterion_main!(benches);
