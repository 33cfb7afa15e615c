//! Sample moments of the per-family variate generators.

use simstat_core::traits::ContinuousDistribution;
use simstat_models::distributions::{
    Cauchy, Exponential, Gamma, LogNormal, Normal, Triangular, Uniform, Weibull,
};
use simstat_models::random_non_negative;
use simstat_models::sampling::sample_vec;
use simstat_random::{Algorithm, Lcg48, RandomStream, Seed};

fn moments(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    (mean, variance)
}

#[test]
fn test_gamma_million_draws() {
    let d = Gamma::new(3.0, 2.0).unwrap();
    let mut rng = Algorithm::XoRoShiRo64StarStar.create(Seed::Long(20_240_101));
    let values = sample_vec(&d, &mut rng, 1_000_000);
    let (mean, variance) = moments(&values);
    assert!((mean - 6.0).abs() < 0.06, "mean = {}", mean);
    assert!((variance - 12.0).abs() < 0.24, "variance = {}", variance);
}

#[test]
fn test_gamma_small_shape() {
    let d = Gamma::new(0.4, 5.0).unwrap();
    let mut rng = RandomStream::new(Algorithm::L32X64Mix, 11);
    let values = sample_vec(&d, &mut rng, 400_000);
    let (mean, variance) = moments(&values);
    assert!((mean - 2.0).abs() < 0.03, "mean = {}", mean);
    assert!((variance - 10.0).abs() < 0.4, "variance = {}", variance);
}

#[test]
fn test_direct_samplers() {
    let cases: Vec<(Box<dyn ContinuousDistribution>, f64)> = vec![
        (Box::new(Exponential::new(50.0).unwrap()), 0.02),
        (Box::new(Uniform::new(-3.0, 9.0).unwrap()), 0.01),
        (Box::new(Normal::new(100.0, 15.0).unwrap()), 0.01),
        (Box::new(LogNormal::new(150.0, 30.0).unwrap()), 0.01),
    ];
    for (d, tolerance) in cases {
        let mut rng = Lcg48::new(4711);
        let values = sample_vec(d.as_ref(), &mut rng, 200_000);
        let (mean, variance) = moments(&values);
        assert!(
            (mean - d.mean()).abs() < tolerance * d.mean().abs().max(1.0),
            "{} mean {}",
            d.name(),
            mean
        );
        assert!(
            (variance / d.variance() - 1.0).abs() < 0.03,
            "{} variance {}",
            d.name(),
            variance
        );
    }
}

#[test]
fn test_inverse_cdf_samplers() {
    let cases: Vec<Box<dyn ContinuousDistribution>> = vec![
        Box::new(Weibull::new(1.5, 10.0).unwrap()),
        Box::new(Triangular::new(0.0, 2.0, 10.0).unwrap()),
    ];
    for d in cases {
        let mut rng = RandomStream::new(Algorithm::XoRoShiRo64StarStar, 5);
        let values = sample_vec(d.as_ref(), &mut rng, 200_000);
        let (mean, _) = moments(&values);
        assert!(
            (mean / d.mean() - 1.0).abs() < 0.01,
            "{} mean {} expected {}",
            d.name(),
            mean,
            d.mean()
        );
    }
}

#[test]
fn test_cauchy_median() {
    let d = Cauchy::new(7.0, 2.0).unwrap();
    let mut rng = Lcg48::new(1);
    let mut values = sample_vec(&d, &mut rng, 100_001);
    values.sort_by(|a, b| a.total_cmp(b));
    let median = values[50_000];
    assert!((median - 7.0).abs() < 0.05, "median = {}", median);
}

#[test]
fn test_random_non_negative_never_negative() {
    let d = Normal::new(0.5, 3.0).unwrap();
    let mut rng = Lcg48::new(99);
    for _ in 0..100_000 {
        assert!(random_non_negative(&d, &mut rng) >= 0.0);
    }
}

#[test]
fn test_random_non_negative_exhausts_to_zero() {
    // P(X >= 0) is ~1e-23 here, so every call hits the retry cap
    let d = Normal::new(-10.0, 1.0).unwrap();
    let mut rng = Lcg48::new(3);
    for _ in 0..100 {
        assert_eq!(random_non_negative(&d, &mut rng), 0.0);
    }
}

#[test]
fn test_seeded_sampling_is_reproducible() {
    let d = Gamma::new(2.5, 1.0).unwrap();
    let a = sample_vec(&d, &mut RandomStream::new(Algorithm::L32X64Mix, 8), 100);
    let b = sample_vec(&d, &mut RandomStream::new(Algorithm::L32X64Mix, 8), 100);
    assert_eq!(a, b);
}
