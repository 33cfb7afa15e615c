//! Capability contract of a continuous distribution family instance.

use std::fmt;

use super::random::RandomSource;

/// A fully parameterised continuous distribution.
///
/// This is the only surface the fitting and sampling code consumes.
/// Implementations are immutable after construction and shareable across
/// threads.
///
/// The default [`sample`](ContinuousDistribution::sample) inverts the CDF at
/// a uniform draw; families with a faster direct method override it.
///
/// # Examples
///
/// ```
/// use simstat_core::traits::{ContinuousDistribution, RandomSource};
///
/// #[derive(Debug)]
/// struct UnitUniform;
///
/// impl ContinuousDistribution for UnitUniform {
///     fn name(&self) -> &'static str { "UnitUniform" }
///     fn density(&self, x: f64) -> f64 { if (0.0..=1.0).contains(&x) { 1.0 } else { 0.0 } }
///     fn cdf(&self, x: f64) -> f64 { x.clamp(0.0, 1.0) }
///     fn inverse_cdf(&self, p: f64) -> f64 { p }
///     fn mean(&self) -> f64 { 0.5 }
///     fn variance(&self) -> f64 { 1.0 / 12.0 }
///     fn parameters(&self) -> Vec<f64> { Vec::new() }
/// }
///
/// let d = UnitUniform;
/// assert_eq!(d.cdf(0.25), 0.25);
/// assert!((d.standard_deviation() - (1.0_f64 / 12.0).sqrt()).abs() < 1e-15);
/// ```
pub trait ContinuousDistribution: Send + Sync + fmt::Debug {
    /// Canonical family name, e.g. `"LogNormal"`.
    fn name(&self) -> &'static str;

    /// Probability density at `x`.
    fn density(&self, x: f64) -> f64;

    /// Cumulative probability `P(X <= x)`.
    fn cdf(&self, x: f64) -> f64;

    /// Quantile function; the inverse of [`cdf`](Self::cdf) on `(0, 1)`.
    fn inverse_cdf(&self, p: f64) -> f64;

    /// Expected value (may be NaN where undefined).
    fn mean(&self) -> f64;

    /// Variance (may be NaN or infinite where undefined).
    fn variance(&self) -> f64;

    /// Square root of the variance.
    fn standard_deviation(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Parameters in canonical order, as accepted by the family's
    /// `from_parameters` constructor.
    fn parameters(&self) -> Vec<f64>;

    /// One variate drawn using `rng`.
    fn sample(&self, rng: &mut dyn RandomSource) -> f64 {
        self.inverse_cdf(rng.next_double())
    }

    /// Fills `buffer` with variates.
    fn sample_into(&self, rng: &mut dyn RandomSource, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.sample(rng);
        }
    }

    /// The support point of a degenerate distribution, `None` otherwise.
    fn point_mass(&self) -> Option<f64> {
        None
    }

    /// Whether this is a normal distribution.
    ///
    /// The Anderson–Darling statistic is only computed for these.
    fn is_normal(&self) -> bool {
        false
    }
}
