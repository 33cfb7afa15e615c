//! Log-normal distribution parameterised by its own mean and standard
//! deviation.
//!
//! ```text
//! σ² = ln(1 + sd²/mean²)
//! μ  = ln(mean) - σ²/2
//! X  = exp(μ + σ·Z)
//! ```

use simstat_core::math::special::{inverse_norm_cdf, norm_cdf, norm_pdf};
use simstat_core::traits::{ContinuousDistribution, RandomSource};
use simstat_core::types::DistributionError;

use crate::family::{expect_parameters, require_positive, BoxedDistribution, DistributionFamily};

/// Log-normal distribution with the given mean and standard deviation.
///
/// # Examples
///
/// ```rust
/// use simstat_core::traits::ContinuousDistribution;
/// use simstat_models::distributions::LogNormal;
///
/// let d = LogNormal::new(50.0, 100.0).unwrap();
/// assert!((d.mean() - 50.0).abs() < 1e-10);
/// assert!((d.standard_deviation() - 100.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogNormal {
    mean: f64,
    sd: f64,
    mu: f64,
    sigma: f64,
}

impl LogNormal {
    /// Creates a log-normal distribution.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` unless both `mean` and `sd` are finite and
    /// positive.
    pub fn new(mean: f64, sd: f64) -> Result<Self, DistributionError> {
        let mean = require_positive("mean", mean)?;
        let sd = require_positive("sd", sd)?;
        let cv = sd / mean;
        let sigma_sq = (cv * cv).ln_1p();
        Ok(Self {
            mean,
            sd,
            mu: mean.ln() - 0.5 * sigma_sq,
            sigma: sigma_sq.sqrt(),
        })
    }

    /// Location of the underlying normal, `μ`.
    #[inline]
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Scale of the underlying normal, `σ`.
    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// The distribution's mode, `exp(μ - σ²)`.
    pub fn mode(&self) -> f64 {
        (self.mu - self.sigma * self.sigma).exp()
    }
}

impl ContinuousDistribution for LogNormal {
    fn name(&self) -> &'static str {
        "LogNormal"
    }

    fn density(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        norm_pdf((x.ln() - self.mu) / self.sigma) / (self.sigma * x)
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        norm_cdf((x.ln() - self.mu) / self.sigma)
    }

    fn inverse_cdf(&self, p: f64) -> f64 {
        if p <= 0.0 {
            0.0
        } else {
            (self.mu + self.sigma * inverse_norm_cdf(p)).exp()
        }
    }

    fn mean(&self) -> f64 {
        self.mean
    }

    fn variance(&self) -> f64 {
        self.sd * self.sd
    }

    fn standard_deviation(&self) -> f64 {
        self.sd
    }

    fn parameters(&self) -> Vec<f64> {
        vec![self.mean, self.sd]
    }

    fn sample(&self, rng: &mut dyn RandomSource) -> f64 {
        (self.mu + self.sigma * rng.next_gaussian()).exp()
    }
}

/// Family of [`LogNormal`] distributions.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNormalFamily;

impl DistributionFamily for LogNormalFamily {
    fn name(&self) -> &'static str {
        "LogNormal"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["Log-Normal", "LogNormalDist", "LogNormalDistribution"]
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["mean", "sd"]
    }

    fn from_parameters(&self, parameters: &[f64]) -> Result<BoxedDistribution, DistributionError> {
        let [mean, sd] = expect_parameters::<2>(self.name(), parameters)?;
        Ok(Box::new(LogNormal::new(mean, sd)?))
    }

    fn construct(&self, mean: f64, sd: f64) -> Option<BoxedDistribution> {
        LogNormal::new(mean, sd)
            .ok()
            .map(|d| Box::new(d) as BoxedDistribution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_underlying_parameters() {
        let d = LogNormal::new(1.0, 1.0).unwrap();
        let sigma_sq = 2.0_f64.ln();
        assert_relative_eq!(d.sigma(), sigma_sq.sqrt(), epsilon = 1e-15);
        assert_relative_eq!(d.mu(), -0.5 * sigma_sq, epsilon = 1e-15);
    }

    #[test]
    fn test_median_is_exp_mu() {
        let d = LogNormal::new(150.0, 30.0).unwrap();
        assert_relative_eq!(d.cdf(d.mu().exp()), 0.5, epsilon = 1e-15);
        assert_relative_eq!(d.inverse_cdf(0.5), d.mu().exp(), max_relative = 1e-12);
    }

    #[test]
    fn test_density_peaks_at_mode() {
        let d = LogNormal::new(50.0, 100.0).unwrap();
        let mode = d.mode();
        let peak = d.density(mode);
        assert!(peak > d.density(mode * 0.99));
        assert!(peak > d.density(mode * 1.01));
        assert_eq!(d.density(0.0), 0.0);
        assert_eq!(d.cdf(-1.0), 0.0);
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(LogNormal::new(0.0, 1.0).is_err());
        assert!(LogNormal::new(1.0, 0.0).is_err());
        assert!(LogNormalFamily.construct(-5.0, 1.0).is_none());
    }
}
