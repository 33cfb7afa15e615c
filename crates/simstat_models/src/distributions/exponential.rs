//! Exponential distribution parameterised by its mean.

use simstat_core::traits::{ContinuousDistribution, RandomSource};
use simstat_core::types::DistributionError;

use crate::family::{expect_parameters, require_positive, BoxedDistribution, DistributionFamily};

/// Exponential distribution with density `exp(-x/mean)/mean` on `[0, ∞)`.
///
/// # Examples
///
/// ```rust
/// use simstat_core::traits::ContinuousDistribution;
/// use simstat_models::distributions::Exponential;
///
/// let d = Exponential::new(50.0).unwrap();
/// assert!((d.cdf(50.0) - (1.0 - (-1.0_f64).exp())).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exponential {
    mean: f64,
}

impl Exponential {
    /// Creates an exponential distribution.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` unless `mean` is finite and positive.
    pub fn new(mean: f64) -> Result<Self, DistributionError> {
        Ok(Self {
            mean: require_positive("mean", mean)?,
        })
    }
}

impl ContinuousDistribution for Exponential {
    fn name(&self) -> &'static str {
        "Exponential"
    }

    fn density(&self, x: f64) -> f64 {
        if x < 0.0 {
            0.0
        } else {
            (-x / self.mean).exp() / self.mean
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            0.0
        } else {
            -(-x / self.mean).exp_m1()
        }
    }

    fn inverse_cdf(&self, p: f64) -> f64 {
        if p <= 0.0 {
            0.0
        } else if p >= 1.0 {
            f64::INFINITY
        } else {
            -self.mean * (-p).ln_1p()
        }
    }

    fn mean(&self) -> f64 {
        self.mean
    }

    fn variance(&self) -> f64 {
        self.mean * self.mean
    }

    fn parameters(&self) -> Vec<f64> {
        vec![self.mean]
    }

    fn sample(&self, rng: &mut dyn RandomSource) -> f64 {
        -(1.0 - rng.next_double()).ln() * self.mean
    }
}

/// Family of [`Exponential`] distributions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExponentialFamily;

impl DistributionFamily for ExponentialFamily {
    fn name(&self) -> &'static str {
        "Exponential"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["Exp", "ExponentialDistribution"]
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["mean"]
    }

    fn from_parameters(&self, parameters: &[f64]) -> Result<BoxedDistribution, DistributionError> {
        let [mean] = expect_parameters::<1>(self.name(), parameters)?;
        Ok(Box::new(Exponential::new(mean)?))
    }

    fn construct(&self, mean: f64, _sd: f64) -> Option<BoxedDistribution> {
        Exponential::new(mean)
            .ok()
            .map(|d| Box::new(d) as BoxedDistribution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rejects_non_positive_mean() {
        assert!(Exponential::new(0.0).is_err());
        assert!(Exponential::new(-2.0).is_err());
    }

    #[test]
    fn test_density_and_cdf() {
        let d = Exponential::new(2.0).unwrap();
        assert_eq!(d.density(-1.0), 0.0);
        assert_relative_eq!(d.density(0.0), 0.5);
        assert_relative_eq!(d.density(2.0), 0.5 * (-1.0_f64).exp(), epsilon = 1e-15);
        assert_eq!(d.cdf(-1.0), 0.0);
        assert_relative_eq!(d.cdf(2.0), 1.0 - (-1.0_f64).exp(), epsilon = 1e-15);
    }

    #[test]
    fn test_inverse_cdf() {
        let d = Exponential::new(3.0).unwrap();
        for &p in &[0.01, 0.25, 0.5, 0.9, 0.999] {
            assert_relative_eq!(d.cdf(d.inverse_cdf(p)), p, epsilon = 1e-14);
        }
        assert_eq!(d.inverse_cdf(0.0), 0.0);
        assert_eq!(d.inverse_cdf(1.0), f64::INFINITY);
    }

    #[test]
    fn test_moments() {
        let d = Exponential::new(4.0).unwrap();
        assert_eq!(d.mean(), 4.0);
        assert_eq!(d.variance(), 16.0);
        assert_eq!(d.standard_deviation(), 4.0);
    }

    #[test]
    fn test_family_construct_ignores_sd() {
        let d = ExponentialFamily.construct(7.0, 100.0).unwrap();
        assert_eq!(d.parameters(), vec![7.0]);
        assert!(ExponentialFamily.construct(-1.0, 1.0).is_none());
    }
}
