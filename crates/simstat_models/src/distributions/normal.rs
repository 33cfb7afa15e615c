//! Normal (Gaussian) distribution.

use simstat_core::math::special::{inverse_norm_cdf, norm_cdf, norm_pdf};
use simstat_core::traits::{ContinuousDistribution, RandomSource};
use simstat_core::types::DistributionError;

use crate::family::{
    expect_parameters, require_finite, require_positive, BoxedDistribution, DistributionFamily,
};

/// Normal distribution with mean `mean` and standard deviation `sd`.
///
/// # Examples
///
/// ```rust
/// use simstat_core::traits::ContinuousDistribution;
/// use simstat_models::distributions::Normal;
///
/// let d = Normal::new(100.0, 15.0).unwrap();
/// assert!((d.cdf(100.0) - 0.5).abs() < 1e-15);
/// assert!(d.is_normal());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    mean: f64,
    sd: f64,
}

impl Normal {
    /// Creates a normal distribution.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for a non-finite mean or a non-positive sd.
    pub fn new(mean: f64, sd: f64) -> Result<Self, DistributionError> {
        Ok(Self {
            mean: require_finite("mean", mean)?,
            sd: require_positive("sd", sd)?,
        })
    }

    /// The standard normal distribution.
    pub fn standard() -> Self {
        Self { mean: 0.0, sd: 1.0 }
    }
}

impl ContinuousDistribution for Normal {
    fn name(&self) -> &'static str {
        "Normal"
    }

    fn density(&self, x: f64) -> f64 {
        norm_pdf((x - self.mean) / self.sd) / self.sd
    }

    fn cdf(&self, x: f64) -> f64 {
        norm_cdf((x - self.mean) / self.sd)
    }

    fn inverse_cdf(&self, p: f64) -> f64 {
        self.mean + self.sd * inverse_norm_cdf(p)
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
        rng.next_gaussian() * self.sd + self.mean
    }

    fn is_normal(&self) -> bool {
        true
    }
}

/// Family of [`Normal`] distributions.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalFamily;

impl DistributionFamily for NormalFamily {
    fn name(&self) -> &'static str {
        "Normal"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["Gaussian", "NormalDistribution"]
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["mean", "sd"]
    }

    fn from_parameters(&self, parameters: &[f64]) -> Result<BoxedDistribution, DistributionError> {
        let [mean, sd] = expect_parameters::<2>(self.name(), parameters)?;
        Ok(Box::new(Normal::new(mean, sd)?))
    }

    fn construct(&self, mean: f64, sd: f64) -> Option<BoxedDistribution> {
        Normal::new(mean, sd)
            .ok()
            .map(|d| Box::new(d) as BoxedDistribution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rejects_zero_sd() {
        assert!(Normal::new(0.0, 0.0).is_err());
        assert!(Normal::new(f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_standard_values() {
        let d = Normal::standard();
        assert_relative_eq!(d.density(0.0), 0.398_942_280_401_432_7, epsilon = 1e-15);
        assert_relative_eq!(d.cdf(1.96), 0.975_002_104_851_780, epsilon = 1e-12);
        assert_relative_eq!(d.inverse_cdf(0.975), 1.959_963_984_540_054, epsilon = 1e-9);
    }

    #[test]
    fn test_scaled() {
        let d = Normal::new(10.0, 2.0).unwrap();
        assert_relative_eq!(d.cdf(12.0), norm_cdf(1.0), epsilon = 1e-15);
        assert_relative_eq!(d.density(10.0), norm_pdf(0.0) / 2.0, epsilon = 1e-15);
        assert_relative_eq!(d.inverse_cdf(0.5), 10.0, epsilon = 1e-12);
        assert_eq!(d.standard_deviation(), 2.0);
        assert_eq!(d.variance(), 4.0);
    }
}
