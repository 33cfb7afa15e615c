//! Cauchy distribution.

use std::f64::consts::PI;

use simstat_core::traits::{ContinuousDistribution, RandomSource};
use simstat_core::types::DistributionError;

use crate::family::{
    expect_parameters, require_finite, require_positive, BoxedDistribution, DistributionFamily,
};

/// Cauchy distribution with location `median` and half-width `scale`.
///
/// Mean and variance are undefined and reported as NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cauchy {
    median: f64,
    scale: f64,
}

impl Cauchy {
    /// Creates a Cauchy distribution.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for a non-finite median or a non-positive scale.
    pub fn new(median: f64, scale: f64) -> Result<Self, DistributionError> {
        Ok(Self {
            median: require_finite("median", median)?,
            scale: require_positive("scale", scale)?,
        })
    }
}

impl ContinuousDistribution for Cauchy {
    fn name(&self) -> &'static str {
        "Cauchy"
    }

    fn density(&self, x: f64) -> f64 {
        let z = (x - self.median) / self.scale;
        1.0 / (PI * self.scale * (1.0 + z * z))
    }

    fn cdf(&self, x: f64) -> f64 {
        0.5 + ((x - self.median) / self.scale).atan() / PI
    }

    fn inverse_cdf(&self, p: f64) -> f64 {
        if p <= 0.0 {
            f64::NEG_INFINITY
        } else if p >= 1.0 {
            f64::INFINITY
        } else {
            self.median + self.scale * (PI * (p - 0.5)).tan()
        }
    }

    fn mean(&self) -> f64 {
        f64::NAN
    }

    fn variance(&self) -> f64 {
        f64::NAN
    }

    fn parameters(&self) -> Vec<f64> {
        vec![self.median, self.scale]
    }

    fn sample(&self, rng: &mut dyn RandomSource) -> f64 {
        self.scale / (PI * rng.next_double()).tan() + self.median
    }
}

/// Family of [`Cauchy`] distributions; moment matching places the median at
/// the mean with half-width `sd`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CauchyFamily;

impl DistributionFamily for CauchyFamily {
    fn name(&self) -> &'static str {
        "Cauchy"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["CauchyDistribution", "Lorentz"]
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["median", "scale"]
    }

    fn from_parameters(&self, parameters: &[f64]) -> Result<BoxedDistribution, DistributionError> {
        let [median, scale] = expect_parameters::<2>(self.name(), parameters)?;
        Ok(Box::new(Cauchy::new(median, scale)?))
    }

    fn construct(&self, mean: f64, sd: f64) -> Option<BoxedDistribution> {
        Cauchy::new(mean, sd)
            .ok()
            .map(|d| Box::new(d) as BoxedDistribution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quartiles() {
        let d = Cauchy::new(5.0, 2.0).unwrap();
        assert_relative_eq!(d.cdf(5.0), 0.5);
        assert_relative_eq!(d.cdf(7.0), 0.75, epsilon = 1e-15);
        assert_relative_eq!(d.inverse_cdf(0.25), 3.0, epsilon = 1e-12);
        assert_relative_eq!(d.inverse_cdf(0.75), 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_density_peak() {
        let d = Cauchy::new(0.0, 1.0).unwrap();
        assert_relative_eq!(d.density(0.0), 1.0 / PI);
        assert_relative_eq!(d.density(1.0), 0.5 / PI);
    }

    #[test]
    fn test_moments_undefined() {
        let d = Cauchy::new(0.0, 1.0).unwrap();
        assert!(d.mean().is_nan());
        assert!(d.variance().is_nan());
    }

    #[test]
    fn test_sample_uses_tangent_transform() {
        struct Quarter;
        impl RandomSource for Quarter {
            fn next_bits(&mut self, bits: u32) -> u32 {
                0x4000_0000 >> (32 - bits)
            }
            fn next_double(&mut self) -> f64 {
                0.25
            }
        }
        let d = Cauchy::new(1.0, 3.0).unwrap();
        // U = 0.25 → scale / tan(π/4) + median
        assert_relative_eq!(d.sample(&mut Quarter), 4.0, epsilon = 1e-12);
    }
}
