//! Laplace (double exponential) distribution.

use simstat_core::traits::ContinuousDistribution;
use simstat_core::types::DistributionError;

use crate::family::{
    expect_parameters, require_finite, require_positive, BoxedDistribution, DistributionFamily,
};

/// Laplace distribution with density `exp(-|x - location|/scale) / (2·scale)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Laplace {
    location: f64,
    scale: f64,
}

impl Laplace {
    /// Creates a Laplace distribution.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for a non-finite location or a non-positive scale.
    pub fn new(location: f64, scale: f64) -> Result<Self, DistributionError> {
        Ok(Self {
            location: require_finite("location", location)?,
            scale: require_positive("scale", scale)?,
        })
    }
}

impl ContinuousDistribution for Laplace {
    fn name(&self) -> &'static str {
        "Laplace"
    }

    fn density(&self, x: f64) -> f64 {
        (-(x - self.location).abs() / self.scale).exp() / (2.0 * self.scale)
    }

    fn cdf(&self, x: f64) -> f64 {
        let z = (x - self.location) / self.scale;
        if z < 0.0 {
            0.5 * z.exp()
        } else {
            1.0 - 0.5 * (-z).exp()
        }
    }

    fn inverse_cdf(&self, p: f64) -> f64 {
        if p <= 0.0 {
            f64::NEG_INFINITY
        } else if p >= 1.0 {
            f64::INFINITY
        } else if p < 0.5 {
            self.location + self.scale * (2.0 * p).ln()
        } else {
            self.location - self.scale * (2.0 - 2.0 * p).ln()
        }
    }

    fn mean(&self) -> f64 {
        self.location
    }

    fn variance(&self) -> f64 {
        2.0 * self.scale * self.scale
    }

    fn parameters(&self) -> Vec<f64> {
        vec![self.location, self.scale]
    }
}

/// Family of [`Laplace`] distributions; moment matching uses
/// `scale = sd/√2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaplaceFamily;

impl DistributionFamily for LaplaceFamily {
    fn name(&self) -> &'static str {
        "Laplace"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["DoubleExponential", "LaplaceDistribution"]
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["location", "scale"]
    }

    fn from_parameters(&self, parameters: &[f64]) -> Result<BoxedDistribution, DistributionError> {
        let [location, scale] = expect_parameters::<2>(self.name(), parameters)?;
        Ok(Box::new(Laplace::new(location, scale)?))
    }

    fn construct(&self, mean: f64, sd: f64) -> Option<BoxedDistribution> {
        Laplace::new(mean, sd / std::f64::consts::SQRT_2)
            .ok()
            .map(|d| Box::new(d) as BoxedDistribution)
    }
}
