//! Logistic distribution.

use std::f64::consts::PI;

use simstat_core::traits::{ContinuousDistribution, RandomSource};
use simstat_core::types::DistributionError;

use crate::family::{
    expect_parameters, require_finite, require_positive, BoxedDistribution, DistributionFamily,
};

/// Logistic distribution with CDF `1 / (1 + exp(-(x - location)/scale))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Logistic {
    location: f64,
    scale: f64,
}

impl Logistic {
    /// Creates a logistic distribution.
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

impl ContinuousDistribution for Logistic {
    fn name(&self) -> &'static str {
        "Logistic"
    }

    fn density(&self, x: f64) -> f64 {
        // symmetric, so evaluate on the decaying side
        let e = (-((x - self.location) / self.scale).abs()).exp();
        e / (self.scale * (1.0 + e) * (1.0 + e))
    }

    fn cdf(&self, x: f64) -> f64 {
        1.0 / (1.0 + (-(x - self.location) / self.scale).exp())
    }

    fn inverse_cdf(&self, p: f64) -> f64 {
        if p <= 0.0 {
            f64::NEG_INFINITY
        } else if p >= 1.0 {
            f64::INFINITY
        } else {
            self.location + self.scale * (p / (1.0 - p)).ln()
        }
    }

    fn mean(&self) -> f64 {
        self.location
    }

    fn variance(&self) -> f64 {
        self.scale * self.scale * PI * PI / 3.0
    }

    fn parameters(&self) -> Vec<f64> {
        vec![self.location, self.scale]
    }

    fn sample(&self, rng: &mut dyn RandomSource) -> f64 {
        loop {
            let u = rng.next_double();
            if u > 0.0 {
                return self.inverse_cdf(u);
            }
        }
    }
}

/// Family of [`Logistic`] distributions; moment matching uses
/// `scale = sd·√3/π`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogisticFamily;

impl DistributionFamily for LogisticFamily {
    fn name(&self) -> &'static str {
        "Logistic"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["LogisticDistribution"]
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["location", "scale"]
    }

    fn from_parameters(&self, parameters: &[f64]) -> Result<BoxedDistribution, DistributionError> {
        let [location, scale] = expect_parameters::<2>(self.name(), parameters)?;
        Ok(Box::new(Logistic::new(location, scale)?))
    }

    fn construct(&self, mean: f64, sd: f64) -> Option<BoxedDistribution> {
        Logistic::new(mean, sd * 3.0_f64.sqrt() / PI)
            .ok()
            .map(|d| Box::new(d) as BoxedDistribution)
    }
}
