//! Continuous uniform distribution.

use simstat_core::traits::{ContinuousDistribution, RandomSource};
use simstat_core::types::DistributionError;

use crate::family::{expect_parameters, require_finite, BoxedDistribution, DistributionFamily};

/// Uniform distribution on `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniform {
    lower: f64,
    upper: f64,
}

impl Uniform {
    /// Creates a uniform distribution.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for non-finite bounds or `upper <= lower`.
    pub fn new(lower: f64, upper: f64) -> Result<Self, DistributionError> {
        let lower = require_finite("lower", lower)?;
        let upper = require_finite("upper", upper)?;
        if upper <= lower {
            return Err(DistributionError::invalid("upper", upper));
        }
        Ok(Self { lower, upper })
    }

    /// Lower bound of the support.
    #[inline]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound of the support.
    #[inline]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    #[inline]
    fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

impl ContinuousDistribution for Uniform {
    fn name(&self) -> &'static str {
        "Uniform"
    }

    fn density(&self, x: f64) -> f64 {
        if x < self.lower || x > self.upper {
            0.0
        } else {
            1.0 / self.width()
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= self.lower {
            0.0
        } else if x >= self.upper {
            1.0
        } else {
            (x - self.lower) / self.width()
        }
    }

    fn inverse_cdf(&self, p: f64) -> f64 {
        self.lower + p.clamp(0.0, 1.0) * self.width()
    }

    fn mean(&self) -> f64 {
        0.5 * (self.lower + self.upper)
    }

    fn variance(&self) -> f64 {
        self.width() * self.width() / 12.0
    }

    fn parameters(&self) -> Vec<f64> {
        vec![self.lower, self.upper]
    }

    fn sample(&self, rng: &mut dyn RandomSource) -> f64 {
        self.lower + self.width() * rng.next_double()
    }
}

/// Family of [`Uniform`] distributions.
///
/// Moment matching uses `mean ± √3·sd`; fitting uses the observed support
/// instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformFamily;

impl DistributionFamily for UniformFamily {
    fn name(&self) -> &'static str {
        "Uniform"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["UniformDistribution"]
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["lower", "upper"]
    }

    fn from_parameters(&self, parameters: &[f64]) -> Result<BoxedDistribution, DistributionError> {
        let [lower, upper] = expect_parameters::<2>(self.name(), parameters)?;
        Ok(Box::new(Uniform::new(lower, upper)?))
    }

    fn construct(&self, mean: f64, sd: f64) -> Option<BoxedDistribution> {
        let half_width = 3.0_f64.sqrt() * sd;
        Uniform::new(mean - half_width, mean + half_width)
            .ok()
            .map(|d| Box::new(d) as BoxedDistribution)
    }

    fn construct_for_fit(
        &self,
        _mean: f64,
        _sd: f64,
        min: f64,
        max: f64,
    ) -> Option<BoxedDistribution> {
        Uniform::new(min, max)
            .ok()
            .map(|d| Box::new(d) as BoxedDistribution)
    }
}
