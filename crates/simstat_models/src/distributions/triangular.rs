//! Triangular distribution.

use simstat_core::traits::ContinuousDistribution;
use simstat_core::types::DistributionError;

use crate::family::{expect_parameters, require_finite, BoxedDistribution, DistributionFamily};

/// Triangular distribution on `[lower, upper]` peaking at `mode`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangular {
    lower: f64,
    mode: f64,
    upper: f64,
}

impl Triangular {
    /// Creates a triangular distribution.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for non-finite values, `upper <= lower` or a mode
    /// outside `[lower, upper]`.
    pub fn new(lower: f64, mode: f64, upper: f64) -> Result<Self, DistributionError> {
        let lower = require_finite("lower", lower)?;
        let mode = require_finite("mode", mode)?;
        let upper = require_finite("upper", upper)?;
        if upper <= lower {
            return Err(DistributionError::invalid("upper", upper));
        }
        if mode < lower || mode > upper {
            return Err(DistributionError::invalid("mode", mode));
        }
        Ok(Self { lower, mode, upper })
    }

    #[inline]
    fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

impl ContinuousDistribution for Triangular {
    fn name(&self) -> &'static str {
        "Triangular"
    }

    fn density(&self, x: f64) -> f64 {
        let (a, c, b) = (self.lower, self.mode, self.upper);
        if x < a || x > b {
            0.0
        } else if x < c {
            2.0 * (x - a) / (self.width() * (c - a))
        } else if x == c {
            2.0 / self.width()
        } else {
            2.0 * (b - x) / (self.width() * (b - c))
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        let (a, c, b) = (self.lower, self.mode, self.upper);
        if x <= a {
            0.0
        } else if x <= c {
            (x - a) * (x - a) / (self.width() * (c - a))
        } else if x < b {
            1.0 - (b - x) * (b - x) / (self.width() * (b - c))
        } else {
            1.0
        }
    }

    fn inverse_cdf(&self, p: f64) -> f64 {
        let (a, c, b) = (self.lower, self.mode, self.upper);
        let p = p.clamp(0.0, 1.0);
        if p < (c - a) / self.width() {
            a + (p * self.width() * (c - a)).sqrt()
        } else {
            b - ((1.0 - p) * self.width() * (b - c)).sqrt()
        }
    }

    fn mean(&self) -> f64 {
        (self.lower + self.mode + self.upper) / 3.0
    }

    fn variance(&self) -> f64 {
        let (a, c, b) = (self.lower, self.mode, self.upper);
        (a * a + b * b + c * c - a * b - a * c - b * c) / 18.0
    }

    fn parameters(&self) -> Vec<f64> {
        vec![self.lower, self.mode, self.upper]
    }
}

/// Family of [`Triangular`] distributions.
///
/// Moment matching gives the symmetric triangle `mean ± √6·sd`; fitting
/// spans the observed support and places the mode at
/// `3·mean - lower - upper`, clamped into the support.
#[derive(Debug, Clone, Copy, Default)]
pub struct TriangularFamily;

impl DistributionFamily for TriangularFamily {
    fn name(&self) -> &'static str {
        "Triangular"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["TriangularDistribution"]
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["lower", "mode", "upper"]
    }

    fn from_parameters(&self, parameters: &[f64]) -> Result<BoxedDistribution, DistributionError> {
        let [lower, mode, upper] = expect_parameters::<3>(self.name(), parameters)?;
        Ok(Box::new(Triangular::new(lower, mode, upper)?))
    }

    fn construct(&self, mean: f64, sd: f64) -> Option<BoxedDistribution> {
        let half_width = 6.0_f64.sqrt() * sd;
        Triangular::new(mean - half_width, mean, mean + half_width)
            .ok()
            .map(|d| Box::new(d) as BoxedDistribution)
    }

    fn construct_for_fit(
        &self,
        mean: f64,
        _sd: f64,
        min: f64,
        max: f64,
    ) -> Option<BoxedDistribution> {
        if !(min.is_finite() && max.is_finite()) || max <= min {
            return None;
        }
        let mode = (3.0 * mean - min - max).clamp(min, max);
        Triangular::new(min, mode, max)
            .ok()
            .map(|d| Box::new(d) as BoxedDistribution)
    }
}
