//! Degenerate one-point distribution.

use simstat_core::traits::{ContinuousDistribution, RandomSource};
use simstat_core::types::DistributionError;

use crate::family::{expect_parameters, require_finite, BoxedDistribution, DistributionFamily};

/// All probability mass at `point`.
///
/// The density is infinite at the point and zero elsewhere; goodness-of-fit
/// code recognises it through [`point_mass`](ContinuousDistribution::point_mass).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OnePoint {
    point: f64,
}

impl OnePoint {
    /// Creates a one-point distribution.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for a non-finite point.
    pub fn new(point: f64) -> Result<Self, DistributionError> {
        Ok(Self {
            point: require_finite("point", point)?,
        })
    }
}

impl ContinuousDistribution for OnePoint {
    fn name(&self) -> &'static str {
        "OnePoint"
    }

    fn density(&self, x: f64) -> f64 {
        if x == self.point {
            f64::INFINITY
        } else {
            0.0
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        if x < self.point {
            0.0
        } else {
            1.0
        }
    }

    fn inverse_cdf(&self, _p: f64) -> f64 {
        self.point
    }

    fn mean(&self) -> f64 {
        self.point
    }

    fn variance(&self) -> f64 {
        0.0
    }

    fn parameters(&self) -> Vec<f64> {
        vec![self.point]
    }

    fn sample(&self, _rng: &mut dyn RandomSource) -> f64 {
        self.point
    }

    fn point_mass(&self) -> Option<f64> {
        Some(self.point)
    }
}

/// Family of [`OnePoint`] distributions, placed at the mean.
#[derive(Debug, Clone, Copy, Default)]
pub struct OnePointFamily;

impl DistributionFamily for OnePointFamily {
    fn name(&self) -> &'static str {
        "OnePoint"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["Deterministic", "OnePointDistribution"]
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["point"]
    }

    fn from_parameters(&self, parameters: &[f64]) -> Result<BoxedDistribution, DistributionError> {
        let [point] = expect_parameters::<1>(self.name(), parameters)?;
        Ok(Box::new(OnePoint::new(point)?))
    }

    fn construct(&self, mean: f64, _sd: f64) -> Option<BoxedDistribution> {
        OnePoint::new(mean)
            .ok()
            .map(|d| Box::new(d) as BoxedDistribution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_mass() {
        let d = OnePoint::new(3.0).unwrap();
        assert_eq!(d.point_mass(), Some(3.0));
        assert_eq!(d.cdf(2.999), 0.0);
        assert_eq!(d.cdf(3.0), 1.0);
        assert_eq!(d.inverse_cdf(0.3), 3.0);
        assert_eq!(d.variance(), 0.0);
        assert_eq!(d.density(3.0), f64::INFINITY);
        assert_eq!(d.density(4.0), 0.0);
    }

    #[test]
    fn test_family_places_point_at_mean() {
        let d = OnePointFamily.construct(12.5, 4.0).unwrap();
        assert_eq!(d.point_mass(), Some(12.5));
        assert!(OnePointFamily.construct(f64::NAN, 0.0).is_none());
    }
}
