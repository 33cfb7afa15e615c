//! Weibull distribution with shape `k` and scale `λ`.

use simstat_core::math::solvers::{BrentSolver, SolverConfig};
use simstat_core::math::special::{gamma, ln_gamma};
use simstat_core::traits::{ContinuousDistribution, RandomSource};
use simstat_core::types::DistributionError;

use crate::family::{expect_parameters, require_positive, BoxedDistribution, DistributionFamily};

/// Shape search interval for moment matching.
const SHAPE_BRACKET: (f64, f64) = (0.05, 200.0);

/// Weibull distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weibull {
    shape: f64,
    scale: f64,
}

impl Weibull {
    /// Creates a Weibull distribution.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` unless `shape` and `scale` are finite and positive.
    pub fn new(shape: f64, scale: f64) -> Result<Self, DistributionError> {
        Ok(Self {
            shape: require_positive("shape", shape)?,
            scale: require_positive("scale", scale)?,
        })
    }

    /// Weibull distribution with the given mean and standard deviation.
    ///
    /// The shape solves
    /// `ln Γ(1+2/k) - 2·ln Γ(1+1/k) = ln(1 + cv²)` by Brent's method over
    /// `k ∈ [0.05, 200]`; the scale then follows from the mean. Returns
    /// `None` when the coefficient of variation lies outside what that shape
    /// range can represent.
    pub fn from_moments(mean: f64, sd: f64) -> Option<Self> {
        if !(mean.is_finite() && sd.is_finite() && mean > 0.0 && sd > 0.0) {
            return None;
        }
        let cv = sd / mean;
        let target = (cv * cv).ln_1p();
        let excess =
            |k: f64| ln_gamma(1.0 + 2.0 / k) - 2.0 * ln_gamma(1.0 + 1.0 / k) - target;

        let solver = BrentSolver::new(SolverConfig::new(1e-12, 200));
        let shape = solver
            .find_root(excess, SHAPE_BRACKET.0, SHAPE_BRACKET.1)
            .ok()?;
        let scale = mean / gamma(1.0 + 1.0 / shape);
        Self::new(shape, scale).ok()
    }

    /// Shape `k`.
    #[inline]
    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Scale `λ`.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl ContinuousDistribution for Weibull {
    fn name(&self) -> &'static str {
        "Weibull"
    }

    fn density(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        if x == 0.0 {
            return if self.shape < 1.0 {
                f64::INFINITY
            } else if self.shape == 1.0 {
                1.0 / self.scale
            } else {
                0.0
            };
        }
        let z = x / self.scale;
        self.shape / self.scale * z.powf(self.shape - 1.0) * (-z.powf(self.shape)).exp()
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            0.0
        } else {
            -(-(x / self.scale).powf(self.shape)).exp_m1()
        }
    }

    fn inverse_cdf(&self, p: f64) -> f64 {
        if p <= 0.0 {
            0.0
        } else if p >= 1.0 {
            f64::INFINITY
        } else {
            self.scale * (-(-p).ln_1p()).powf(1.0 / self.shape)
        }
    }

    fn mean(&self) -> f64 {
        self.scale * gamma(1.0 + 1.0 / self.shape)
    }

    fn variance(&self) -> f64 {
        let g1 = gamma(1.0 + 1.0 / self.shape);
        let g2 = gamma(1.0 + 2.0 / self.shape);
        self.scale * self.scale * (g2 - g1 * g1)
    }

    fn parameters(&self) -> Vec<f64> {
        vec![self.shape, self.scale]
    }
}

/// Family of [`Weibull`] distributions.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeibullFamily;

impl DistributionFamily for WeibullFamily {
    fn name(&self) -> &'static str {
        "Weibull"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["WeibullDist", "WeibullDistribution"]
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["shape", "scale"]
    }

    fn from_parameters(&self, parameters: &[f64]) -> Result<BoxedDistribution, DistributionError> {
        let [shape, scale] = expect_parameters::<2>(self.name(), parameters)?;
        Ok(Box::new(Weibull::new(shape, scale)?))
    }

    fn construct(&self, mean: f64, sd: f64) -> Option<BoxedDistribution> {
        Weibull::from_moments(mean, sd).map(|d| Box::new(d) as BoxedDistribution)
    }
}
