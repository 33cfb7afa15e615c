//! Family constructor contract.
//!
//! A [`DistributionFamily`] knows how to build instances of one parametric
//! family: from an explicit parameter list (canonical strings) and from the
//! first two moments of observed data (fitting).

use std::fmt;

use simstat_core::traits::ContinuousDistribution;
use simstat_core::types::DistributionError;

/// Boxed distribution instance as produced by the family constructors.
pub type BoxedDistribution = Box<dyn ContinuousDistribution>;

/// Constructor side of a distribution family.
///
/// Implementations are stateless unit structs registered once in a
/// [`DistributionRegistry`](crate::DistributionRegistry).
///
/// # Examples
///
/// ```rust
/// use simstat_models::distributions::NormalFamily;
/// use simstat_models::DistributionFamily;
///
/// let family = NormalFamily;
/// let d = family.construct(10.0, 2.0).unwrap();
/// assert_eq!(d.parameters(), vec![10.0, 2.0]);
/// assert!(family.construct(10.0, 0.0).is_none());
/// ```
pub trait DistributionFamily: Send + Sync + fmt::Debug {
    /// Canonical name; equals [`ContinuousDistribution::name`] of every
    /// instance the family creates.
    fn name(&self) -> &'static str;

    /// Alternative names accepted by registry lookups.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Names of the parameters in canonical order.
    fn parameter_names(&self) -> &'static [&'static str];

    /// Instance from parameters in canonical order.
    ///
    /// # Errors
    ///
    /// `ParameterCount` for a wrong number of values, `InvalidParameter` for
    /// a value outside the family's domain.
    fn from_parameters(&self, parameters: &[f64]) -> Result<BoxedDistribution, DistributionError>;

    /// Instance with the given mean and standard deviation, or `None` if the
    /// family cannot represent those moments.
    fn construct(&self, mean: f64, sd: f64) -> Option<BoxedDistribution>;

    /// Instance for fitting, which may also use the observed support bounds.
    ///
    /// Defaults to [`construct`](Self::construct).
    fn construct_for_fit(
        &self,
        mean: f64,
        sd: f64,
        _min: f64,
        _max: f64,
    ) -> Option<BoxedDistribution> {
        self.construct(mean, sd)
    }
}

/// Splits `parameters` into exactly `N` values for `family`.
pub(crate) fn expect_parameters<const N: usize>(
    family: &str,
    parameters: &[f64],
) -> Result<[f64; N], DistributionError> {
    <[f64; N]>::try_from(parameters).map_err(|_| DistributionError::ParameterCount {
        family: family.to_string(),
        expected: N,
        got: parameters.len(),
    })
}

/// `value` if finite, `InvalidParameter` otherwise.
pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<f64, DistributionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DistributionError::invalid(name, value))
    }
}

/// `value` if finite and strictly positive, `InvalidParameter` otherwise.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, DistributionError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(DistributionError::invalid(name, value))
    }
}
