//! Error types for structured error handling.
//!
//! This module provides:
//! - `SolverError`: Errors from root-finding solvers
//! - `DistributionError`: Errors from distribution construction and parsing

use thiserror::Error;

/// Root-finding solver errors.
///
/// Provides structured error handling for root-finding solver operations
/// with descriptive context for each failure mode.
///
/// # Variants
/// - `MaxIterationsExceeded`: Solver failed to converge within iteration limit
/// - `NoBracket`: Function values at bracket endpoints have same sign
/// - `NumericalInstability`: General numerical instability
///
/// # Examples
/// ```
/// use simstat_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

/// Distribution construction and parsing errors.
///
/// # Variants
/// - `InvalidParameter`: A parameter lies outside the family's domain
/// - `ParameterCount`: Wrong number of parameters for a family
/// - `UnknownFamily`: No registered family carries the given name
/// - `ParseError`: Malformed canonical string
///
/// # Examples
/// ```
/// use simstat_core::types::DistributionError;
///
/// let err = DistributionError::InvalidParameter { name: "mean", value: -1.0 };
/// assert_eq!(format!("{}", err), "Invalid parameter 'mean': -1");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistributionError {
    /// Parameter value outside the valid domain.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// Wrong number of parameters supplied to a family.
    #[error("{family} expects {expected} parameters, got {got}")]
    ParameterCount {
        /// Family name
        family: String,
        /// Number of parameters the family takes
        expected: usize,
        /// Number of parameters supplied
        got: usize,
    },

    /// No family registered under this name.
    #[error("Unknown distribution family: {0}")]
    UnknownFamily(String),

    /// Canonical string could not be parsed.
    #[error("Distribution parse error: {0}")]
    ParseError(String),
}

impl DistributionError {
    /// Shorthand for [`DistributionError::InvalidParameter`].
    #[inline]
    pub fn invalid(name: &'static str, value: f64) -> Self {
        Self::InvalidParameter { name, value }
    }
}
