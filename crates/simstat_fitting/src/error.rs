//! Error types for the fitting layer.
//!
//! - `InputError`: malformed sample, table or density text
//! - `ConfigError`: invalid fitter or decomposer settings

use thiserror::Error;

/// Errors raised while turning measurement text into an empirical density.
///
/// The loaders on [`LoadInput`](crate::input::LoadInput) never return these
/// directly; they write the message to the report and return `false`.
///
/// # Examples
/// ```
/// use simstat_fitting::InputError;
///
/// let err = InputError::InvalidNumber { position: 3, token: "x".to_string() };
/// assert_eq!(format!("{}", err), "Invalid number \"x\" at position 3");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// The text holds no values at all.
    #[error("No measurement values found")]
    Empty,

    /// A token could not be read as a number.
    #[error("Invalid number \"{token}\" at position {position}")]
    InvalidNumber {
        /// 1-based position of the token
        position: usize,
        /// Offending token
        token: String,
    },

    /// A value or weight is negative or not finite.
    #[error("Invalid value {value} at position {position}: must be finite and non-negative")]
    InvalidValue {
        /// 1-based position of the value
        position: usize,
        /// Offending value
        value: f64,
    },

    /// A sample lies beyond the largest supported bin.
    #[error("Value {value} exceeds the largest supported bin {max_bin}")]
    ValueTooLarge {
        /// Offending value
        value: f64,
        /// Largest bin index accepted
        max_bin: usize,
    },

    /// A value/count table does not consist of exactly two rows.
    #[error("Value table needs two rows (values and counts), got {0}")]
    RowCount(usize),

    /// The two rows of a value/count table differ in length.
    #[error("Value table rows differ in length: {values} values, {counts} counts")]
    RowLengthMismatch {
        /// Number of entries in the value row
        values: usize,
        /// Number of entries in the count row
        counts: usize,
    },

    /// Every weight is zero.
    #[error("All weights are zero")]
    ZeroMass,
}

/// Configuration errors for the fitter and the decomposer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A setting lies outside its valid range.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Setting name
        name: &'static str,
        /// Description of the invalid value
        value: String,
    },

    /// Unknown decomposition component family.
    #[error("Unknown component family: {0}. Must be one of: lognormal, gamma")]
    UnknownComponentFamily(String),

    /// TOML text could not be parsed.
    #[error("Configuration parse error: {0}")]
    Parse(String),
}
