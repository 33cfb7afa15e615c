//! Error types for generator selection.

use thiserror::Error;

/// Errors raised when selecting or configuring a generator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RandomError {
    /// No algorithm is known under this name.
    #[error("Unknown generator algorithm: {0}")]
    UnknownAlgorithm(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = RandomError::UnknownAlgorithm("MT19937".to_string());
        assert_eq!(err.to_string(), "Unknown generator algorithm: MT19937");
    }
}
