//! Core error types.
//!
//! This module provides:
//! - `error`: Structured error types for solver and distribution operations
//!
//! # Re-exports
//!
//! For convenience, [`SolverError`] and [`DistributionError`] are re-exported
//! at this module level.

pub mod error;

pub use error::{DistributionError, SolverError};
