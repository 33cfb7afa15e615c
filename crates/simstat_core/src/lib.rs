//! # simstat_core: Mathematical Foundation for Simulation Statistics
//!
//! ## Layer 1 (Foundation) Role
//!
//! simstat_core serves as the bottom layer of the workspace, providing:
//! - Root-finding solvers: bisection and Brent (`math::solvers`)
//! - Special functions: log-gamma, incomplete gamma, error function, normal
//!   and chi-squared distribution functions (`math::special`)
//! - The distribution capability contract (`traits::ContinuousDistribution`)
//! - The random bit-stream contract (`traits::RandomSource`)
//! - Error types: `SolverError`, `DistributionError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other simstat_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Structured error types
//!
//! ## Usage Examples
//!
//! ```rust
//! use simstat_core::math::solvers::{BisectionSolver, SolverConfig};
//! use simstat_core::math::special::{norm_cdf, inverse_norm_cdf};
//!
//! // Solve x² - 2 = 0 by bisection
//! let solver = BisectionSolver::new(SolverConfig::new(1e-9, 100));
//! let root = solver.solve(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-8);
//!
//! // Normal distribution functions
//! let p = norm_cdf(1.0);
//! assert!((inverse_norm_cdf(p) - 1.0).abs() < 1e-9);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;
