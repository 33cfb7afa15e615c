//! Bracketing root-finding solvers.
//!
//! Both solvers work on a closed interval and never need derivatives:
//!
//! - [`BisectionSolver`]: Halves the interval on every step. It does not
//!   require a sign change across the initial interval; when there is none
//!   it drifts towards one end and returns that end's midpoint. Used by the
//!   multi-modal decomposer to invert the mode/mean relation.
//! - [`BrentSolver`]: Inverse quadratic interpolation with a bisection
//!   fallback. Requires a valid bracket. Used for numerical CDF inversion
//!   and moment matching.
//!
//! ## Configuration
//!
//! Both solvers use [`SolverConfig`] for configuring:
//! - `tolerance`: Convergence tolerance (default: 1e-10)
//! - `max_iterations`: Maximum iteration count (default: 100)
//!
//! ## Examples
//!
//! ```
//! use simstat_core::math::solvers::{BrentSolver, SolverConfig};
//!
//! let solver = BrentSolver::new(SolverConfig::default());
//!
//! // Solve x³ - x - 2 = 0 in bracket [1, 2]
//! let f = |x: f64| x * x * x - x - 2.0;
//! let root = solver.find_root(f, 1.0, 2.0).unwrap();
//! assert!(f(root).abs() < 1e-9);
//! ```

mod bisection;
mod brent;
mod config;

pub use bisection::BisectionSolver;
pub use brent::BrentSolver;
pub use config::SolverConfig;
