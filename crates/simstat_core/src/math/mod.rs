//! Numerical building blocks.
//!
//! - [`solvers`]: Bracketing root finders (bisection, Brent)
//! - [`special`]: Special functions used by distributions and test statistics

pub mod solvers;
pub mod special;
