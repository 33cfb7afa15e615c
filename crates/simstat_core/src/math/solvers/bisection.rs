//! Interval-halving root finder.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Bisection root finder.
///
/// Each step evaluates `f` at the lower end and the midpoint and keeps the
/// half on which the sign changes. When both have the same sign the lower
/// end moves up, so a function with no root in the interval converges to
/// the upper end instead of failing. The result is the midpoint of the
/// final interval once it is narrower than `tolerance`.
///
/// # Example
///
/// ```
/// use simstat_core::math::solvers::{BisectionSolver, SolverConfig};
///
/// let solver = BisectionSolver::new(SolverConfig::bisection());
/// let root = solver.solve(|x: f64| x.exp() - 2.0, 0.0, 1.0).unwrap();
/// assert!((root - 2.0_f64.ln()).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct BisectionSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> BisectionSolver<T> {
    /// Create a new bisection solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with [`SolverConfig::bisection`] settings.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::bisection())
    }

    /// Narrow `[min, max]` down to a root of `f`.
    ///
    /// # Arguments
    ///
    /// * `f` - Function to find a root of
    /// * `min` - Lower end of the search interval
    /// * `max` - Upper end of the search interval
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Midpoint of the final interval
    /// * `Err(SolverError::MaxIterationsExceeded)` - Interval still wider than
    ///   the tolerance after `max_iterations` halvings
    /// * `Err(SolverError::NumericalInstability)` - Non-finite interval ends
    pub fn solve<F>(&self, f: F, min: T, max: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        if !min.is_finite() || !max.is_finite() {
            return Err(SolverError::NumericalInstability(
                "bisection interval must be finite".to_string(),
            ));
        }
        let (mut lo, mut hi) = if min <= max { (min, max) } else { (max, min) };
        let two = T::one() + T::one();

        for _ in 0..self.config.max_iterations {
            let mid = lo + (hi - lo) / two;
            let f_lo = f(lo);
            let f_mid = f(mid);

            if f_mid * f_lo > T::zero() {
                lo = mid;
            } else {
                hi = mid;
            }

            if (hi - lo).abs() <= self.config.tolerance {
                return Ok(lo + (hi - lo) / two);
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_find_sqrt_2() {
        let solver = BisectionSolver::with_defaults();
        let root = solver.solve(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
        assert_abs_diff_eq!(root, std::f64::consts::SQRT_2, epsilon = 1e-6);
    }

    #[test]
    fn test_reversed_interval() {
        let solver = BisectionSolver::with_defaults();
        let root = solver.solve(|x: f64| x - 3.0, 10.0, 0.0).unwrap();
        assert_abs_diff_eq!(root, 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_no_sign_change_drifts_to_upper_end() {
        let solver = BisectionSolver::with_defaults();
        let root = solver.solve(|x: f64| x + 1.0, 0.0, 10.0).unwrap();
        assert_abs_diff_eq!(root, 10.0, epsilon = 1e-5);
    }

    #[test]
    fn test_root_at_lower_end() {
        let solver = BisectionSolver::with_defaults();
        let root = solver.solve(|x: f64| x, 0.0, 50.0).unwrap();
        assert_abs_diff_eq!(root, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_wide_interval_within_iteration_budget() {
        // 10 × 5000 bins is the widest interval the decomposer uses
        let solver = BisectionSolver::with_defaults();
        let root = solver.solve(|x: f64| x - 1234.5, 0.0, 50_000.0).unwrap();
        assert_abs_diff_eq!(root, 1234.5, epsilon = 1e-6);
    }

    #[test]
    fn test_max_iterations_exceeded() {
        let solver = BisectionSolver::new(SolverConfig::new(1e-12, 5));
        match solver.solve(|x: f64| x - 0.3, 0.0, 1.0) {
            Err(SolverError::MaxIterationsExceeded { iterations }) => assert_eq!(iterations, 5),
            other => panic!("Expected MaxIterationsExceeded, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_interval() {
        let solver = BisectionSolver::with_defaults();
        let result = solver.solve(|x: f64| x, 0.0, f64::INFINITY);
        assert!(matches!(result, Err(SolverError::NumericalInstability(_))));
    }
}
