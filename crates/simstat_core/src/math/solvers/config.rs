//! Solver configuration types.

use num_traits::Float;

/// Configuration for root-finding algorithms.
///
/// Provides common settings shared across all solver implementations,
/// including convergence tolerance and iteration limits.
///
/// # Type Parameters
///
/// * `T` - Floating-point type for tolerance (e.g., `f64`)
///
/// # Example
///
/// ```
/// use simstat_core::math::solvers::SolverConfig;
///
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert!(config.tolerance < 1e-8);
///
/// // Settings used when inverting the mode/mean relation
/// let bisection: SolverConfig<f64> = SolverConfig::bisection();
/// assert_eq!(bisection.max_iterations, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig<T: Float> {
    /// Convergence tolerance.
    ///
    /// Bisection stops once the interval is narrower than this value;
    /// Brent stops once `|f(x)|` or the half-bracket falls below it.
    pub tolerance: T,

    /// Maximum number of iterations before giving up with
    /// `SolverError::MaxIterationsExceeded`.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// Default values:
    /// - `tolerance`: 1e-10
    /// - `max_iterations`: 100
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-10).unwrap_or_else(T::epsilon),
            max_iterations: 100,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a new configuration with specified values.
    ///
    /// # Arguments
    ///
    /// * `tolerance` - Convergence tolerance (must be positive)
    /// * `max_iterations` - Maximum iteration count (must be > 0)
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0` or `max_iterations == 0`.
    ///
    /// # Example
    ///
    /// ```
    /// use simstat_core::math::solvers::SolverConfig;
    ///
    /// let config = SolverConfig::new(1e-12, 200);
    /// assert_eq!(config.max_iterations, 200);
    /// ```
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        assert!(tolerance > T::zero(), "tolerance must be positive");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Absolute accuracy 1e-6 with at most 100 halvings.
    ///
    /// These are the settings the decomposer uses to estimate component
    /// means; changing them changes the decomposition.
    pub fn bisection() -> Self {
        Self {
            tolerance: T::from(1e-6).unwrap_or_else(T::epsilon),
            max_iterations: 100,
        }
    }

    /// Tight tolerance (1e-14) and 500 iterations.
    pub fn high_precision() -> Self {
        Self {
            tolerance: T::from(1e-14).unwrap_or_else(T::epsilon),
            max_iterations: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config: SolverConfig<f64> = SolverConfig::default();
        assert!((config.tolerance - 1e-10).abs() < 1e-15);
        assert_eq!(config.max_iterations, 100);
    }

    #[test]
    fn test_bisection_config() {
        let config: SolverConfig<f64> = SolverConfig::bisection();
        assert!((config.tolerance - 1e-6).abs() < 1e-18);
        assert_eq!(config.max_iterations, 100);
    }

    #[test]
    fn test_high_precision_config() {
        let config: SolverConfig<f64> = SolverConfig::high_precision();
        assert!(config.tolerance < 1e-12);
        assert_eq!(config.max_iterations, 500);
    }

    #[test]
    #[should_panic(expected = "tolerance must be positive")]
    fn test_new_config_zero_tolerance_panics() {
        let _: SolverConfig<f64> = SolverConfig::new(0.0, 100);
    }

    #[test]
    #[should_panic(expected = "max_iterations must be > 0")]
    fn test_new_config_zero_iterations_panics() {
        let _: SolverConfig<f64> = SolverConfig::new(1e-10, 0);
    }

    #[test]
    fn test_config_with_f32() {
        let config: SolverConfig<f32> = SolverConfig::bisection();
        assert!(config.tolerance > 0.0);
        assert_eq!(config.max_iterations, 100);
    }
}
