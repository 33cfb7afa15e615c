//! Brent's method root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Brent's method root finder.
///
/// Keeps a bracket `[b, c]` with a sign change and, on each step, tries
/// inverse quadratic interpolation (or the secant step when only two
/// distinct points are known). The interpolated step is accepted only when
/// it stays well inside the bracket and shrinks faster than the step before
/// last; otherwise the step is a bisection.
///
/// # Example
///
/// ```
/// use simstat_core::math::solvers::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::default());
/// let root = solver.find_root(|x: f64| x.cos() - x, 0.0, 1.0).unwrap();
/// assert!((root.cos() - root).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct BrentSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> BrentSolver<T> {
    /// Create a new Brent solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    /// Find a root of `f` in the bracket `[a, b]`.
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Root where `|f(x)| < tolerance` or the bracket has collapsed
    /// * `Err(SolverError::NoBracket)` - `f(a)` and `f(b)` have the same sign
    /// * `Err(SolverError::MaxIterationsExceeded)` - Failed to converge
    pub fn find_root<F>(&self, f: F, a: T, b: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        let mut a = a;
        let mut b = b;
        let mut fa = f(a);
        let mut fb = f(b);

        if fa == T::zero() {
            return Ok(a);
        }
        if fb == T::zero() {
            return Ok(b);
        }
        if fa * fb > T::zero() || fa.is_nan() || fb.is_nan() {
            return Err(SolverError::NoBracket {
                a: a.to_f64().unwrap_or(f64::NAN),
                b: b.to_f64().unwrap_or(f64::NAN),
            });
        }

        let zero = T::zero();
        let one = T::one();
        let two = one + one;
        let three = two + one;
        let half = one / two;
        let tolerance = self.config.tolerance;

        let mut c = b;
        let mut fc = fb;
        let mut d = b - a;
        let mut e = d;

        for _ in 0..self.config.max_iterations {
            if (fb > zero) == (fc > zero) {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let tol1 = two * T::epsilon() * b.abs() + half * tolerance;
            let xm = half * (c - b);
            if xm.abs() <= tol1 || fb.abs() < tolerance {
                return Ok(b);
            }

            if e.abs() >= tol1 && fa.abs() > fb.abs() {
                let s = fb / fa;
                let (mut p, mut q) = if a == c {
                    (two * xm * s, one - s)
                } else {
                    let q = fa / fc;
                    let r = fb / fc;
                    (
                        s * (two * xm * q * (q - r) - (b - a) * (r - one)),
                        (q - one) * (r - one) * (s - one),
                    )
                };
                if p > zero {
                    q = -q;
                }
                p = p.abs();

                let bound = (three * xm * q - (tol1 * q).abs()).min((e * q).abs());
                if two * p < bound {
                    e = d;
                    d = p / q;
                } else {
                    d = xm;
                    e = d;
                }
            } else {
                d = xm;
                e = d;
            }

            a = b;
            fa = fb;
            b = if d.abs() > tol1 {
                b + d
            } else if xm > zero {
                b + tol1
            } else {
                b - tol1
            };
            fb = f(b);
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }

    /// Expand `[a, b]` geometrically until it brackets a root of `f`, then
    /// solve.
    ///
    /// The upper end is doubled away from `a` up to `max_expansions` times.
    /// Used to invert CDFs with unbounded support.
    pub fn find_root_expanding<F>(
        &self,
        f: F,
        a: T,
        b: T,
        max_expansions: usize,
    ) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        let two = T::one() + T::one();
        let fa = f(a);
        let mut hi = b;
        for _ in 0..max_expansions {
            if fa * f(hi) <= T::zero() {
                break;
            }
            hi = a + (hi - a) * two;
        }
        self.find_root(f, a, hi)
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}
