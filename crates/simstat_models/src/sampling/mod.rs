//! Variate generation helpers.
//!
//! Every distribution draws its own variates through
//! [`ContinuousDistribution::sample`]; this module holds the shared
//! algorithms behind some of those implementations and the
//! non-negativity wrapper used for durations in a simulation.
//!
//! # Examples
//!
//! ```rust
//! use simstat_models::distributions::Normal;
//! use simstat_models::random_non_negative;
//! use simstat_random::Lcg48;
//!
//! let service_time = Normal::new(1.0, 2.0).unwrap();
//! let mut rng = Lcg48::new(42);
//! for _ in 0..1000 {
//!     assert!(random_non_negative(&service_time, &mut rng) >= 0.0);
//! }
//! ```

pub mod gamma;

use simstat_core::traits::{ContinuousDistribution, RandomSource};
use tracing::trace;

/// Number of draws [`random_non_negative`] makes before giving up.
pub const MAX_NON_NEGATIVE_ATTEMPTS: usize = 10;

/// A non-negative variate from `distribution`.
///
/// Negative draws are discarded and redrawn. After
/// [`MAX_NON_NEGATIVE_ATTEMPTS`] consecutive negative draws the result is
/// `0.0`.
pub fn random_non_negative(
    distribution: &dyn ContinuousDistribution,
    rng: &mut dyn RandomSource,
) -> f64 {
    for _ in 0..MAX_NON_NEGATIVE_ATTEMPTS {
        let x = distribution.sample(rng);
        if x >= 0.0 {
            return x;
        }
    }
    trace!(
        family = distribution.name(),
        attempts = MAX_NON_NEGATIVE_ATTEMPTS,
        "no non-negative draw, returning 0"
    );
    0.0
}

/// `count` variates from `distribution`.
pub fn sample_vec(
    distribution: &dyn ContinuousDistribution,
    rng: &mut dyn RandomSource,
    count: usize,
) -> Vec<f64> {
    let mut values = vec![0.0; count];
    distribution.sample_into(rng, &mut values);
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Distribution whose `sample` replays a fixed list.
    #[derive(Debug)]
    struct Scripted {
        values: Vec<f64>,
        next: std::sync::atomic::AtomicUsize,
    }

    impl Scripted {
        fn new(values: Vec<f64>) -> Self {
            Self {
                values,
                next: std::sync::atomic::AtomicUsize::new(0),
            }
        }

        fn draws(&self) -> usize {
            self.next.load(std::sync::atomic::Ordering::Relaxed)
        }
    }

    impl ContinuousDistribution for Scripted {
        fn name(&self) -> &'static str {
            "Scripted"
        }
        fn density(&self, _x: f64) -> f64 {
            0.0
        }
        fn cdf(&self, _x: f64) -> f64 {
            0.0
        }
        fn inverse_cdf(&self, _p: f64) -> f64 {
            0.0
        }
        fn mean(&self) -> f64 {
            0.0
        }
        fn variance(&self) -> f64 {
            0.0
        }
        fn parameters(&self) -> Vec<f64> {
            Vec::new()
        }
        fn sample(&self, _rng: &mut dyn RandomSource) -> f64 {
            let i = self.next.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            self.values[i.min(self.values.len() - 1)]
        }
    }

    struct Zero;

    impl RandomSource for Zero {
        fn next_bits(&mut self, _bits: u32) -> u32 {
            0
        }
    }

    #[test]
    fn test_returns_first_non_negative() {
        let d = Scripted::new(vec![-1.0, -2.0, 3.5, 9.0]);
        assert_eq!(random_non_negative(&d, &mut Zero), 3.5);
        assert_eq!(d.draws(), 3);
    }

    #[test]
    fn test_zero_is_accepted() {
        let d = Scripted::new(vec![-1.0, 0.0]);
        assert_eq!(random_non_negative(&d, &mut Zero), 0.0);
        assert_eq!(d.draws(), 2);
    }

    #[test]
    fn test_tenth_draw_still_counts() {
        let mut values = vec![-1.0; 9];
        values.push(7.0);
        let d = Scripted::new(values);
        assert_eq!(random_non_negative(&d, &mut Zero), 7.0);
        assert_eq!(d.draws(), 10);
    }

    #[test]
    fn test_gives_up_after_ten_negative_draws() {
        let mut values = vec![-1.0; 10];
        values.push(7.0);
        let d = Scripted::new(values);
        assert_eq!(random_non_negative(&d, &mut Zero), 0.0);
        assert_eq!(d.draws(), MAX_NON_NEGATIVE_ATTEMPTS);
    }

    #[test]
    fn test_sample_vec_length() {
        let d = Scripted::new(vec![1.0]);
        assert_eq!(sample_vec(&d, &mut Zero, 5), vec![1.0; 5]);
    }
}
