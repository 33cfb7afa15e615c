//! Platform generator: the fast unseedable per-thread default.

use rand::rngs::ThreadRng;
use rand::{Rng, RngCore};
use rand_distr::{Distribution, StandardNormal};
use simstat_core::traits::RandomSource;

use crate::generator::{Algorithm, BitGenerator};
use crate::seed::Seed;

/// Wrapper around the platform's per-thread generator.
///
/// Reseeding is a no-op, so streams are not reproducible. Normal variates
/// come from the Ziggurat sampler of `rand_distr::StandardNormal` instead of
/// the polar transform every other generator uses.
///
/// # Examples
///
/// ```rust
/// use simstat_core::traits::RandomSource;
/// use simstat_random::PlatformGenerator;
///
/// let mut rng = PlatformGenerator::new();
/// let u = rng.next_double();
/// assert!((0.0..1.0).contains(&u));
/// ```
#[derive(Debug, Clone)]
pub struct PlatformGenerator {
    inner: ThreadRng,
}

impl PlatformGenerator {
    /// Handle to the calling thread's platform generator.
    pub fn new() -> Self {
        Self {
            inner: rand::thread_rng(),
        }
    }
}

impl Default for PlatformGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for PlatformGenerator {
    #[inline]
    fn next_bits(&mut self, bits: u32) -> u32 {
        debug_assert!((1..=32).contains(&bits));
        self.inner.next_u32() >> (32 - bits)
    }

    #[inline]
    fn next_double(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    #[inline]
    fn next_gaussian(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }
}

impl BitGenerator for PlatformGenerator {
    fn set_seed(&mut self, _seed: Seed<'_>) {}

    fn algorithm(&self) -> Option<Algorithm> {
        None
    }
}
