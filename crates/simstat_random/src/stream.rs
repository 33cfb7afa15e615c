//! Explicit per-worker random stream.

use simstat_core::traits::RandomSource;

use crate::generator::{Algorithm, BitGenerator};
use crate::seed::Seed;

/// A seeded generator owned by one worker.
///
/// Worker `i` of a run seeded with `base` uses `base + i`, the same
/// derivation [`ThreadLocalGenerators`](crate::ThreadLocalGenerators) uses,
/// so a single-threaded replay of worker `i` reproduces its variates
/// exactly.
///
/// # Examples
///
/// ```rust
/// use simstat_core::traits::RandomSource;
/// use simstat_random::{Algorithm, RandomStream};
///
/// let mut worker_3 = RandomStream::for_worker(Algorithm::L32X64Mix, 1000, 3);
/// let mut replay = RandomStream::new(Algorithm::L32X64Mix, 1003);
/// assert_eq!(worker_3.next_double(), replay.next_double());
/// ```
#[derive(Debug)]
pub struct RandomStream {
    generator: Box<dyn BitGenerator + Send>,
    seed: i64,
}

impl RandomStream {
    /// Stream of `algorithm` seeded with `seed`.
    pub fn new(algorithm: Algorithm, seed: i64) -> Self {
        Self {
            generator: algorithm.create(Seed::Long(seed)),
            seed,
        }
    }

    /// Stream for worker `worker` of a run seeded with `base_seed`.
    pub fn for_worker(algorithm: Algorithm, base_seed: i64, worker: usize) -> Self {
        Self::new(algorithm, base_seed.wrapping_add(worker as i64))
    }

    /// The scalar seed this stream was last seeded with.
    #[inline]
    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// Algorithm of the underlying generator.
    pub fn algorithm(&self) -> Option<Algorithm> {
        self.generator.algorithm()
    }

    /// Restarts the stream from `seed`.
    pub fn reseed(&mut self, seed: i64) {
        self.generator.set_seed(Seed::Long(seed));
        self.seed = seed;
    }
}

impl RandomSource for RandomStream {
    #[inline]
    fn next_bits(&mut self, bits: u32) -> u32 {
        self.generator.next_bits(bits)
    }

    #[inline]
    fn next_double(&mut self) -> f64 {
        self.generator.next_double()
    }

    #[inline]
    fn next_gaussian(&mut self) -> f64 {
        self.generator.next_gaussian()
    }
}
