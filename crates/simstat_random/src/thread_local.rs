//! Thread-local generator instancing.
//!
//! A [`ThreadLocalGenerators`] pool hands every thread its own generator,
//! created lazily on first use according to a [`GeneratorPolicy`]. The only
//! shared state is an atomic registration counter that assigns each thread
//! its stream index; after registration a thread reaches its generator
//! through the pool's per-thread slot without any locking.
//!
//! Slots belong to the pool, not to the thread, so dropping a pool frees the
//! generators of every thread that ever used it.
//!
//! # Example
//!
//! ```rust
//! use rayon::prelude::*;
//! use simstat_core::traits::RandomSource;
//! use simstat_random::{Algorithm, GeneratorPolicy, ThreadLocalGenerators};
//!
//! let pool = ThreadLocalGenerators::new(GeneratorPolicy::Seeded {
//!     algorithm: Algorithm::XoRoShiRo64StarStar,
//!     seed: 2024,
//! });
//!
//! let total: f64 = (0..1000)
//!     .into_par_iter()
//!     .map(|_| pool.with_generator(|rng| rng.next_double()))
//!     .sum();
//! assert!(total > 0.0);
//! ```

use std::cell::RefCell;
use std::sync::atomic::{AtomicUsize, Ordering};

use ::thread_local::ThreadLocal;
use simstat_core::traits::RandomSource;
use tracing::debug;

use crate::generator::{Algorithm, BitGenerator};
use crate::platform::PlatformGenerator;
use crate::seed::Seed;

/// Source of unique pool identifiers for log events.
static NEXT_POOL_ID: AtomicUsize = AtomicUsize::new(0);

/// How a pool creates each thread's generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeneratorPolicy {
    /// The platform's unseedable per-thread generator.
    #[default]
    Platform,
    /// A seeded generator; the thread registered `i`-th gets `seed + i`.
    Seeded {
        /// Algorithm of every thread's generator.
        algorithm: Algorithm,
        /// Base seed.
        seed: i64,
    },
}

/// A registered thread's generator.
///
/// The platform generator is owned by the thread itself and cannot move
/// into a pool, so its slot only records the registration.
#[derive(Debug)]
enum Slot {
    Platform,
    Seeded(Box<dyn BitGenerator + Send>),
}

/// Pool of per-thread generators.
///
/// The pool is `Send + Sync` and may be shared by reference across worker
/// threads. Generators themselves are only ever touched by their thread.
///
/// Which thread receives which stream index depends on the order of first
/// access. For reproducible multi-threaded runs assign work explicitly with
/// [`RandomStream::for_worker`](crate::RandomStream::for_worker).
#[derive(Debug)]
pub struct ThreadLocalGenerators {
    id: usize,
    policy: GeneratorPolicy,
    registered: AtomicUsize,
    slots: ThreadLocal<RefCell<Option<Slot>>>,
}

impl ThreadLocalGenerators {
    /// Creates a pool with the given policy.
    pub fn new(policy: GeneratorPolicy) -> Self {
        Self {
            id: NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed),
            policy,
            registered: AtomicUsize::new(0),
            slots: ThreadLocal::new(),
        }
    }

    /// The pool's policy.
    #[inline]
    pub fn policy(&self) -> GeneratorPolicy {
        self.policy
    }

    /// Number of threads that have created a generator so far.
    #[inline]
    pub fn registered_threads(&self) -> usize {
        self.registered.load(Ordering::Acquire)
    }

    /// Number of generators currently held for any thread.
    ///
    /// Threads that have exited keep their slot until the pool is dropped.
    pub fn live_generators(&mut self) -> usize {
        self.slots
            .iter_mut()
            .map(|slot| slot.get_mut().is_some())
            .filter(|&live| live)
            .count()
    }

    /// Runs `f` with the calling thread's generator, creating it on first
    /// access.
    ///
    /// # Panics
    ///
    /// Panics if called re-entrantly from inside `f` for the same thread.
    pub fn with_generator<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut dyn BitGenerator) -> R,
    {
        let mut slot = self.slots.get_or(|| RefCell::new(None)).borrow_mut();
        match slot.get_or_insert_with(|| self.register()) {
            Slot::Platform => f(&mut PlatformGenerator::new()),
            Slot::Seeded(generator) => f(generator.as_mut()),
        }
    }

    /// A [`RandomSource`] handle drawing from the calling thread's generator.
    pub fn source(&self) -> PooledSource<'_> {
        PooledSource { pool: self }
    }

    /// Drops the calling thread's generator; the next access registers a
    /// fresh one with a new stream index.
    pub fn release_current_thread(&self) {
        if let Some(slot) = self.slots.get() {
            slot.borrow_mut().take();
        }
    }

    fn register(&self) -> Slot {
        let index = self.registered.fetch_add(1, Ordering::AcqRel);
        match self.policy {
            GeneratorPolicy::Platform => {
                debug!(pool = self.id, index, "registered platform generator");
                Slot::Platform
            }
            GeneratorPolicy::Seeded { algorithm, seed } => {
                let thread_seed = seed.wrapping_add(index as i64);
                debug!(
                    pool = self.id,
                    index,
                    %algorithm,
                    seed = thread_seed,
                    "registered seeded generator"
                );
                Slot::Seeded(algorithm.create(Seed::Long(thread_seed)))
            }
        }
    }
}

impl Default for ThreadLocalGenerators {
    fn default() -> Self {
        Self::new(GeneratorPolicy::default())
    }
}

/// [`RandomSource`] view of a [`ThreadLocalGenerators`] pool.
///
/// Every call is forwarded to the calling thread's generator.
#[derive(Debug, Clone, Copy)]
pub struct PooledSource<'a> {
    pool: &'a ThreadLocalGenerators,
}

impl RandomSource for PooledSource<'_> {
    fn next_bits(&mut self, bits: u32) -> u32 {
        self.pool.with_generator(|rng| rng.next_bits(bits))
    }

    fn next_double(&mut self) -> f64 {
        self.pool.with_generator(|rng| rng.next_double())
    }

    fn next_gaussian(&mut self) -> f64 {
        self.pool.with_generator(|rng| rng.next_gaussian())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_lazy_registration_per_thread() {
        let pool = ThreadLocalGenerators::new(GeneratorPolicy::Seeded {
            algorithm: Algorithm::Lcg48,
            seed: 10,
        });
        assert_eq!(pool.registered_threads(), 0);

        pool.with_generator(|rng| rng.next_double());
        pool.with_generator(|rng| rng.next_double());
        assert_eq!(pool.registered_threads(), 1);
    }

    #[test]
    fn test_first_thread_uses_base_seed() {
        let pool = ThreadLocalGenerators::new(GeneratorPolicy::Seeded {
            algorithm: Algorithm::Lcg48,
            seed: 1,
        });
        let u = pool.with_generator(|rng| rng.next_double());
        assert_eq!(u, 0.041_630_344_771_878_214);
    }

    #[test]
    fn test_threads_get_distinct_streams() {
        let pool = Arc::new(ThreadLocalGenerators::new(GeneratorPolicy::Seeded {
            algorithm: Algorithm::L32X64Mix,
            seed: 99,
        }));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let pool = Arc::clone(&pool);
                thread::spawn(move || {
                    (0..4)
                        .map(|_| pool.with_generator(|rng| rng.next_bits(32)))
                        .collect::<Vec<u32>>()
                })
            })
            .collect();

        let mut streams: Vec<Vec<u32>> = handles
            .into_iter()
            .map(|h| h.join().expect("worker thread panicked"))
            .collect();
        assert_eq!(pool.registered_threads(), 4);

        streams.sort();
        streams.dedup();
        assert_eq!(streams.len(), 4);
    }

    #[test]
    fn test_pools_are_independent() {
        let policy = GeneratorPolicy::Seeded {
            algorithm: Algorithm::XoRoShiRo64StarStar,
            seed: 3,
        };
        let a = ThreadLocalGenerators::new(policy);
        let b = ThreadLocalGenerators::new(policy);
        let x = a.with_generator(|rng| rng.next_bits(32));
        let y = b.with_generator(|rng| rng.next_bits(32));
        assert_eq!(x, y);
    }

    #[test]
    fn test_release_registers_again() {
        let pool = ThreadLocalGenerators::new(GeneratorPolicy::Seeded {
            algorithm: Algorithm::Lcg48,
            seed: 0,
        });
        pool.with_generator(|rng| rng.next_bits(8));
        pool.release_current_thread();
        pool.with_generator(|rng| rng.next_bits(8));
        assert_eq!(pool.registered_threads(), 2);
    }

    #[test]
    fn test_pooled_source_draws() {
        let pool = ThreadLocalGenerators::default();
        assert_eq!(pool.policy(), GeneratorPolicy::Platform);
        let mut source = pool.source();
        let mut buffer = [0.0; 16];
        source.fill_uniform(&mut buffer);
        assert!(buffer.iter().all(|u| (0.0..1.0).contains(u)));
        assert_eq!(pool.registered_threads(), 1);
    }

    #[test]
    fn test_release_frees_slot() {
        let mut pool = ThreadLocalGenerators::new(GeneratorPolicy::Seeded {
            algorithm: Algorithm::L32X64Mix,
            seed: 5,
        });
        assert_eq!(pool.live_generators(), 0);
        pool.with_generator(|rng| rng.next_bits(8));
        assert_eq!(pool.live_generators(), 1);
        pool.release_current_thread();
        assert_eq!(pool.live_generators(), 0);
    }

    // ========================================================================
    // Pool lifetime
    // ========================================================================

    #[derive(Debug)]
    struct CountedGenerator(&'static AtomicUsize);

    impl RandomSource for CountedGenerator {
        fn next_bits(&mut self, _bits: u32) -> u32 {
            0
        }

        fn next_double(&mut self) -> f64 {
            0.0
        }

        fn next_gaussian(&mut self) -> f64 {
            0.0
        }
    }

    impl BitGenerator for CountedGenerator {
        fn set_seed(&mut self, _seed: Seed<'_>) {}

        fn algorithm(&self) -> Option<Algorithm> {
            None
        }
    }

    impl Drop for CountedGenerator {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn install_counted(pool: &ThreadLocalGenerators, dropped: &'static AtomicUsize) {
        pool.with_generator(|rng| rng.next_bits(8));
        let slot = pool.slots.get().expect("slot registered by with_generator");
        *slot.borrow_mut() = Some(Slot::Seeded(Box::new(CountedGenerator(dropped))));
    }

    #[test]
    fn test_dropped_pools_retain_nothing() {
        static DROPPED: AtomicUsize = AtomicUsize::new(0);
        let policy = GeneratorPolicy::Seeded {
            algorithm: Algorithm::XoRoShiRo64StarStar,
            seed: 17,
        };

        for _ in 0..10_000 {
            let pool = ThreadLocalGenerators::new(policy);
            install_counted(&pool, &DROPPED);
            drop(pool);
        }
        assert_eq!(DROPPED.load(Ordering::SeqCst), 10_000);
    }

    #[test]
    fn test_worker_generators_freed_with_pool() {
        static DROPPED: AtomicUsize = AtomicUsize::new(0);
        let mut pool = ThreadLocalGenerators::new(GeneratorPolicy::Seeded {
            algorithm: Algorithm::Lcg48,
            seed: 8,
        });

        thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| install_counted(&pool, &DROPPED));
            }
        });
        assert_eq!(pool.live_generators(), 4);
        assert_eq!(DROPPED.load(Ordering::SeqCst), 0);

        drop(pool);
        assert_eq!(DROPPED.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_pool_is_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ThreadLocalGenerators>();
    }
}
