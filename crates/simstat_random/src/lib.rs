//! # simstat_random: Pseudo-Random Bit Streams for Simulation
//!
//! ## Layer 2 Role
//!
//! This crate provides the generators behind every random variate in a
//! simulation run. It depends only on `simstat_core`, whose
//! [`RandomSource`] trait all generators implement.
//!
//! ## Algorithms
//!
//! | Type | State | Notes |
//! |------|-------|-------|
//! | [`Lcg48`] | one 48-bit word | drand48-compatible |
//! | [`XoRoShiRo64StarStar`] | two 32-bit words | `**` output scrambler |
//! | [`XoRoShiRo64Star`] | two 32-bit words | `*` output scrambler |
//! | [`L32X64Mix`] | four 32-bit words | LCG + xoroshiro64 with a mixing finaliser |
//! | [`PlatformGenerator`] | platform-owned | fast, unseedable, Ziggurat normals |
//!
//! All seeded generators also implement [`rand::RngCore`], so they can
//! drive any `rand_distr` distribution.
//!
//! ## Thread Policy
//!
//! Generators are never shared between threads. [`ThreadLocalGenerators`]
//! gives each thread its own lazily created instance according to a
//! [`GeneratorPolicy`]; [`RandomStream`] is the explicit per-worker context
//! for deterministic replay.
//!
//! ## Usage Example
//!
//! ```rust
//! use simstat_core::traits::RandomSource;
//! use simstat_random::{Algorithm, BitGenerator, Lcg48, Seed};
//!
//! let mut rng = Lcg48::new(1);
//! assert!((rng.next_double() - 0.041_630_344_771_878_214).abs() < 1e-15);
//!
//! // Same algorithm through the factory
//! let mut boxed = Algorithm::Lcg48.create(Seed::Long(1));
//! assert_eq!(boxed.next_bits(31), 89_400_484);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod error;
mod generator;
mod l32x64;
mod lcg48;
mod platform;
mod seed;
mod stream;
mod thread_local;
mod xoroshiro64;

pub use error::RandomError;
pub use generator::{Algorithm, BitGenerator};
pub use l32x64::L32X64Mix;
pub use lcg48::Lcg48;
pub use platform::PlatformGenerator;
pub use seed::{Seed, SplitMix64};
pub use stream::RandomStream;
pub use self::thread_local::{GeneratorPolicy, PooledSource, ThreadLocalGenerators};
pub use xoroshiro64::{XoRoShiRo64Star, XoRoShiRo64StarStar};

pub use simstat_core::traits::RandomSource;
