//! Generator contract and algorithm selection.

use std::fmt;
use std::str::FromStr;

use simstat_core::traits::RandomSource;

use crate::error::RandomError;
use crate::l32x64::L32X64Mix;
use crate::lcg48::Lcg48;
use crate::seed::Seed;
use crate::xoroshiro64::{XoRoShiRo64Star, XoRoShiRo64StarStar};

/// A reseedable bit stream.
///
/// Extends [`RandomSource`] with seeding. Instances are not shared across
/// threads; see [`ThreadLocalGenerators`](crate::ThreadLocalGenerators).
pub trait BitGenerator: RandomSource + fmt::Debug {
    /// Reinitialises the state from `seed`.
    ///
    /// Every [`Seed`] form is accepted. The platform generator ignores
    /// seeding.
    fn set_seed(&mut self, seed: Seed<'_>);

    /// The seedable algorithm behind this generator, `None` for the
    /// platform generator.
    fn algorithm(&self) -> Option<Algorithm>;
}

/// Seedable generator algorithms.
///
/// # Examples
///
/// ```rust
/// use simstat_random::{Algorithm, Seed};
///
/// let algorithm: Algorithm = "l32x64mix".parse().unwrap();
/// assert_eq!(algorithm, Algorithm::L32X64Mix);
///
/// let mut a = algorithm.create(Seed::Long(7));
/// let mut b = algorithm.create(Seed::Long(7));
/// assert_eq!(a.next_bits(32), b.next_bits(32));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// 48-bit LCG, drand48-compatible.
    Lcg48,
    /// XoRoShiRo64** with two 32-bit words of state.
    XoRoShiRo64StarStar,
    /// XoRoShiRo64*: same state update, single-multiply scrambler.
    XoRoShiRo64Star,
    /// L32X64Mix: 32-bit LCG combined with xoroshiro64.
    L32X64Mix,
}

impl Algorithm {
    /// All seedable algorithms.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Lcg48,
        Algorithm::XoRoShiRo64StarStar,
        Algorithm::XoRoShiRo64Star,
        Algorithm::L32X64Mix,
    ];

    /// Canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Lcg48 => "Lcg48",
            Algorithm::XoRoShiRo64StarStar => "XoRoShiRo64StarStar",
            Algorithm::XoRoShiRo64Star => "XoRoShiRo64Star",
            Algorithm::L32X64Mix => "L32X64Mix",
        }
    }

    /// Creates a generator of this algorithm seeded with `seed`.
    pub fn create(self, seed: Seed<'_>) -> Box<dyn BitGenerator + Send> {
        match self {
            Algorithm::Lcg48 => Box::new(Lcg48::new(seed.as_long())),
            Algorithm::XoRoShiRo64StarStar => Box::new(XoRoShiRo64StarStar::from_seed(seed)),
            Algorithm::XoRoShiRo64Star => Box::new(XoRoShiRo64Star::from_seed(seed)),
            Algorithm::L32X64Mix => Box::new(L32X64Mix::from_seed(seed)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = RandomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '*')
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "lcg48" | "lcg" | "drand48" => Ok(Algorithm::Lcg48),
            "xoroshiro64starstar" | "xoroshiro64**" | "xoroshiro64ss" => {
                Ok(Algorithm::XoRoShiRo64StarStar)
            }
            "xoroshiro64star" | "xoroshiro64*" | "xoroshiro64s" => Ok(Algorithm::XoRoShiRo64Star),
            "l32x64mix" | "l32x64" => Ok(Algorithm::L32X64Mix),
            _ => Err(RandomError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Implements `rand::RngCore` on top of [`RandomSource::next_bits`].
macro_rules! impl_rng_core {
    ($generator:ty) => {
        impl rand::RngCore for $generator {
            #[inline]
            fn next_u32(&mut self) -> u32 {
                simstat_core::traits::RandomSource::next_bits(self, 32)
            }

            #[inline]
            fn next_u64(&mut self) -> u64 {
                let high = u64::from(self.next_u32());
                (high << 32) | u64::from(self.next_u32())
            }

            fn fill_bytes(&mut self, dest: &mut [u8]) {
                for chunk in dest.chunks_mut(4) {
                    let bytes = self.next_u32().to_le_bytes();
                    chunk.copy_from_slice(&bytes[..chunk.len()]);
                }
            }

            fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
                self.fill_bytes(dest);
                Ok(())
            }
        }
    };
}

pub(crate) use impl_rng_core;
