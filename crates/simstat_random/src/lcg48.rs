//! 48-bit linear congruential generator (drand48 family).

use simstat_core::traits::RandomSource;

use crate::generator::{impl_rng_core, Algorithm, BitGenerator};
use crate::seed::Seed;

const MULTIPLIER: u64 = 0x5_DEEC_E66D;
const INCREMENT: u64 = 0xB;
const MASK: u64 = (1 << 48) - 1;
/// Low 16 bits of the state after seeding.
const SEED_LOW_BITS: u64 = 0x330E;
const TWO_POW_48: f64 = (1_u64 << 48) as f64;

/// drand48-compatible linear congruential generator.
///
/// `state = (state · 0x5DEECE66D + 0xB) mod 2^48`. Seeding sets the upper
/// 32 bits of the state from the low 32 bits of the seed and the lower 16
/// bits to `0x330E`, so a given seed reproduces the POSIX `srand48` stream
/// bit for bit.
///
/// # Examples
///
/// ```rust
/// use simstat_core::traits::RandomSource;
/// use simstat_random::Lcg48;
///
/// let mut rng = Lcg48::new(1);
/// // lrand48() after srand48(1)
/// assert_eq!(rng.next_bits(31), 89_400_484);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg48 {
    state: u64,
}

impl Lcg48 {
    /// Creates a generator seeded like `srand48(seed)`.
    pub fn new(seed: i64) -> Self {
        Self {
            state: Self::scramble(seed),
        }
    }

    /// Current 48-bit state.
    #[inline]
    pub fn state(&self) -> u64 {
        self.state
    }

    fn scramble(seed: i64) -> u64 {
        (((seed as u64) << 16) + SEED_LOW_BITS) & MASK
    }

    #[inline]
    fn advance(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT)
            & MASK;
        self.state
    }
}

impl RandomSource for Lcg48 {
    #[inline]
    fn next_bits(&mut self, bits: u32) -> u32 {
        debug_assert!((1..=32).contains(&bits));
        (self.advance() >> (48 - bits)) as u32
    }

    /// `state / 2^48`, one state step per double (`drand48`).
    #[inline]
    fn next_double(&mut self) -> f64 {
        self.advance() as f64 / TWO_POW_48
    }
}

impl BitGenerator for Lcg48 {
    fn set_seed(&mut self, seed: Seed<'_>) {
        self.state = Self::scramble(seed.as_long());
    }

    fn algorithm(&self) -> Option<Algorithm> {
        Some(Algorithm::Lcg48)
    }
}

impl_rng_core!(Lcg48);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drand48_reference_seed_1() {
        let mut rng = Lcg48::new(1);
        assert_eq!(rng.next_double(), 0.041_630_344_771_878_214);
        assert_eq!(rng.next_double(), 0.454_492_444_728_629_15);
        assert_eq!(rng.next_double(), 0.834_817_218_166_914_9);
    }

    #[test]
    fn test_state_sequence_seed_1() {
        let mut rng = Lcg48::new(1);
        assert_eq!(rng.state(), 0x1_330E);
        rng.next_double();
        assert_eq!(rng.state(), 0xaa8_4949_5101);
        rng.next_double();
        assert_eq!(rng.state(), 0x7459_9dea_6378);
        rng.next_double();
        assert_eq!(rng.state(), 0xd5b6_94ca_2a23);
    }

    #[test]
    fn test_lrand48_reference_seed_1() {
        let mut rng = Lcg48::new(1);
        assert_eq!(rng.next_bits(31), 89_400_484);
        assert_eq!(rng.next_bits(31), 976_015_093);
        assert_eq!(rng.next_bits(31), 1_792_756_325);
    }

    #[test]
    fn test_other_reference_seeds() {
        let mut zero = Lcg48::new(0);
        assert_eq!(zero.next_double(), 0.170_828_036_106_289_72);
        assert_eq!(zero.next_double(), 0.749_901_980_484_963_8);

        let mut answer = Lcg48::new(42);
        assert_eq!(answer.next_double(), 0.744_525_000_061_006_6);
        assert_eq!(answer.next_double(), 0.342_701_478_718_908);
    }

    #[test]
    fn test_reseed_restarts_sequence() {
        let mut rng = Lcg48::new(5);
        let first: Vec<f64> = (0..5).map(|_| rng.next_double()).collect();
        rng.set_seed(Seed::Int(5));
        let second: Vec<f64> = (0..5).map(|_| rng.next_double()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_only_low_32_seed_bits_matter() {
        let mut a = Lcg48::new(1);
        let mut b = Lcg48::new(1 + (1_i64 << 32));
        assert_eq!(a.next_bits(32), b.next_bits(32));
    }
}
