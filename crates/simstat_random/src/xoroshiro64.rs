//! The xoroshiro64 family: XoRoShiRo64** and XoRoShiRo64*.
//!
//! Both share the two-word xor/shift/rotate update and differ only in the
//! output scrambler.

use simstat_core::traits::RandomSource;

use crate::generator::{impl_rng_core, Algorithm, BitGenerator};
use crate::seed::Seed;

/// Replacement state for an all-zero seed.
pub(crate) const NON_ZERO_STATE: [u32; 2] = [0x9E37_79B9, 0x6A09_E667];

/// XoRoShiRo64** with 64 bits of state held as two 32-bit words.
///
/// Output `rotl(s0 · 0x9E3779BB, 5) · 5`, then the xoroshiro64 update
/// `s1 ^= s0; s0 = rotl(s0, 26) ^ s1 ^ (s1 << 9); s1 = rotl(s1, 13)`.
///
/// # Examples
///
/// ```rust
/// use simstat_core::traits::RandomSource;
/// use simstat_random::XoRoShiRo64StarStar;
///
/// let mut rng = XoRoShiRo64StarStar::new(0x012d_e1ba, 0xa5a8_18b8);
/// assert_eq!(rng.next_bits(32), 0x7ac0_0b42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XoRoShiRo64StarStar {
    s0: u32,
    s1: u32,
}

impl XoRoShiRo64StarStar {
    /// Creates a generator from explicit state words.
    ///
    /// An all-zero state is a fixed point of the update and is replaced
    /// with a non-zero constant.
    pub fn new(s0: u32, s1: u32) -> Self {
        let [s0, s1] = if s0 == 0 && s1 == 0 {
            NON_ZERO_STATE
        } else {
            [s0, s1]
        };
        Self { s0, s1 }
    }

    /// Creates a generator from any seed form.
    pub fn from_seed(seed: Seed<'_>) -> Self {
        let mut words = [0_u32; 2];
        seed.fill_words(&mut words);
        Self::new(words[0], words[1])
    }

    #[inline]
    fn step(&mut self) -> u32 {
        let s0 = advance(&mut self.s0, &mut self.s1);
        s0.wrapping_mul(MULTIPLIER).rotate_left(5).wrapping_mul(5)
    }
}

/// Multiplier of both output scramblers.
const MULTIPLIER: u32 = 0x9E37_79BB;

/// Applies the xoroshiro64 update and returns the previous `s0`.
#[inline]
fn advance(s0: &mut u32, s1: &mut u32) -> u32 {
    let old = *s0;
    let t = *s1 ^ old;
    *s0 = old.rotate_left(26) ^ t ^ (t << 9);
    *s1 = t.rotate_left(13);
    old
}

impl RandomSource for XoRoShiRo64StarStar {
    #[inline]
    fn next_bits(&mut self, bits: u32) -> u32 {
        debug_assert!((1..=32).contains(&bits));
        self.step() >> (32 - bits)
    }
}

impl BitGenerator for XoRoShiRo64StarStar {
    fn set_seed(&mut self, seed: Seed<'_>) {
        *self = Self::from_seed(seed);
    }

    fn algorithm(&self) -> Option<Algorithm> {
        Some(Algorithm::XoRoShiRo64StarStar)
    }
}

impl_rng_core!(XoRoShiRo64StarStar);

/// XoRoShiRo64* with the same state and update as
/// [`XoRoShiRo64StarStar`] but the single-multiply scrambler `s0 · 0x9E3779BB`.
///
/// The low bits of its output are weaker; [`RandomSource::next_bits`] only
/// hands out the top bits.
///
/// # Examples
///
/// ```rust
/// use simstat_core::traits::RandomSource;
/// use simstat_random::XoRoShiRo64Star;
///
/// let mut rng = XoRoShiRo64Star::new(0x012d_e1ba, 0xa5a8_18b8);
/// assert_eq!(rng.next_bits(32), 0xd72a_ccde);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XoRoShiRo64Star {
    s0: u32,
    s1: u32,
}

impl XoRoShiRo64Star {
    /// Creates a generator from explicit state words; an all-zero state is
    /// replaced with a non-zero constant.
    pub fn new(s0: u32, s1: u32) -> Self {
        let [s0, s1] = if s0 == 0 && s1 == 0 {
            NON_ZERO_STATE
        } else {
            [s0, s1]
        };
        Self { s0, s1 }
    }

    /// Creates a generator from any seed form.
    pub fn from_seed(seed: Seed<'_>) -> Self {
        let mut words = [0_u32; 2];
        seed.fill_words(&mut words);
        Self::new(words[0], words[1])
    }

    #[inline]
    fn step(&mut self) -> u32 {
        advance(&mut self.s0, &mut self.s1).wrapping_mul(MULTIPLIER)
    }
}

impl RandomSource for XoRoShiRo64Star {
    #[inline]
    fn next_bits(&mut self, bits: u32) -> u32 {
        debug_assert!((1..=32).contains(&bits));
        self.step() >> (32 - bits)
    }
}

impl BitGenerator for XoRoShiRo64Star {
    fn set_seed(&mut self, seed: Seed<'_>) {
        *self = Self::from_seed(seed);
    }

    fn algorithm(&self) -> Option<Algorithm> {
        Some(Algorithm::XoRoShiRo64Star)
    }
}

impl_rng_core!(XoRoShiRo64Star);
