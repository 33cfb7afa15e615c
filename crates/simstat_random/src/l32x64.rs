//! L32X64Mix generator from the LXM family.

use simstat_core::traits::RandomSource;

use crate::generator::{impl_rng_core, Algorithm, BitGenerator};
use crate::seed::Seed;
use crate::xoroshiro64::NON_ZERO_STATE;

/// Multiplier of the 32-bit LCG sub-generator.
const LCG_MULTIPLIER: u32 = 0xADB4_A92D;
/// Multiplier of the output mixing function.
const MIX_MULTIPLIER: u32 = 0xD36D_884B;

/// L32X64Mix: a 32-bit LCG and a xoroshiro64 sub-generator combined by a
/// mixing finaliser.
///
/// State words, in seeding order:
/// 1. LCG increment `a` (always odd)
/// 2. LCG state `s`
/// 3. xoroshiro64 word `x0`
/// 4. xoroshiro64 word `x1`
///
/// Each step outputs `mix(s + x0)` from the old state, then advances the
/// LCG (`s = 0xADB4A92D · s + a`) and the xoroshiro64 words.
///
/// # Examples
///
/// ```rust
/// use simstat_core::traits::RandomSource;
/// use simstat_random::L32X64Mix;
///
/// let mut rng = L32X64Mix::new([1, 2, 3, 4]);
/// assert_eq!(rng.next_bits(32), 0xdd99_4d05);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct L32X64Mix {
    increment: u32,
    lcg: u32,
    x0: u32,
    x1: u32,
}

impl L32X64Mix {
    /// Creates a generator from explicit state words `[a, s, x0, x1]`.
    ///
    /// The increment is forced odd for full LCG period; an all-zero
    /// xoroshiro64 part is replaced with a non-zero constant.
    pub fn new(state: [u32; 4]) -> Self {
        let [x0, x1] = if state[2] == 0 && state[3] == 0 {
            NON_ZERO_STATE
        } else {
            [state[2], state[3]]
        };
        Self {
            increment: state[0] | 1,
            lcg: state[1],
            x0,
            x1,
        }
    }

    /// Creates a generator from any seed form.
    pub fn from_seed(seed: Seed<'_>) -> Self {
        let mut words = [0_u32; 4];
        seed.fill_words(&mut words);
        Self::new(words)
    }

    #[inline]
    fn step(&mut self) -> u32 {
        let s0 = self.x0;
        let z = mix(self.lcg.wrapping_add(s0));

        self.lcg = LCG_MULTIPLIER
            .wrapping_mul(self.lcg)
            .wrapping_add(self.increment);

        let s1 = self.x1 ^ s0;
        self.x0 = s0.rotate_left(26) ^ s1 ^ (s1 << 9);
        self.x1 = s1.rotate_left(13);

        z
    }
}

/// Two rounds of multiply-xorshift.
#[inline]
fn mix(x: u32) -> u32 {
    let x = (x ^ (x >> 16)).wrapping_mul(MIX_MULTIPLIER);
    let x = (x ^ (x >> 16)).wrapping_mul(MIX_MULTIPLIER);
    x ^ (x >> 16)
}

impl RandomSource for L32X64Mix {
    #[inline]
    fn next_bits(&mut self, bits: u32) -> u32 {
        debug_assert!((1..=32).contains(&bits));
        self.step() >> (32 - bits)
    }
}

impl BitGenerator for L32X64Mix {
    fn set_seed(&mut self, seed: Seed<'_>) {
        *self = Self::from_seed(seed);
    }

    fn algorithm(&self) -> Option<Algorithm> {
        Some(Algorithm::L32X64Mix)
    }
}

impl_rng_core!(L32X64Mix);
