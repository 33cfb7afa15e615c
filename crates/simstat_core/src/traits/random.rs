//! Uniform bit-stream contract shared by every generator.
//!
//! A generator only has to produce bits ([`RandomSource::next_bits`]); the
//! derived draws (doubles, bounded integers, longs, booleans, Gaussians) are
//! provided methods, so every algorithm yields them the same way from its
//! bit stream.

use std::f64::consts::PI;

/// 2^-53, the spacing of doubles in [0.5, 1).
const DOUBLE_UNIT: f64 = 1.0 / (1u64 << 53) as f64;

/// Source of uniformly distributed random bits.
///
/// The trait is object safe; distributions sample from
/// `&mut dyn RandomSource`.
///
/// # Examples
///
/// ```
/// use simstat_core::traits::RandomSource;
///
/// /// Counter that returns the same word every time.
/// struct Constant(u32);
///
/// impl RandomSource for Constant {
///     fn next_bits(&mut self, bits: u32) -> u32 {
///         self.0 >> (32 - bits)
///     }
/// }
///
/// let mut source = Constant(0x8000_0000);
/// assert_eq!(source.next_bits(1), 1);
/// assert!(source.next_boolean());
/// let u = source.next_double();
/// assert!((0.0..1.0).contains(&u));
/// ```
pub trait RandomSource {
    /// Returns the top `bits` bits (1..=32) of the next state-advance step,
    /// right-aligned in a `u32`.
    fn next_bits(&mut self, bits: u32) -> u32;

    /// Next uniform double in `[0, 1)`.
    ///
    /// The default joins a 26-bit and a 27-bit draw into a 53-bit mantissa.
    fn next_double(&mut self) -> f64 {
        let high = u64::from(self.next_bits(26)) << 27;
        let low = u64::from(self.next_bits(27));
        (high + low) as f64 * DOUBLE_UNIT
    }

    /// Uniform integer in `[0, bound)`.
    ///
    /// Powers of two take the high bits of a 31-bit draw; other bounds
    /// reject the draws that would bias the remainder.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is 0 or larger than `i32::MAX`.
    fn next_int(&mut self, bound: u32) -> u32 {
        assert!(
            bound > 0 && bound <= i32::MAX as u32,
            "bound must be in [1, i32::MAX]"
        );
        if bound.is_power_of_two() {
            return ((u64::from(bound) * u64::from(self.next_bits(31))) >> 31) as u32;
        }
        loop {
            let bits = self.next_bits(31);
            let value = bits % bound;
            if i64::from(bits) - i64::from(value) + i64::from(bound - 1) <= i64::from(i32::MAX) {
                return value;
            }
        }
    }

    /// Uniform 32-bit signed integer.
    fn next_int_unbounded(&mut self) -> i32 {
        self.next_bits(32) as i32
    }

    /// Uniform 64-bit signed integer built from two 32-bit draws.
    fn next_long(&mut self) -> i64 {
        let high = i64::from(self.next_bits(32) as i32);
        let low = i64::from(self.next_bits(32) as i32);
        (high << 32).wrapping_add(low)
    }

    /// Fair coin.
    fn next_boolean(&mut self) -> bool {
        self.next_bits(1) != 0
    }

    /// Standard normal variate, `cos(2π·U1)·sqrt(-2·ln U2)`.
    ///
    /// `U2` is redrawn while it is exactly zero. Generators with a faster
    /// built-in normal override this.
    fn next_gaussian(&mut self) -> f64 {
        let u1 = self.next_double();
        let mut u2 = self.next_double();
        while u2 == 0.0 {
            u2 = self.next_double();
        }
        (2.0 * PI * u1).cos() * (-2.0 * u2.ln()).sqrt()
    }

    /// Fills `buffer` with uniform doubles in `[0, 1)`.
    fn fill_uniform(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.next_double();
        }
    }

    /// Fills `buffer` with standard normal variates.
    fn fill_gaussian(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.next_gaussian();
        }
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_bits(&mut self, bits: u32) -> u32 {
        (**self).next_bits(bits)
    }

    fn next_double(&mut self) -> f64 {
        (**self).next_double()
    }

    fn next_gaussian(&mut self) -> f64 {
        (**self).next_gaussian()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_bits(&mut self, bits: u32) -> u32 {
        (**self).next_bits(bits)
    }

    fn next_double(&mut self) -> f64 {
        (**self).next_double()
    }

    fn next_gaussian(&mut self) -> f64 {
        (**self).next_gaussian()
    }
}
