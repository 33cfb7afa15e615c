//! Seed forms and their expansion into native state words.

/// Golden-ratio increment of SplitMix64.
const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// A seed in any of the accepted forms.
///
/// Every generator normalises all four forms into its native state words.
/// Scalar seeds are expanded with [`SplitMix64`]; arrays are copied word by
/// word, padded when short and truncated when long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seed<'a> {
    /// 32-bit scalar seed.
    Int(i32),
    /// 64-bit scalar seed.
    Long(i64),
    /// Array of 32-bit words.
    Ints(&'a [i32]),
    /// Array of 64-bit words, each split low word first.
    Longs(&'a [i64]),
}

impl Seed<'_> {
    /// The seed reduced to a single 64-bit value.
    ///
    /// Arrays use their first element (two words joined low-first for
    /// `Ints`); an empty array is 0.
    pub fn as_long(&self) -> i64 {
        match *self {
            Seed::Int(value) => i64::from(value),
            Seed::Long(value) => value,
            Seed::Ints(words) => match words {
                [] => 0,
                [low] => i64::from(*low),
                [low, high, ..] => {
                    ((u64::from(*high as u32) << 32) | u64::from(*low as u32)) as i64
                }
            },
            Seed::Longs(words) => words.first().copied().unwrap_or(0),
        }
    }

    /// Fills `state` with 32-bit words derived from this seed.
    pub(crate) fn fill_words(&self, state: &mut [u32]) {
        match *self {
            Seed::Int(value) => expand_scalar(i64::from(value) as u64, state),
            Seed::Long(value) => expand_scalar(value as u64, state),
            Seed::Ints(words) => {
                let words: Vec<u32> = words.iter().map(|&w| w as u32).collect();
                pad_words(&words, state);
            }
            Seed::Longs(words) => {
                let words: Vec<u32> = words
                    .iter()
                    .flat_map(|&w| [w as u32, ((w as u64) >> 32) as u32])
                    .collect();
                pad_words(&words, state);
            }
        }
    }
}

impl From<i32> for Seed<'_> {
    fn from(value: i32) -> Self {
        Seed::Int(value)
    }
}

impl From<i64> for Seed<'_> {
    fn from(value: i64) -> Self {
        Seed::Long(value)
    }
}

impl<'a> From<&'a [i32]> for Seed<'a> {
    fn from(words: &'a [i32]) -> Self {
        Seed::Ints(words)
    }
}

impl<'a> From<&'a [i64]> for Seed<'a> {
    fn from(words: &'a [i64]) -> Self {
        Seed::Longs(words)
    }
}

/// SplitMix64 generator, used only to expand seeds.
///
/// # Examples
///
/// ```
/// use simstat_random::SplitMix64;
///
/// let mut a = SplitMix64::new(42);
/// let mut b = SplitMix64::new(42);
/// assert_eq!(a.next_u64(), b.next_u64());
/// ```
#[derive(Debug, Clone)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Creates an expander starting from `seed`.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next 64-bit output.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        mix64(self.state)
    }
}

/// Stafford variant 13 finaliser.
#[inline]
fn mix64(z: u64) -> u64 {
    let z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    let z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Fills `state` from a SplitMix64 stream, low half of each output first.
fn fill_from_stream(mut expander: SplitMix64, state: &mut [u32]) {
    for pair in state.chunks_mut(2) {
        let value = expander.next_u64();
        pair[0] = value as u32;
        if let Some(high) = pair.get_mut(1) {
            *high = (value >> 32) as u32;
        }
    }
}

fn expand_scalar(seed: u64, state: &mut [u32]) {
    fill_from_stream(SplitMix64::new(seed), state);
}

/// Copies `words` into `state` and pads the remainder from a SplitMix64
/// stream keyed on all supplied words.
fn pad_words(words: &[u32], state: &mut [u32]) {
    let supplied = words.len().min(state.len());
    state[..supplied].copy_from_slice(&words[..supplied]);
    if supplied == state.len() {
        return;
    }
    let key = words
        .iter()
        .fold(GOLDEN_GAMMA, |key, &word| mix64(key ^ u64::from(word)));
    fill_from_stream(SplitMix64::new(key), &mut state[supplied..]);
}
