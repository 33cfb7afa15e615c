//! Measurement input processing.
//!
//! Three text formats are accepted:
//!
//! | Format | Example | Meaning |
//! |--------|---------|---------|
//! | samples | `3\n5\n5\n8` | one observation per token |
//! | value table | `1;2;4\n10;3;7` | values in the first row, counts in the second |
//! | density | `0;4;2.5;1` | weight of bin `i` at position `i` |
//!
//! Samples and table values are binned at the nearest integer. Tokens are
//! separated by newlines, tabs or semicolons; table rows by newlines.
//!
//! The `parse_*` functions return typed [`InputError`]s. The loaders of
//! [`LoadInput`] are the boundary used by fitter and decomposer: they never
//! fail loudly, but write the message to both report channels and return
//! `false`.

use tracing::{debug, warn};

use crate::density::EmpiricalDensity;
use crate::error::InputError;
use crate::report::Report;

/// Largest bin index a sample may fall into.
pub const MAX_BIN: usize = 10_000_000;

const SEPARATORS: &[char] = &['\n', '\r', '\t', ';'];

fn tokens<'a>(text: &'a str, separators: &'a [char]) -> impl Iterator<Item = &'a str> + 'a {
    text.split(separators)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn parse_values<'a>(
    tokens: impl Iterator<Item = &'a str>,
    offset: usize,
) -> Result<Vec<f64>, InputError> {
    tokens
        .enumerate()
        .map(|(i, token)| {
            let position = offset + i + 1;
            let value = token
                .parse::<f64>()
                .map_err(|_| InputError::InvalidNumber {
                    position,
                    token: token.to_string(),
                })?;
            if !(value.is_finite() && value >= 0.0) {
                return Err(InputError::InvalidValue { position, value });
            }
            Ok(value)
        })
        .collect()
}

fn bin_of(value: f64) -> Result<usize, InputError> {
    let bin = value.round();
    if bin > MAX_BIN as f64 {
        return Err(InputError::ValueTooLarge {
            value,
            max_bin: MAX_BIN,
        });
    }
    Ok(bin as usize)
}

/// Observations from sample text.
///
/// # Errors
///
/// `Empty` without tokens, `InvalidNumber` or `InvalidValue` for the first
/// bad token.
pub fn parse_samples(text: &str) -> Result<Vec<f64>, InputError> {
    let values = parse_values(tokens(text, SEPARATORS), 0)?;
    if values.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(values)
}

/// Count density of `samples`, one bin per integer up to the largest value.
///
/// # Errors
///
/// `Empty` for no samples, `InvalidValue` for negative or non-finite
/// samples, `ValueTooLarge` beyond [`MAX_BIN`].
pub fn density_from_samples(samples: &[f64]) -> Result<EmpiricalDensity, InputError> {
    if samples.is_empty() {
        return Err(InputError::Empty);
    }
    let mut bins = Vec::with_capacity(samples.len());
    for (i, &value) in samples.iter().enumerate() {
        if !(value.is_finite() && value >= 0.0) {
            return Err(InputError::InvalidValue {
                position: i + 1,
                value,
            });
        }
        bins.push(bin_of(value)?);
    }
    let len = bins.iter().copied().max().unwrap_or(0) + 1;
    let mut weights = vec![0.0; len];
    for bin in bins {
        weights[bin] += 1.0;
    }
    EmpiricalDensity::new(weights)
}

/// Count density from a two-row value/count table.
///
/// # Errors
///
/// `RowCount` unless there are exactly two non-empty rows,
/// `RowLengthMismatch` for rows of different length, the token errors of
/// [`parse_samples`] for either row, and `ZeroMass` if every count is 0.
pub fn parse_value_table(text: &str) -> Result<EmpiricalDensity, InputError> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if rows.len() != 2 {
        return Err(InputError::RowCount(rows.len()));
    }
    let row_separators: &[char] = &['\t', ';'];
    let values = parse_values(tokens(rows[0], row_separators), 0)?;
    let counts = parse_values(tokens(rows[1], row_separators), values.len())?;
    if values.len() != counts.len() {
        return Err(InputError::RowLengthMismatch {
            values: values.len(),
            counts: counts.len(),
        });
    }
    if values.is_empty() {
        return Err(InputError::Empty);
    }

    let bins = values
        .iter()
        .map(|&v| bin_of(v))
        .collect::<Result<Vec<_>, _>>()?;
    let len = bins.iter().copied().max().unwrap_or(0) + 1;
    let mut weights = vec![0.0; len];
    for (bin, count) in bins.into_iter().zip(counts) {
        weights[bin] += count;
    }
    let density = EmpiricalDensity::new(weights)?;
    if density.sum() <= 0.0 {
        return Err(InputError::ZeroMass);
    }
    Ok(density)
}

/// Density from `;`-separated bin weights.
///
/// # Errors
///
/// `Empty` without tokens, the token errors of [`parse_samples`], and
/// `ZeroMass` if every weight is 0.
pub fn parse_density(text: &str) -> Result<EmpiricalDensity, InputError> {
    let weights = parse_values(tokens(text, SEPARATORS), 0)?;
    if weights.is_empty() {
        return Err(InputError::Empty);
    }
    let density = EmpiricalDensity::new(weights)?;
    if density.sum() <= 0.0 {
        return Err(InputError::ZeroMass);
    }
    Ok(density)
}

/// Prepared fitter input: the normalised density, the raw counts and the
/// number of observations.
///
/// The normalised copy feeds the squared-difference, KS and χ² measures;
/// Anderson–Darling needs the raw counts.
#[derive(Debug, Clone, PartialEq)]
pub struct FitterInput {
    samples: EmpiricalDensity,
    raw_samples: EmpiricalDensity,
    count: usize,
}

impl FitterInput {
    /// Input from a raw (count) density. The observation count is the
    /// rounded total weight.
    ///
    /// # Errors
    ///
    /// `Empty` for a density without bins, `ZeroMass` for zero total weight.
    pub fn from_density(raw_samples: EmpiricalDensity) -> Result<Self, InputError> {
        if raw_samples.is_empty() {
            return Err(InputError::Empty);
        }
        let sum = raw_samples.sum();
        if sum <= 0.0 {
            return Err(InputError::ZeroMass);
        }
        Ok(Self {
            samples: raw_samples.normalised(),
            count: sum.round().max(1.0) as usize,
            raw_samples,
        })
    }

    /// Input from individual observations.
    ///
    /// # Errors
    ///
    /// See [`density_from_samples`].
    pub fn from_samples(samples: &[f64]) -> Result<Self, InputError> {
        Self::from_density(density_from_samples(samples)?)
    }

    /// Input from sample text.
    ///
    /// # Errors
    ///
    /// See [`parse_samples`] and [`density_from_samples`].
    pub fn from_samples_text(text: &str) -> Result<Self, InputError> {
        Self::from_samples(&parse_samples(text)?)
    }

    /// Input from a value/count table.
    ///
    /// # Errors
    ///
    /// See [`parse_value_table`].
    pub fn from_value_table_text(text: &str) -> Result<Self, InputError> {
        Self::from_density(parse_value_table(text)?)
    }

    /// Input from density text.
    ///
    /// # Errors
    ///
    /// See [`parse_density`].
    pub fn from_density_text(text: &str) -> Result<Self, InputError> {
        Self::from_density(parse_density(text)?)
    }

    /// Normalised density.
    #[inline]
    pub fn samples(&self) -> &EmpiricalDensity {
        &self.samples
    }

    /// Raw count density.
    #[inline]
    pub fn raw_samples(&self) -> &EmpiricalDensity {
        &self.raw_samples
    }

    /// Number of observations.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }
}

/// Text loaders shared by the fitter and the decomposer.
///
/// Implementors provide access to their report and input slot; the loaders
/// turn a parse failure into a report message and `false`.
pub trait LoadInput {
    /// Report receiving error messages.
    fn report_mut(&mut self) -> &mut Report;

    /// Stores successfully parsed input.
    fn set_input(&mut self, input: FitterInput);

    /// Stores `result` or reports its error.
    fn accept_input(&mut self, result: Result<FitterInput, InputError>) -> bool {
        match result {
            Ok(input) => {
                debug!(
                    bins = input.samples().len(),
                    count = input.count(),
                    "input loaded"
                );
                self.set_input(input);
                true
            }
            Err(err) => {
                warn!(error = %err, "input rejected");
                self.report_mut().error(&err.to_string());
                false
            }
        }
    }

    /// Loads sample text.
    fn load_samples(&mut self, text: &str) -> bool {
        self.accept_input(FitterInput::from_samples_text(text))
    }

    /// Loads a two-row value/count table.
    fn load_value_table(&mut self, text: &str) -> bool {
        self.accept_input(FitterInput::from_value_table_text(text))
    }

    /// Loads `;`-separated density text.
    fn load_density(&mut self, text: &str) -> bool {
        self.accept_input(FitterInput::from_density_text(text))
    }
}
