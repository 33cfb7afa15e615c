//! Histogram-style empirical density over integer bins.

use crate::error::InputError;

/// Non-negative weights indexed by integer support value.
///
/// Bin `i` holds the weight of the value `i`. The cumulative sums are kept
/// up to date with the weights and are normalised by the total, so the last
/// entry is 1.0 whenever the total is positive.
///
/// # Examples
///
/// ```rust
/// use simstat_fitting::EmpiricalDensity;
///
/// let d = EmpiricalDensity::new(vec![1.0, 3.0, 0.0, 4.0]).unwrap();
/// assert_eq!(d.sum(), 8.0);
/// assert_eq!(d.cumulative(), &[0.125, 0.5, 0.5, 1.0]);
/// assert_eq!(d.mode(), vec![3]);
/// assert_eq!(d.support_bounds(), Some((0, 3)));
/// assert_eq!(d.cdf(0.5), 0.0625);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmpiricalDensity {
    weights: Vec<f64>,
    cumulative: Vec<f64>,
}

impl EmpiricalDensity {
    /// Density over `weights`.
    ///
    /// # Errors
    ///
    /// `InvalidValue` for a negative or non-finite weight.
    pub fn new(weights: Vec<f64>) -> Result<Self, InputError> {
        if let Some((index, &value)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !(w.is_finite() && **w >= 0.0))
        {
            return Err(InputError::InvalidValue {
                position: index + 1,
                value,
            });
        }
        Ok(Self::from_valid(weights))
    }

    /// Density over `weights` with negative and NaN entries replaced by 0.
    pub fn clamped(mut weights: Vec<f64>) -> Self {
        for w in weights.iter_mut() {
            if !(*w > 0.0) {
                *w = 0.0;
            }
        }
        Self::from_valid(weights)
    }

    fn from_valid(weights: Vec<f64>) -> Self {
        let cumulative = cumulative_of(&weights);
        Self {
            weights,
            cumulative,
        }
    }

    /// Number of bins.
    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether there are no bins.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Bin weights.
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Weight of bin `index`, 0 past the end.
    #[inline]
    pub fn weight(&self, index: usize) -> f64 {
        self.weights.get(index).copied().unwrap_or(0.0)
    }

    /// Normalised cumulative sums; all zero when the total is zero.
    #[inline]
    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    /// Total weight.
    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Weighted mean of the bin indices, 0 for zero total weight.
    pub fn mean(&self) -> f64 {
        self.raw_moment(1)
    }

    /// Population standard deviation of the bin indices.
    pub fn standard_deviation(&self) -> f64 {
        let mean = self.mean();
        (self.raw_moment(2) - mean * mean).max(0.0).sqrt()
    }

    fn raw_moment(&self, power: i32) -> f64 {
        let (total, moment) = self
            .weights
            .iter()
            .enumerate()
            .fold((0.0, 0.0), |(total, moment), (i, &w)| {
                (total + w, moment + w * (i as f64).powi(power))
            });
        if total == 0.0 {
            0.0
        } else {
            moment / total
        }
    }

    /// Every index carrying the maximal weight, ascending.
    ///
    /// Empty when there are no bins, when all weights are zero, or when a
    /// density of more than one bin is flat.
    pub fn mode(&self) -> Vec<usize> {
        let max = self.weights.iter().copied().fold(0.0_f64, f64::max);
        if max <= 0.0 {
            return Vec::new();
        }
        let modes: Vec<usize> = self
            .weights
            .iter()
            .enumerate()
            .filter(|&(_, &w)| w == max)
            .map(|(i, _)| i)
            .collect();
        if modes.len() > 1 && modes.len() == self.weights.len() {
            return Vec::new();
        }
        modes
    }

    /// Weight at `floor(x)`.
    ///
    /// `x` equal to the bin count still reads the last bin, since the
    /// support runs up to and including the bin count; further out the
    /// density is 0.
    pub fn density(&self, x: f64) -> f64 {
        if self.weights.is_empty() || !(x >= 0.0) {
            return 0.0;
        }
        let i = x.floor();
        let len = self.weights.len() as f64;
        if i == len {
            self.weights[self.weights.len() - 1]
        } else if i > len {
            0.0
        } else {
            self.weights[i as usize]
        }
    }

    /// Cumulative probability with linear interpolation inside a bin.
    pub fn cdf(&self, x: f64) -> f64 {
        if self.weights.is_empty() || x < 0.0 {
            return 0.0;
        }
        if x >= self.weights.len() as f64 {
            return 1.0;
        }
        let floor = x.floor();
        let i = floor as usize;
        let a = if i == 0 { 0.0 } else { self.cumulative[i - 1] };
        let b = self.cumulative[i];
        let fraction = x - floor;
        a * (1.0 - fraction) + b * fraction
    }

    /// Lowest and highest index with positive weight.
    pub fn support_bounds(&self) -> Option<(usize, usize)> {
        let lower = self.weights.iter().position(|&w| w > 0.0)?;
        let upper = self.weights.iter().rposition(|&w| w > 0.0)?;
        Some((lower, upper))
    }

    /// Copy scaled to total weight 1; unchanged when the total is zero.
    pub fn normalised(&self) -> Self {
        let sum = self.sum();
        if sum <= 0.0 || sum == 1.0 {
            return self.clone();
        }
        Self {
            weights: self.weights.iter().map(|w| w / sum).collect(),
            cumulative: self.cumulative.clone(),
        }
    }
}

fn cumulative_of(weights: &[f64]) -> Vec<f64> {
    let mut running = 0.0;
    let mut cumulative: Vec<f64> = weights
        .iter()
        .map(|w| {
            running += w;
            running
        })
        .collect();
    if running > 0.0 && running != 1.0 {
        for c in cumulative.iter_mut() {
            *c /= running;
        }
    }
    cumulative
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_rejects_negative_and_nan() {
        assert!(matches!(
            EmpiricalDensity::new(vec![1.0, -0.5]),
            Err(InputError::InvalidValue { position: 2, .. })
        ));
        assert!(EmpiricalDensity::new(vec![f64::NAN]).is_err());
        assert!(EmpiricalDensity::new(Vec::new()).is_ok());
    }

    #[test]
    fn test_clamped_zeroes_invalid_weights() {
        let d = EmpiricalDensity::clamped(vec![-1.0, 2.0, f64::NAN, 2.0]);
        assert_eq!(d.weights(), &[0.0, 2.0, 0.0, 2.0]);
        assert_eq!(d.cumulative(), &[0.0, 0.5, 0.5, 1.0]);
    }

    #[test]
    fn test_moments() {
        let d = EmpiricalDensity::new(vec![0.0, 1.0, 0.0, 1.0]).unwrap();
        assert_relative_eq!(d.mean(), 2.0);
        assert_relative_eq!(d.standard_deviation(), 1.0);

        let empty = EmpiricalDensity::new(vec![0.0; 3]).unwrap();
        assert_eq!(empty.mean(), 0.0);
        assert_eq!(empty.standard_deviation(), 0.0);
    }

    #[test]
    fn test_mode_cases() {
        let d = EmpiricalDensity::new(vec![1.0, 5.0, 2.0, 5.0]).unwrap();
        assert_eq!(d.mode(), vec![1, 3]);

        assert!(EmpiricalDensity::new(vec![2.0; 4]).unwrap().mode().is_empty());
        assert!(EmpiricalDensity::new(vec![0.0; 4]).unwrap().mode().is_empty());
        assert!(EmpiricalDensity::default().mode().is_empty());
        assert_eq!(EmpiricalDensity::new(vec![3.0]).unwrap().mode(), vec![0]);
    }

    #[test]
    fn test_density_lookup() {
        let d = EmpiricalDensity::new(vec![0.2, 0.3, 0.5]).unwrap();
        assert_eq!(d.density(-0.1), 0.0);
        assert_eq!(d.density(0.0), 0.2);
        assert_eq!(d.density(1.99), 0.3);
        assert_eq!(d.density(3.0), 0.5);
        assert_eq!(d.density(3.5), 0.5);
        assert_eq!(d.density(4.0), 0.0);
        assert_eq!(d.density(f64::NAN), 0.0);
    }

    #[test]
    fn test_cdf_interpolates() {
        let d = EmpiricalDensity::new(vec![1.0, 1.0, 2.0]).unwrap();
        assert_eq!(d.cdf(-1.0), 0.0);
        assert_relative_eq!(d.cdf(0.0), 0.0);
        assert_relative_eq!(d.cdf(1.0), 0.25);
        assert_relative_eq!(d.cdf(1.5), 0.375);
        assert_relative_eq!(d.cdf(2.5), 0.75);
        assert_eq!(d.cdf(3.0), 1.0);
    }

    #[test]
    fn test_support_bounds() {
        let d = EmpiricalDensity::new(vec![0.0, 0.0, 1.0, 0.0, 2.0, 0.0]).unwrap();
        assert_eq!(d.support_bounds(), Some((2, 4)));
        assert_eq!(EmpiricalDensity::new(vec![0.0]).unwrap().support_bounds(), None);
    }

    #[test]
    fn test_normalised_keeps_cumulative() {
        let d = EmpiricalDensity::new(vec![2.0, 6.0]).unwrap();
        let n = d.normalised();
        assert_eq!(n.weights(), &[0.25, 0.75]);
        assert_eq!(n.cumulative(), d.cumulative());
        assert_relative_eq!(n.mean(), d.mean());
    }

    proptest! {
        #[test]
        fn prop_cumulative_monotone_and_ends_at_one(
            weights in prop::collection::vec(0.0..1000.0_f64, 1..200)
        ) {
            let d = EmpiricalDensity::new(weights).unwrap();
            let c = d.cumulative();
            prop_assert!(c.windows(2).all(|w| w[0] <= w[1]));
            if d.sum() > 0.0 {
                prop_assert!((c[c.len() - 1] - 1.0).abs() < 1e-12);
            }
        }
    }
}
