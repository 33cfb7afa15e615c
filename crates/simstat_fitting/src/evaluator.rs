//! Goodness-of-fit measures between an empirical density and a candidate.
//!
//! | Measure | Data used | Result |
//! |---------|-----------|--------|
//! | squared difference | normalised density | score, lower is better |
//! | Kolmogorov–Smirnov | normalised cumulative sums | p-value |
//! | χ² | normalised cumulative sums | p-value |
//! | Anderson–Darling | raw counts | p-value, normal candidates only |
//!
//! Candidates are evaluated on the integer support points of the empirical
//! data.

use simstat_core::math::special::{chi_squared_cdf, norm_cdf};
use simstat_core::traits::ContinuousDistribution;

use crate::config::FitterConfig;
use crate::input::FitterInput;

/// Scores of one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitScores {
    /// Sum of squared differences of the normalised densities
    pub squared_error: f64,
    /// Kolmogorov–Smirnov p-value
    pub ks_p_value: f64,
    /// χ² p-value
    pub chi_squared_p_value: f64,
    /// Anderson–Darling p-value, present for normal candidates
    pub anderson_darling_p_value: Option<f64>,
}

/// Evaluates candidates against one prepared input.
///
/// # Examples
///
/// ```rust
/// use simstat_fitting::{FitEvaluator, FitterConfig, FitterInput};
/// use simstat_models::distributions::Normal;
///
/// let input = FitterInput::from_density_text("1;4;6;4;1").unwrap();
/// let config = FitterConfig::default();
/// let evaluator = FitEvaluator::new(&input, &config);
///
/// let scores = evaluator.evaluate(&Normal::new(2.0, 1.0).unwrap()).unwrap();
/// assert!(scores.squared_error < 0.01);
/// assert!((0.0..=1.0).contains(&scores.ks_p_value));
/// assert!(scores.anderson_darling_p_value.is_some());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FitEvaluator<'a> {
    input: &'a FitterInput,
    config: &'a FitterConfig,
}

impl<'a> FitEvaluator<'a> {
    /// Evaluator for `input`.
    pub fn new(input: &'a FitterInput, config: &'a FitterConfig) -> Self {
        Self { input, config }
    }

    /// All measures for `candidate`, `None` if its score is NaN.
    pub fn evaluate(&self, candidate: &dyn ContinuousDistribution) -> Option<FitScores> {
        let squared_error = self.squared_difference(candidate);
        if squared_error.is_nan() {
            return None;
        }
        Some(FitScores {
            squared_error,
            ks_p_value: self.ks_p_value(candidate),
            chi_squared_p_value: self.chi_squared_p_value(candidate),
            anderson_darling_p_value: candidate
                .is_normal()
                .then(|| self.anderson_darling_p_value(candidate)),
        })
    }

    /// Sum of squared differences between the normalised empirical and
    /// candidate densities.
    ///
    /// Both sides are evaluated at `min(cap, 2·bins)` points and divided by
    /// their own sums there. A one-point candidate against data whose
    /// standard deviation is below the threshold scores 0 when it sits on
    /// the mean and `+∞` otherwise.
    pub fn squared_difference(&self, candidate: &dyn ContinuousDistribution) -> f64 {
        let samples = self.input.samples();
        if let Some(point) = candidate.point_mass() {
            if samples.standard_deviation() < self.config.one_point_sd_threshold {
                return if (point - samples.mean()).abs() < self.config.one_point_mean_tolerance {
                    0.0
                } else {
                    f64::INFINITY
                };
            }
        }

        let points = self.config.support_point_cap.min(2 * samples.len());
        let mut empirical = Vec::with_capacity(points);
        let mut fitted = Vec::with_capacity(points);
        for i in 0..points {
            let x = i as f64;
            empirical.push(samples.density(x));
            let d = candidate.density(x);
            fitted.push(if i == 0 && !d.is_finite() { 0.0 } else { d });
        }
        let empirical_sum = nonzero(empirical.iter().sum());
        let fitted_sum = nonzero(fitted.iter().sum());

        let guard = self.config.density_overflow_guard;
        empirical
            .iter()
            .zip(&fitted)
            .map(|(e, f)| (e / empirical_sum, f / fitted_sum))
            .filter(|&(a, b)| !(a > guard || b > guard))
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }

    /// Kolmogorov–Smirnov p-value `min(1, 2·exp(-2·n·D²))`.
    ///
    /// `D` is the largest distance between the cumulative sums and the
    /// candidate CDF at the bin indices; the scan stops once the candidate
    /// CDF passes the cut-off.
    pub fn ks_p_value(&self, candidate: &dyn ContinuousDistribution) -> f64 {
        let cumulative = self.input.samples().cumulative();
        let mut max_distance = 0.0_f64;
        for (i, &empirical) in cumulative.iter().enumerate() {
            let d = candidate.cdf(i as f64);
            if d > self.config.cdf_cutoff {
                break;
            }
            if i == 0 && !d.is_finite() {
                continue;
            }
            max_distance = max_distance.max((empirical - d).abs());
        }
        let n = self.input.count() as f64;
        (2.0 * (-2.0 * n * max_distance * max_distance).exp()).min(1.0)
    }

    /// χ² p-value over the per-bin probability increments.
    ///
    /// Only bins with a positive candidate increment contribute; the degrees
    /// of freedom are the number of contributing bins minus one, at least 1.
    pub fn chi_squared_p_value(&self, candidate: &dyn ContinuousDistribution) -> f64 {
        let cumulative = self.input.samples().cumulative();
        let n = self.input.count() as f64;
        let mut statistic = 0.0;
        let mut steps = 0_usize;

        let mut previous = candidate.cdf(0.0);
        for i in 0..cumulative.len() {
            let current = candidate.cdf((i + 1) as f64);
            if !current.is_finite() {
                continue;
            }
            if !previous.is_finite() {
                previous = current;
                continue;
            }
            let delta = current - previous;
            previous = current;
            if current > self.config.cdf_cutoff {
                break;
            }
            if delta <= 0.0 {
                continue;
            }
            steps += 1;
            let empirical_delta = if i == 0 {
                cumulative[0]
            } else {
                cumulative[i] - cumulative[i - 1]
            };
            statistic += n * (empirical_delta - delta) * (empirical_delta - delta) / delta;
        }

        let degrees_of_freedom = steps.saturating_sub(1).max(1) as f64;
        (1.0 - chi_squared_cdf(statistic, degrees_of_freedom)).clamp(0.0, 1.0)
    }

    /// Anderson–Darling p-value of the raw observations against the
    /// candidate's mean and standard deviation.
    ///
    /// Returns 0 for a candidate with zero standard deviation or no
    /// observations. Terms whose logarithm is not finite are skipped.
    pub fn anderson_darling_p_value(&self, candidate: &dyn ContinuousDistribution) -> f64 {
        let mean = candidate.mean();
        let sd = candidate.standard_deviation();
        if sd == 0.0 || !sd.is_finite() {
            return 0.0;
        }

        // Standardised observations in ascending order.
        let mut probabilities = Vec::with_capacity(self.input.count());
        for (index, &weight) in self.input.raw_samples().weights().iter().enumerate() {
            let p = norm_cdf((index as f64 - mean) / sd);
            for _ in 0..weight.round() as usize {
                probabilities.push(p);
            }
        }
        let n = probabilities.len();
        if n == 0 {
            return 0.0;
        }

        let mut s = 0.0;
        for i in 1..=n {
            let term = probabilities[i - 1].ln() + (1.0 - probabilities[n - i]).ln();
            if term.is_finite() {
                s += (2 * i - 1) as f64 * term;
            }
        }
        let n = n as f64;
        let a_squared = -n - s / n;
        let z = a_squared * (1.0 + 0.75 / n + 2.25 / (n * n));
        anderson_darling_p(z)
    }
}

/// Vertex of the upper-tail exponent; past it the polynomial rises again.
const AD_TAIL_VERTEX: f64 = 5.709 / (2.0 * 0.0186);

/// p-value for the size-corrected Anderson–Darling statistic `z`
/// (D'Agostino and Stephens, normal case).
pub fn anderson_darling_p(z: f64) -> f64 {
    let p = if z > 0.6 {
        let z = z.min(AD_TAIL_VERTEX);
        (1.2937 - 5.709 * z + 0.0186 * z * z).exp()
    } else if z > 0.34 {
        (0.9177 - 4.279 * z - 1.38 * z * z).exp()
    } else if z > 0.2 {
        1.0 - (-8.318 + 42.796 * z - 59.938 * z * z).exp()
    } else {
        1.0 - (-13.436 + 101.14 * z - 223.73 * z * z).exp()
    };
    p.clamp(0.0, 1.0)
}

#[inline]
fn nonzero(sum: f64) -> f64 {
    if sum == 0.0 {
        1.0
    } else {
        sum
    }
}
