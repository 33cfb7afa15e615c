//! Decomposition of a multi-modal density into weighted components.
//!
//! The decomposer peels one log-normal or gamma component off the residual
//! density per step:
//!
//! 1. clamp the residual and locate its mode
//! 2. solve for the component mean that puts the component's mode there
//! 3. shrink the standard deviation until the component no longer
//!    overshoots the residual at the mode
//! 4. subtract the scaled component and clear boundary artefacts
//!
//! Steps stop after [`DecomposerConfig::max_components`] components or once
//! the extracted fractions explain the data. The fractions are then
//! re-optimised against the original density at the component modes and
//! normalised to sum to 1.

use simstat_core::math::solvers::BisectionSolver;
use simstat_core::traits::ContinuousDistribution;
use simstat_core::types::{DistributionError, SolverError};
use simstat_models::distributions::{Gamma, LogNormal};
use simstat_models::family::BoxedDistribution;
use simstat_random::{Algorithm, RandomStream};
use tracing::{debug, info, trace, warn};

use crate::config::{ComponentFamily, DecomposerConfig};
use crate::density::EmpiricalDensity;
use crate::input::{FitterInput, LoadInput};
use crate::report::{format_number, format_percent, Report};

/// Value given to an empty first bin before a step.
const ZERO_BIN_NUDGE: f64 = 0.0001;

/// Lower bound for estimated component means.
const MIN_COMPONENT_MEAN: f64 = 0.001;

/// Gamma components at or below this mode keep the residual mean.
const GAMMA_MODE_FLOOR: f64 = 0.0001;

/// Number of bins of the demo data set.
pub const EXAMPLE_BINS: usize = 5000;

/// Mean and standard deviation of the first demo component.
const EXAMPLE_FIRST: (f64, f64) = (50.0, 100.0);

/// Mean and standard deviation of the second demo component.
const EXAMPLE_SECOND: (f64, f64) = (150.0, 30.0);

/// Draws of the first demo component; the second gets a third as many.
const EXAMPLE_DRAWS: usize = 1_000_000;

/// One extracted component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModalComponent {
    mode: usize,
    mean: f64,
    standard_deviation: f64,
    fraction: f64,
}

impl ModalComponent {
    /// Bin index of the residual mode the component was fitted to.
    #[inline]
    pub fn mode(&self) -> usize {
        self.mode
    }

    /// Component mean.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Component standard deviation.
    #[inline]
    pub fn standard_deviation(&self) -> f64 {
        self.standard_deviation
    }

    /// Share of the total mass.
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.fraction
    }
}

/// Splits an empirical density into log-normal or gamma components.
///
/// # Examples
///
/// ```rust
/// use simstat_fitting::{EmpiricalDensity, MultiModalDecomposer};
/// use simstat_core::traits::ContinuousDistribution;
/// use simstat_models::distributions::LogNormal;
///
/// let low = LogNormal::new(40.0, 10.0).unwrap();
/// let high = LogNormal::new(160.0, 20.0).unwrap();
/// let weights: Vec<f64> = (0..300)
///     .map(|i| 1000.0 * (0.7 * low.density(i as f64) + 0.3 * high.density(i as f64)))
///     .collect();
///
/// let mut decomposer = MultiModalDecomposer::new();
/// let components = decomposer.decompose(&EmpiricalDensity::new(weights).unwrap());
///
/// let total: f64 = components.iter().map(|c| c.fraction()).sum();
/// assert!((total - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Default)]
pub struct MultiModalDecomposer {
    config: DecomposerConfig,
    input: Option<FitterInput>,
    report: Report,
    components: Vec<ModalComponent>,
    distributions: Vec<BoxedDistribution>,
    calculation_command: Option<String>,
}

impl MultiModalDecomposer {
    /// Decomposer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decomposer with `config`.
    pub fn with_config(config: DecomposerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Active settings.
    #[inline]
    pub fn config(&self) -> &DecomposerConfig {
        &self.config
    }

    /// Loaded input, if any.
    #[inline]
    pub fn input(&self) -> Option<&FitterInput> {
        self.input.as_ref()
    }

    /// Report of the last load or run.
    #[inline]
    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Components of the last run in extraction order.
    #[inline]
    pub fn components(&self) -> &[ModalComponent] {
        &self.components
    }

    /// Mixture expression of the last run, if enabled in the settings.
    pub fn calculation_command(&self) -> Option<&str> {
        self.calculation_command.as_deref()
    }

    /// Fitted component distributions in extraction order.
    pub fn distributions(&self) -> Vec<&dyn ContinuousDistribution> {
        self.distributions.iter().map(|d| d.as_ref()).collect()
    }

    /// Density of the fitted mixture at `x`.
    pub fn mixture_density(&self, x: f64) -> f64 {
        self.components
            .iter()
            .zip(&self.distributions)
            .map(|(c, d)| c.fraction * d.density(x))
            .sum()
    }

    /// Discards input, results and report.
    pub fn clear(&mut self) {
        self.input = None;
        self.report.clear();
        self.reset_results();
    }

    fn reset_results(&mut self) {
        self.components.clear();
        self.distributions.clear();
        self.calculation_command = None;
    }

    /// Decomposes the raw counts of the loaded input.
    ///
    /// Returns `false` and reports the problem if nothing is loaded.
    pub fn process(&mut self) -> bool {
        match self.input.take() {
            Some(input) => {
                self.decompose(input.raw_samples());
                self.input = Some(input);
                true
            }
            None => {
                warn!("decomposition requested without input");
                self.report.error("No measurement values loaded");
                false
            }
        }
    }

    /// Decomposes `density` and returns the components.
    ///
    /// A step that finds no mode, or whose mean estimate or component
    /// construction fails, ends the run; components extracted so far are
    /// kept and their fractions still re-optimised.
    pub fn decompose(&mut self, density: &EmpiricalDensity) -> &[ModalComponent] {
        self.reset_results();
        let family = self.config.component_family();
        debug!(bins = density.len(), family = family.name(), "decomposing density");

        self.report.raw(
            &format!("Component distribution: {}\n", family.name()),
            &format!("<p>Component distribution: <b>{}</b></p>", family.name()),
        );

        let mut residual = density.weights().to_vec();
        for _ in 0..self.config.max_components() {
            match self.process_step(&residual) {
                Some(next) => residual = next,
                None => break,
            }
            let explained: f64 = self.components.iter().map(|c| c.fraction).sum();
            if explained > self.config.explained_threshold() {
                break;
            }
        }

        if !self.components.is_empty() {
            self.optimise_fractions(density);
        }
        if self.config.show_calculation_command() && !self.components.is_empty() {
            self.write_calculation_command();
        }

        info!(
            components = self.components.len(),
            fractions = ?self.components.iter().map(|c| c.fraction).collect::<Vec<_>>(),
            "decomposition finished"
        );
        &self.components
    }

    /// Extracts one component from `residual` and returns the new residual,
    /// or `None` if the run ends here.
    fn process_step(&mut self, residual: &[f64]) -> Option<Vec<f64>> {
        let step = self.components.len() + 1;
        self.report.raw(
            &format!("Decomposition step {}:\n", step),
            &format!("<h3>Decomposition step {}:</h3>", step),
        );

        let mut weights: Vec<f64> = residual
            .iter()
            .map(|&w| if w > 0.0 { w } else { 0.0 })
            .collect();
        if let Some(first) = weights.first_mut() {
            if *first == 0.0 {
                *first = ZERO_BIN_NUDGE;
            }
        }
        let current = EmpiricalDensity::clamped(weights);

        let sum = current.sum();
        let Some(&mode) = current.mode().first() else {
            debug!(step, "residual has no mode");
            self.report.raw(
                "  No mode found; decomposition stopped.\n",
                "No mode found; decomposition stopped.<br>",
            );
            return None;
        };
        self.report.raw(
            &format!("  Mode: {}\n", mode),
            &format!("Mode: {}<br>", mode),
        );

        let allowed = if self.components.is_empty() {
            self.config.first_overshoot()
        } else {
            self.config.subsequent_overshoot()
        };

        let bins = current.len();
        let mut sd = current.standard_deviation();
        let mut round = 1;
        let (mean, distribution, partial, ratio) = loop {
            let mean = match self.estimate_mean(mode as f64, current.mean(), sd, bins) {
                Ok(mean) => mean.max(MIN_COMPONENT_MEAN),
                Err(err) => {
                    warn!(step, mode, sd, error = %err, "mean estimate failed, stopping decomposition");
                    return None;
                }
            };
            let distribution = match component_distribution(self.config.component_family(), mean, sd) {
                Ok(distribution) => distribution,
                Err(err) => {
                    warn!(step, mean, sd, error = %err, "component rejected, stopping decomposition");
                    return None;
                }
            };
            let partial: Vec<f64> = (0..bins)
                .map(|i| {
                    if i + 1 < bins {
                        distribution.density(i as f64)
                    } else {
                        0.0
                    }
                })
                .collect();
            let at_mode = partial[mode];
            let ratio = if at_mode <= 0.0 {
                1.0
            } else {
                current.weight(mode) / at_mode
            } / sum;
            if ratio < allowed || round >= self.config.max_shrink_rounds() {
                break (mean, distribution, partial, ratio);
            }
            sd *= self.config.sd_shrink_factor();
            round += 1;
        };

        let remaining = 1.0 - self.components.iter().map(|c| c.fraction).sum::<f64>();
        let fraction = remaining * ratio.min(1.0);
        debug!(step, mode, mean, sd, fraction, rounds = round, "component extracted");
        self.components.push(ModalComponent {
            mode,
            mean,
            standard_deviation: sd,
            fraction,
        });
        self.distributions.push(distribution);

        self.report.raw(
            &format!(
                "  Approximation: mean={}, sd={}\n  Fraction: {}\n",
                format_number(mean, 1),
                format_number(sd, 1),
                format_percent(fraction)
            ),
            &format!(
                "Approximation: mean=<b>{}</b>, sd=<b>{}</b><br>Fraction: {}<br>",
                format_number(mean, 1),
                format_number(sd, 1),
                format_percent(fraction)
            ),
        );

        let scale = allowed * sum;
        let mut next: Vec<f64> = current
            .weights()
            .iter()
            .zip(&partial)
            .map(|(w, p)| w - p * scale)
            .collect();

        // Peaks left at the lower edge are artefacts of the subtraction.
        let mut first = 0;
        while first < next.len() && argmax(&next) == Some(first) {
            next[first] = 0.0;
            first += 1;
        }
        Some(next)
    }

    /// Mean of a component with standard deviation `sd` whose mode sits at
    /// `mode`.
    fn estimate_mean(&self, mode: f64, mean: f64, sd: f64, bins: usize) -> Result<f64, SolverError> {
        let variance = sd * sd;
        let solver = BisectionSolver::new(self.config.bisection());
        let upper = 10.0 * bins as f64;
        match self.config.component_family() {
            ComponentFamily::LogNormal => solver.solve(
                |x: f64| x.powi(4) / (variance + x * x).powf(1.5) - mode,
                0.0,
                upper,
            ),
            ComponentFamily::Gamma if mode <= GAMMA_MODE_FLOOR => Ok(mean),
            ComponentFamily::Gamma => solver.solve(|x: f64| (x * x - variance) / x - mode, 0.0, upper),
        }
    }

    /// Coordinate descent on the fractions so the mixture matches `original`
    /// at the component modes.
    fn optimise_fractions(&mut self, original: &EmpiricalDensity) {
        let n = self.components.len();
        let current = self.fraction_list(", ");
        self.report.heading("Fraction re-optimisation");
        self.report.raw(
            &format!("  Current fractions: {}.\n", current),
            &format!("Current fractions: {}.<br>", current),
        );

        let modes: Vec<f64> = self
            .components
            .iter()
            .map(|c| c.mode.max(1) as f64)
            .collect();
        let sum = original.sum();
        let target: Vec<f64> = modes
            .iter()
            .map(|&m| original.weight(m as usize) / sum)
            .collect();
        // partial[j][i]: density of component j at the mode of component i.
        let partial: Vec<Vec<f64>> = self
            .distributions
            .iter()
            .map(|d| modes.iter().map(|&m| d.density(m)).collect())
            .collect();

        let objective = |fractions: &[f64]| -> f64 {
            if fractions.iter().any(|f| !(0.0..=1.0).contains(f)) {
                return f64::INFINITY;
            }
            (0..n)
                .filter(|&i| target[i] > 0.0)
                .map(|i| {
                    let mixed: f64 = (0..n).map(|j| partial[j][i] * fractions[j]).sum();
                    (mixed - target[i]).abs() / target[i]
                })
                .sum()
        };

        let step = self.config.fraction_step();
        let mut fractions: Vec<f64> = self.components.iter().map(|c| c.fraction).collect();
        let mut stall = 0;
        let mut sweeps = 0;
        while stall < self.config.stall_sweeps() && sweeps < self.config.max_sweeps() {
            stall += 1;
            sweeps += 1;
            for index in 0..n {
                let up = shift_fraction(&fractions, index, step);
                let down = shift_fraction(&fractions, index, -step);
                let value = objective(&fractions);
                let up_value = objective(&up);
                let down_value = objective(&down);
                if up_value < value || down_value < value {
                    fractions = if up_value < down_value { up } else { down };
                    stall = 0;
                }
            }
            trace!(sweep = sweeps, objective = objective(&fractions), "fraction sweep");
        }

        let total: f64 = fractions.iter().sum();
        if total > 0.0 {
            fractions.iter_mut().for_each(|f| *f /= total);
        } else {
            fractions.iter_mut().for_each(|f| *f = 1.0 / n as f64);
        }
        for (component, fraction) in self.components.iter_mut().zip(fractions) {
            component.fraction = fraction;
        }

        let plain = self.fraction_list(", ");
        let html = self.fraction_list("</b>, <b>");
        self.report.raw(
            &format!("  Optimised fractions: {}.\n", plain),
            &format!("Optimised fractions: <b>{}</b>.<br>", html),
        );
    }

    fn fraction_list(&self, separator: &str) -> String {
        self.components
            .iter()
            .map(|c| format_percent(c.fraction))
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn write_calculation_command(&mut self) {
        let function = self.config.component_family().command_name();
        let terms: Vec<String> = self
            .components
            .iter()
            .map(|c| {
                format!(
                    "{};{}({};{})",
                    format_number(c.fraction, 2),
                    function,
                    format_number(c.mean, 1),
                    format_number(c.standard_deviation, 1)
                )
            })
            .collect();
        let command = format!("RandomValues({})", terms.join(";"));

        self.report.raw(
            &format!("\nCalculation command for the mixture:\n  {}", command),
            &format!("<h3>Calculation command for the mixture</h3><tt>{}</tt>", command),
        );
        self.calculation_command = Some(command);
    }
}

impl LoadInput for MultiModalDecomposer {
    fn report_mut(&mut self) -> &mut Report {
        &mut self.report
    }

    fn set_input(&mut self, input: FitterInput) {
        self.input = Some(input);
    }
}

fn component_distribution(
    family: ComponentFamily,
    mean: f64,
    sd: f64,
) -> Result<BoxedDistribution, DistributionError> {
    Ok(match family {
        ComponentFamily::LogNormal => Box::new(LogNormal::new(mean, sd)?),
        ComponentFamily::Gamma => Box::new(Gamma::from_moments(mean, sd)?),
    })
}

/// Index of the largest value; the highest index wins ties.
fn argmax(values: &[f64]) -> Option<usize> {
    let mut best = None;
    let mut max = f64::MIN;
    for (i, &v) in values.iter().enumerate() {
        if v >= max {
            best = Some(i);
            max = v;
        }
    }
    best
}

/// Moves `step` onto `fractions[index]`, taken evenly from the others.
fn shift_fraction(fractions: &[f64], index: usize, step: f64) -> Vec<f64> {
    let others = if fractions.len() > 1 {
        step / (fractions.len() - 1) as f64
    } else {
        0.0
    };
    fractions
        .iter()
        .enumerate()
        .map(|(i, &f)| if i == index { f + step } else { f - others })
        .collect()
}

/// Two-component log-normal demo data: 1 000 000 draws of LogNormal(50, 100)
/// and 333 333 draws of LogNormal(150, 30), rounded into 5000 bins.
///
/// # Examples
///
/// ```rust,no_run
/// use simstat_fitting::build_example;
///
/// let density = build_example(1);
/// assert_eq!(density.len(), 5000);
/// assert_eq!(density.sum(), 1_333_333.0);
/// ```
pub fn build_example(seed: i64) -> EmpiricalDensity {
    let mut rng = RandomStream::new(Algorithm::L32X64Mix, seed);
    let mut weights = vec![0.0; EXAMPLE_BINS];

    for ((mean, sd), draws) in [
        (EXAMPLE_FIRST, EXAMPLE_DRAWS),
        (EXAMPLE_SECOND, EXAMPLE_DRAWS / 3),
    ] {
        // Both parameter pairs are positive constants.
        let Ok(component) = LogNormal::new(mean, sd) else {
            continue;
        };
        for _ in 0..draws {
            let value = component.sample(&mut rng).round().max(0.0);
            let bin = (value as usize).min(EXAMPLE_BINS - 1);
            weights[bin] += 1.0;
        }
    }
    EmpiricalDensity::clamped(weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use simstat_core::math::solvers::SolverConfig;

    fn mixture(parts: &[(f64, f64, f64)], bins: usize, mass: f64) -> EmpiricalDensity {
        let components: Vec<(f64, LogNormal)> = parts
            .iter()
            .map(|&(f, m, s)| (f, LogNormal::new(m, s).unwrap()))
            .collect();
        let weights = (0..bins)
            .map(|i| {
                mass * components
                    .iter()
                    .map(|(f, d)| f * d.density(i as f64))
                    .sum::<f64>()
            })
            .collect();
        EmpiricalDensity::new(weights).unwrap()
    }

    fn assert_valid_fractions(components: &[ModalComponent]) {
        let total: f64 = components.iter().map(|c| c.fraction()).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-9);
        for c in components {
            assert!((0.0..=1.0).contains(&c.fraction()), "fraction {}", c.fraction());
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    #[test]
    fn test_argmax_prefers_highest_index() {
        assert_eq!(argmax(&[1.0, 3.0, 3.0, 2.0]), Some(2));
        assert_eq!(argmax(&[0.0, 0.0]), Some(1));
        assert_eq!(argmax(&[-5.0]), Some(0));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_shift_fraction_keeps_total() {
        let shifted = shift_fraction(&[0.5, 0.3, 0.2], 0, 0.01);
        assert_relative_eq!(shifted[0], 0.51, epsilon = 1e-15);
        assert_relative_eq!(shifted[1], 0.295, epsilon = 1e-15);
        assert_relative_eq!(shifted.iter().sum::<f64>(), 1.0, epsilon = 1e-15);
        assert_eq!(shift_fraction(&[0.4], 0, -0.01), vec![0.39]);
    }

    #[test]
    fn test_lognormal_mean_estimate_reproduces_mode() {
        let decomposer = MultiModalDecomposer::new();
        let sd = 20.0;
        let mean = decomposer.estimate_mean(40.0, 0.0, sd, 500).unwrap();
        let mode = mean.powi(4) / (sd * sd + mean * mean).powf(1.5);
        assert_relative_eq!(mode, 40.0, epsilon = 1e-4);
        assert_relative_eq!(LogNormal::new(mean, sd).unwrap().mode(), 40.0, epsilon = 1e-4);
    }

    #[test]
    fn test_gamma_mean_estimate() {
        let config = DecomposerConfig::builder()
            .component_family(ComponentFamily::Gamma)
            .build()
            .unwrap();
        let decomposer = MultiModalDecomposer::with_config(config);
        let mean = decomposer.estimate_mean(30.0, 0.0, 10.0, 500).unwrap();
        assert_relative_eq!((mean * mean - 100.0) / mean, 30.0, epsilon = 1e-4);
        // Mode at the origin keeps the residual mean.
        assert_eq!(decomposer.estimate_mean(0.0, 12.5, 10.0, 500).unwrap(), 12.5);
    }

    // ========================================================================
    // Decomposition
    // ========================================================================

    #[test]
    fn test_bimodal_mixture() {
        let density = mixture(&[(0.6, 50.0, 20.0), (0.4, 200.0, 30.0)], 400, 10_000.0);
        let mut decomposer = MultiModalDecomposer::new();
        let components = decomposer.decompose(&density).to_vec();

        assert!(!components.is_empty());
        assert!(components.len() <= 4);
        assert_valid_fractions(&components);
        assert_eq!(components[0].mode(), density.mode()[0]);
        assert_eq!(decomposer.distributions().len(), components.len());

        let plain = decomposer.report().plain();
        assert!(plain.starts_with("Component distribution: LogNormal\nDecomposition step 1:\n"));
        assert!(plain.contains("Fraction re-optimisation\n  Current fractions: "));
        assert!(plain.contains("  Optimised fractions: "));
        assert!(decomposer.calculation_command().is_none());
    }

    #[test]
    fn test_mixture_density_integrates_to_one() {
        let density = mixture(&[(0.7, 40.0, 10.0), (0.3, 160.0, 20.0)], 300, 1000.0);
        let mut decomposer = MultiModalDecomposer::new();
        decomposer.decompose(&density);
        let mass: f64 = (0..5000).map(|i| decomposer.mixture_density(i as f64)).sum();
        assert!((mass - 1.0).abs() < 0.05, "mass {}", mass);
    }

    #[test]
    fn test_empty_density_has_no_components() {
        let mut decomposer = MultiModalDecomposer::new();
        let components = decomposer.decompose(&EmpiricalDensity::new(vec![0.0; 10]).unwrap());
        // The nudged first bin is a mode without spread.
        assert!(components.is_empty());
        assert!(decomposer.report().plain().contains("Decomposition step 1:\n  Mode: 0\n"));
        assert!(!decomposer.report().plain().contains("Fraction re-optimisation"));
    }

    #[test]
    fn test_failed_mean_estimate_keeps_earlier_components() {
        // A gamma component at the origin takes the residual mean without the
        // solver; the second mode needs it and one halving cannot converge.
        let config = DecomposerConfig::builder()
            .component_family(ComponentFamily::Gamma)
            .bisection(SolverConfig {
                tolerance: 1e-9,
                max_iterations: 1,
            })
            .build()
            .unwrap();
        let weights: Vec<f64> = (0..100)
            .map(|i| {
                if i == 0 {
                    100.0
                } else {
                    40.0 * (-((i as f64 - 50.0).powi(2)) / 50.0).exp() + 1.0
                }
            })
            .collect();
        let density = EmpiricalDensity::new(weights).unwrap();

        let mut decomposer = MultiModalDecomposer::with_config(config);
        assert!(decomposer.estimate_mean(50.0, 0.0, 20.0, 100).is_err());

        let components = decomposer.decompose(&density).to_vec();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].mode(), 0);
        assert_relative_eq!(components[0].mean(), density.mean(), epsilon = 1e-9);
        assert_valid_fractions(&components);
        assert_eq!(decomposer.distributions().len(), 1);

        let plain = decomposer.report().plain();
        assert!(plain.contains("Decomposition step 2:\n  Mode: 50\n"));
        assert!(!plain.contains("Decomposition step 3:"));
        assert!(plain.contains("Fraction re-optimisation\n  Current fractions: "));
        assert!(plain.contains("  Optimised fractions: 100%.\n"));
    }

    #[test]
    fn test_gamma_components_and_command() {
        let config = DecomposerConfig::builder()
            .component_family(ComponentFamily::Gamma)
            .show_calculation_command(true)
            .build()
            .unwrap();
        let density = mixture(&[(0.5, 30.0, 8.0), (0.5, 120.0, 15.0)], 250, 5000.0);
        let mut decomposer = MultiModalDecomposer::with_config(config);
        let components = decomposer.decompose(&density).to_vec();
        assert_valid_fractions(&components);

        let command = decomposer.calculation_command().unwrap();
        assert!(command.starts_with("RandomValues("));
        assert!(command.contains(";GammaDistDirect("));
        assert_eq!(command.matches("GammaDistDirect").count(), components.len());
        assert!(decomposer
            .report()
            .html()
            .contains("<h3>Calculation command for the mixture</h3><tt>RandomValues("));
    }

    #[test]
    fn test_process_uses_loaded_counts() {
        let mut decomposer = MultiModalDecomposer::new();
        assert!(!decomposer.process());

        let text = mixture(&[(1.0, 60.0, 15.0)], 200, 5000.0)
            .weights()
            .iter()
            .map(|w| format!("{:.3}", w))
            .collect::<Vec<_>>()
            .join(";");
        assert!(decomposer.load_density(&text));
        assert!(decomposer.process());
        assert_valid_fractions(decomposer.components());
        assert!(decomposer.components()[0].mean() > 30.0);

        decomposer.clear();
        assert!(decomposer.components().is_empty());
        assert!(decomposer.input().is_none());
    }
}
