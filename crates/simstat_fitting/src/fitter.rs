//! Single-family distribution fitter.
//!
//! Every family of a [`DistributionRegistry`] is asked for a candidate with
//! the moments and observed support of the data. Candidates are scored by
//! the [`FitEvaluator`] and ranked by ascending squared error; families that
//! cannot represent the data are listed as declined.
//!
//! With the `parallel` feature the candidates are evaluated on the rayon
//! pool. Ranking still happens in registry order, so the result does not
//! depend on the feature.

use simstat_core::traits::ContinuousDistribution;
use simstat_models::family::BoxedDistribution;
use simstat_models::{DistributionFamily, DistributionRegistry};
use tracing::{debug, info, warn};

use crate::config::FitterConfig;
use crate::evaluator::{FitEvaluator, FitScores};
use crate::input::{FitterInput, LoadInput};
use crate::report::{format_number, format_percent, Report};

/// One evaluated candidate with its report fragments.
#[derive(Debug)]
pub struct FitCandidate {
    distribution: BoxedDistribution,
    summary: String,
    scores: FitScores,
    plain: String,
    html: String,
}

impl FitCandidate {
    fn new(family: &dyn DistributionFamily, distribution: BoxedDistribution, scores: FitScores) -> Self {
        let summary = parameter_summary(family, distribution.as_ref());
        let name = distribution.name();
        let error = format_error(scores.squared_error);
        let ks = format_percent(scores.ks_p_value);
        let chi_squared = format_percent(scores.chi_squared_p_value);

        let mut plain = format!(
            "{} ({})\nMean squared deviation: {}\nKS p-value: {}\nChi² p-value: {}\n",
            name, summary, error, ks, chi_squared
        );
        let mut html = format!(
            "<u>{}</u><br>\n({})<br>Mean squared deviation: <b>{}</b><br>KS p-value: {}<br>Chi² p-value: {}<br>",
            name, summary, error, ks, chi_squared
        );
        if let Some(p) = scores.anderson_darling_p_value {
            let ad = format_percent(p);
            plain.push_str(&format!("Anderson–Darling p-value: {}\n", ad));
            html.push_str(&format!("Anderson–Darling p-value: {}<br>", ad));
        }

        Self {
            distribution,
            summary,
            scores,
            plain,
            html,
        }
    }

    /// Fitted distribution.
    #[inline]
    pub fn distribution(&self) -> &dyn ContinuousDistribution {
        self.distribution.as_ref()
    }

    /// Parameters as `name=value` pairs.
    #[inline]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// All scores.
    #[inline]
    pub fn scores(&self) -> &FitScores {
        &self.scores
    }

    /// Squared-difference score; lower is better.
    #[inline]
    pub fn squared_error(&self) -> f64 {
        self.scores.squared_error
    }

    /// Kolmogorov–Smirnov p-value.
    #[inline]
    pub fn ks_p_value(&self) -> f64 {
        self.scores.ks_p_value
    }

    /// χ² p-value.
    #[inline]
    pub fn chi_squared_p_value(&self) -> f64 {
        self.scores.chi_squared_p_value
    }

    /// Anderson–Darling p-value for normal candidates.
    #[inline]
    pub fn anderson_darling_p_value(&self) -> Option<f64> {
        self.scores.anderson_darling_p_value
    }

    /// Plain-text report fragment.
    #[inline]
    pub fn plain(&self) -> &str {
        &self.plain
    }

    /// HTML report fragment.
    #[inline]
    pub fn html(&self) -> &str {
        &self.html
    }
}

/// Candidates ordered by ascending squared error.
///
/// Equal errors keep their insertion order.
#[derive(Debug, Default)]
pub struct RankedFits {
    fits: Vec<FitCandidate>,
}

impl RankedFits {
    /// Empty ranking.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `candidate` after every candidate with an equal or lower
    /// error.
    pub fn insert(&mut self, candidate: FitCandidate) {
        let index = self
            .fits
            .partition_point(|f| f.squared_error() <= candidate.squared_error());
        self.fits.insert(index, candidate);
    }

    /// Accepted best fit.
    #[inline]
    pub fn best(&self) -> Option<&FitCandidate> {
        self.fits.first()
    }

    /// Candidates, best first.
    pub fn iter(&self) -> impl Iterator<Item = &FitCandidate> + '_ {
        self.fits.iter()
    }

    /// Number of ranked candidates.
    #[inline]
    pub fn len(&self) -> usize {
        self.fits.len()
    }

    /// Whether no candidate was ranked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fits.is_empty()
    }

    /// Removes every candidate.
    pub fn clear(&mut self) {
        self.fits.clear();
    }
}

/// Ranks every registered family against loaded measurement data.
///
/// # Examples
///
/// ```rust
/// use simstat_fitting::input::LoadInput;
/// use simstat_fitting::DistributionFitter;
/// use simstat_models::DistributionRegistry;
///
/// let registry = DistributionRegistry::with_default_families();
/// let mut fitter = DistributionFitter::new(&registry);
///
/// assert!(fitter.load_density("1;4;6;4;1"));
/// assert!(fitter.process());
///
/// let best = fitter.fits().best().unwrap();
/// assert!(best.squared_error() <= fitter.fits().iter().last().unwrap().squared_error());
/// assert!(fitter.report().plain().starts_with("Compared distributions (11)"));
/// ```
#[derive(Debug)]
pub struct DistributionFitter<'r> {
    registry: &'r DistributionRegistry,
    config: FitterConfig,
    input: Option<FitterInput>,
    report: Report,
    fits: RankedFits,
    declined: Vec<&'static str>,
}

impl<'r> DistributionFitter<'r> {
    /// Fitter over `registry` with default settings.
    pub fn new(registry: &'r DistributionRegistry) -> Self {
        Self::with_config(registry, FitterConfig::default())
    }

    /// Fitter over `registry` with `config`.
    pub fn with_config(registry: &'r DistributionRegistry, config: FitterConfig) -> Self {
        Self {
            registry,
            config,
            input: None,
            report: Report::new(),
            fits: RankedFits::new(),
            declined: Vec::new(),
        }
    }

    /// Active settings.
    #[inline]
    pub fn config(&self) -> &FitterConfig {
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

    /// Ranking of the last run.
    #[inline]
    pub fn fits(&self) -> &RankedFits {
        &self.fits
    }

    /// Families that declined the data in the last run.
    #[inline]
    pub fn declined(&self) -> &[&'static str] {
        &self.declined
    }

    /// Ranked distributions of the last run, best first.
    pub fn distributions(&self) -> Vec<&dyn ContinuousDistribution> {
        self.fits.iter().map(|f| f.distribution()).collect()
    }

    /// Discards input, results and report.
    pub fn clear(&mut self) {
        self.input = None;
        self.report.clear();
        self.fits.clear();
        self.declined.clear();
    }

    /// Fits the loaded input.
    ///
    /// Returns `false` and reports the problem if nothing is loaded.
    pub fn process(&mut self) -> bool {
        match self.input.take() {
            Some(input) => {
                self.fit(&input);
                self.input = Some(input);
                true
            }
            None => {
                warn!("fit requested without input");
                self.report.error("No measurement values loaded");
                false
            }
        }
    }

    /// Ranks every family against `input` and returns the ranking.
    pub fn fit(&mut self, input: &FitterInput) -> &RankedFits {
        self.fits.clear();
        self.declined.clear();

        let samples = input.samples();
        let mean = samples.mean();
        let sd = samples.standard_deviation();
        let (min, max) = samples.support_bounds().unwrap_or((0, 0));
        debug!(
            bins = samples.len(),
            count = input.count(),
            mean,
            sd,
            min,
            max,
            "fitting families"
        );

        let registry = self.registry;
        self.report
            .heading(&format!("Compared distributions ({})", registry.len()));

        let evaluator = FitEvaluator::new(input, &self.config);
        let families: Vec<&dyn DistributionFamily> = registry.families().collect();
        let outcomes = evaluate_families(&families, &evaluator, mean, sd, min as f64, max as f64);

        for (family, outcome) in families.iter().zip(outcomes) {
            match outcome {
                Some(candidate) => {
                    debug!(
                        family = family.name(),
                        error = candidate.squared_error(),
                        ks = candidate.ks_p_value(),
                        chi_squared = candidate.chi_squared_p_value(),
                        "candidate evaluated"
                    );
                    self.fits.insert(candidate);
                }
                None => {
                    debug!(family = family.name(), "no fit possible");
                    self.declined.push(family.name());
                }
            }
        }

        self.write_ranking();
        if let Some(best) = self.fits.best() {
            info!(
                family = best.distribution().name(),
                parameters = best.summary(),
                error = best.squared_error(),
                "best fit"
            );
        }
        &self.fits
    }

    fn write_ranking(&mut self) {
        let report = &mut self.report;
        report.heading("Best fit for");
        report.raw("", "<ol>");
        for (rank, fit) in self.fits.iter().enumerate() {
            report.raw(&format!("{}. {}", rank + 1, fit.plain()), "");
            report.raw("", &format!("<li>{}</li>", fit.html()));
        }
        for name in &self.declined {
            report.raw(
                &format!("{}\nNo fit possible for the current measurement data.\n", name),
                &format!(
                    "<li><u>{}</u><br>\nNo fit possible for the current measurement data.<br></li>",
                    name
                ),
            );
        }
        report.raw("", "</ol>");
    }
}

impl LoadInput for DistributionFitter<'_> {
    fn report_mut(&mut self) -> &mut Report {
        &mut self.report
    }

    fn set_input(&mut self, input: FitterInput) {
        self.input = Some(input);
    }
}

fn evaluate_family(
    family: &dyn DistributionFamily,
    evaluator: &FitEvaluator<'_>,
    mean: f64,
    sd: f64,
    min: f64,
    max: f64,
) -> Option<FitCandidate> {
    let distribution = family.construct_for_fit(mean, sd, min, max)?;
    let scores = evaluator.evaluate(distribution.as_ref())?;
    Some(FitCandidate::new(family, distribution, scores))
}

#[cfg(feature = "parallel")]
fn evaluate_families(
    families: &[&dyn DistributionFamily],
    evaluator: &FitEvaluator<'_>,
    mean: f64,
    sd: f64,
    min: f64,
    max: f64,
) -> Vec<Option<FitCandidate>> {
    use rayon::prelude::*;

    families
        .par_iter()
        .map(|family| evaluate_family(*family, evaluator, mean, sd, min, max))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn evaluate_families(
    families: &[&dyn DistributionFamily],
    evaluator: &FitEvaluator<'_>,
    mean: f64,
    sd: f64,
    min: f64,
    max: f64,
) -> Vec<Option<FitCandidate>> {
    families
        .iter()
        .map(|family| evaluate_family(*family, evaluator, mean, sd, min, max))
        .collect()
}

fn parameter_summary(family: &dyn DistributionFamily, distribution: &dyn ContinuousDistribution) -> String {
    family
        .parameter_names()
        .iter()
        .zip(distribution.parameters())
        .map(|(name, value)| format!("{}={}", name, format_number(value, 3)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Score with three decimals, or nine if three show nothing.
fn format_error(error: f64) -> String {
    let text = format_number(error, 3);
    if text == "0" {
        format_number(error, 9)
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::density::EmpiricalDensity;
    use simstat_models::distributions::{ExponentialFamily, NormalFamily, UniformFamily};

    fn candidate(error: f64, mean: f64) -> FitCandidate {
        let distribution = NormalFamily.construct(mean, 1.0).unwrap();
        FitCandidate::new(
            &NormalFamily,
            distribution,
            FitScores {
                squared_error: error,
                ks_p_value: 0.5,
                chi_squared_p_value: 0.25,
                anderson_darling_p_value: Some(0.125),
            },
        )
    }

    // ========================================================================
    // RankedFits
    // ========================================================================

    #[test]
    fn test_ranking_ascending_with_stable_ties() {
        let mut fits = RankedFits::new();
        fits.insert(candidate(0.3, 1.0));
        fits.insert(candidate(0.1, 2.0));
        fits.insert(candidate(0.3, 3.0));
        fits.insert(candidate(f64::INFINITY, 4.0));
        fits.insert(candidate(0.1, 5.0));

        let means: Vec<f64> = fits.iter().map(|f| f.distribution().mean()).collect();
        assert_eq!(means, vec![2.0, 5.0, 1.0, 3.0, 4.0]);
        assert_eq!(fits.best().map(|f| f.squared_error()), Some(0.1));
        assert_eq!(fits.len(), 5);
    }

    #[test]
    fn test_candidate_report_fragments() {
        let c = candidate(0.00001234, 10.0);
        assert_eq!(c.summary(), "mean=10, sd=1");
        assert_eq!(
            c.plain(),
            "Normal (mean=10, sd=1)\nMean squared deviation: 0.00001234\nKS p-value: 50%\n\
             Chi² p-value: 25%\nAnderson–Darling p-value: 12.5%\n"
        );
        assert!(c.html().starts_with("<u>Normal</u><br>\n(mean=10, sd=1)<br>"));
        assert!(c.html().contains("<b>0.00001234</b>"));
    }

    #[test]
    fn test_format_error_switches_precision() {
        assert_eq!(format_error(0.1234), "0.123");
        assert_eq!(format_error(0.0000004), "0.0000004");
        assert_eq!(format_error(0.0), "0");
    }

    // ========================================================================
    // DistributionFitter
    // ========================================================================

    fn small_registry() -> DistributionRegistry {
        let mut registry = DistributionRegistry::new();
        registry
            .register(ExponentialFamily)
            .register(UniformFamily)
            .register(NormalFamily);
        registry
    }

    #[test]
    fn test_process_without_input_fails() {
        let registry = small_registry();
        let mut fitter = DistributionFitter::new(&registry);
        assert!(!fitter.process());
        assert!(fitter.report().plain().contains("No measurement values loaded"));
        assert!(fitter.fits().is_empty());
    }

    #[test]
    fn test_flat_data_prefers_uniform() {
        let registry = small_registry();
        let mut fitter = DistributionFitter::new(&registry);
        let input =
            FitterInput::from_density(EmpiricalDensity::new(vec![5.0; 20]).unwrap()).unwrap();
        let best = fitter.fit(&input).best().unwrap();
        assert_eq!(best.distribution().name(), "Uniform");
        assert_eq!(fitter.fits().len(), 3);
        assert!(fitter.declined().is_empty());
    }

    #[test]
    fn test_declined_families_are_reported() {
        // A single observation has zero spread, which no family here accepts
        // except the exponential.
        let registry = small_registry();
        let mut fitter = DistributionFitter::new(&registry);
        assert!(fitter.load_samples("4;4;4"));
        assert!(fitter.process());
        assert_eq!(fitter.fits().len(), 1);
        assert_eq!(fitter.declined(), &["Uniform", "Normal"]);

        let plain = fitter.report().plain();
        assert!(plain.starts_with("Compared distributions (3)\nBest fit for\n1. Exponential (mean=4)\n"));
        assert!(plain.contains("Normal\nNo fit possible for the current measurement data.\n"));
        let html = fitter.report().html();
        assert!(html.contains("<h3>Best fit for</h3>\n<ol><li><u>Exponential</u>"));
        assert!(html.ends_with("</ol>"));
    }

    #[test]
    fn test_clear_resets_state() {
        let registry = small_registry();
        let mut fitter = DistributionFitter::new(&registry);
        assert!(fitter.load_samples("1;2;2;3"));
        assert!(fitter.process());
        assert!(!fitter.fits().is_empty());
        fitter.clear();
        assert!(fitter.input().is_none());
        assert!(fitter.fits().is_empty());
        assert!(fitter.report().is_empty());
    }
}
