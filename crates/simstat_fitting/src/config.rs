//! Fitter and decomposer configuration.
//!
//! Both configurations default to the empirically tuned constants below and
//! can be loaded from TOML text. Changing a constant changes fitting
//! results, so the defaults are covered by tests.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use simstat_core::math::solvers::SolverConfig;

use crate::error::ConfigError;

/// Upper limit on the support points scanned by the squared-difference score.
pub const SUPPORT_POINT_CAP: usize = 1_000_000;

/// Candidate CDF value beyond which the KS and χ² scans stop.
pub const CDF_CUTOFF: f64 = 0.9999;

/// Empirical standard deviation below which the data count as one point.
pub const ONE_POINT_SD_THRESHOLD: f64 = 1e-5;

/// Distance between a one-point candidate and the empirical mean that
/// still counts as a match.
pub const ONE_POINT_MEAN_TOLERANCE: f64 = 0.01;

/// Normalised density values above this are skipped by the score.
pub const DENSITY_OVERFLOW_GUARD: f64 = 1e100;

/// Maximum number of extracted components.
pub const MAX_COMPONENTS: usize = 4;

/// Explained fraction at which extraction stops.
pub const EXPLAINED_THRESHOLD: f64 = 0.99;

/// Allowed ratio of residual to component density at the mode for the
/// first component.
pub const FIRST_COMPONENT_OVERSHOOT: f64 = 0.95;

/// Allowed ratio for every later component.
pub const SUBSEQUENT_COMPONENT_OVERSHOOT: f64 = 1.1;

/// Factor applied to the trial standard deviation per shrink round.
pub const SD_SHRINK_FACTOR: f64 = 0.8;

/// Maximum number of shrink rounds per component.
pub const MAX_SHRINK_ROUNDS: usize = 10;

/// Absolute accuracy of the component mean estimate.
pub const BISECTION_TOLERANCE: f64 = 1e-6;

/// Iteration cap of the component mean estimate.
pub const BISECTION_MAX_ITERATIONS: usize = 100;

/// Fraction change per coordinate-descent move.
pub const FRACTION_STEP: f64 = 0.01;

/// Sweeps without improvement that end the fraction optimisation.
pub const STALL_SWEEPS: usize = 3;

/// Hard cap on fraction optimisation sweeps.
pub const MAX_SWEEPS: usize = 10_000;

/// Settings of the goodness-of-fit evaluator.
///
/// # Examples
///
/// ```rust
/// use simstat_fitting::FitterConfig;
///
/// let config = FitterConfig::from_toml_str("cdf_cutoff = 0.999").unwrap();
/// assert_eq!(config.cdf_cutoff, 0.999);
/// assert_eq!(config.support_point_cap, 1_000_000);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FitterConfig {
    /// Upper limit on the support points of the squared-difference score
    pub support_point_cap: usize,
    /// Candidate CDF value that ends the KS and χ² scans
    pub cdf_cutoff: f64,
    /// Empirical sd below which the one-point rule applies
    pub one_point_sd_threshold: f64,
    /// Mean tolerance of the one-point rule
    pub one_point_mean_tolerance: f64,
    /// Normalised densities above this value are skipped
    pub density_overflow_guard: f64,
}

impl Default for FitterConfig {
    fn default() -> Self {
        Self {
            support_point_cap: SUPPORT_POINT_CAP,
            cdf_cutoff: CDF_CUTOFF,
            one_point_sd_threshold: ONE_POINT_SD_THRESHOLD,
            one_point_mean_tolerance: ONE_POINT_MEAN_TOLERANCE,
            density_overflow_guard: DENSITY_OVERFLOW_GUARD,
        }
    }
}

impl FitterConfig {
    /// Default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates TOML text; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// `Parse` for malformed TOML or unknown keys, otherwise the errors of
    /// [`validate`](Self::validate).
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the support cap is 0, the cut-off is not in
    /// (0, 1], or a threshold is negative or not finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.support_point_cap == 0 {
            return Err(invalid("support_point_cap", "must be positive"));
        }
        if !(self.cdf_cutoff > 0.0 && self.cdf_cutoff <= 1.0) {
            return Err(invalid("cdf_cutoff", "must be in (0, 1]"));
        }
        for (name, value) in [
            ("one_point_sd_threshold", self.one_point_sd_threshold),
            ("one_point_mean_tolerance", self.one_point_mean_tolerance),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(name, "must be finite and non-negative"));
            }
        }
        if !(self.density_overflow_guard > 0.0) {
            return Err(invalid("density_overflow_guard", "must be positive"));
        }
        Ok(())
    }
}

/// Family of the components extracted by the decomposer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum ComponentFamily {
    /// Log-normal components.
    #[default]
    LogNormal,
    /// Gamma components.
    Gamma,
}

impl ComponentFamily {
    /// Display name of the family.
    pub fn name(&self) -> &'static str {
        match self {
            ComponentFamily::LogNormal => "LogNormal",
            ComponentFamily::Gamma => "Gamma",
        }
    }

    /// Function name used in calculation commands.
    pub fn command_name(&self) -> &'static str {
        match self {
            ComponentFamily::LogNormal => "LogNormalDist",
            ComponentFamily::Gamma => "GammaDistDirect",
        }
    }
}

impl FromStr for ComponentFamily {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lognormal" | "log-normal" | "log_normal" => Ok(ComponentFamily::LogNormal),
            "gamma" => Ok(ComponentFamily::Gamma),
            _ => Err(ConfigError::UnknownComponentFamily(s.to_string())),
        }
    }
}

impl fmt::Display for ComponentFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn deserialize_component_family<'de, D>(deserializer: D) -> Result<ComponentFamily, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    ComponentFamily::from_str(&s).map_err(serde::de::Error::custom)
}

/// Settings of the multi-modal decomposer.
///
/// Use [`DecomposerConfigBuilder`] or [`from_toml_str`](Self::from_toml_str)
/// to construct validated instances.
///
/// # Examples
///
/// ```rust
/// use simstat_fitting::{ComponentFamily, DecomposerConfig};
///
/// let config = DecomposerConfig::builder()
///     .component_family(ComponentFamily::Gamma)
///     .max_components(3)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.max_components(), 3);
/// assert_eq!(config.first_overshoot(), 0.95);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecomposerConfig {
    #[serde(deserialize_with = "deserialize_component_family")]
    component_family: ComponentFamily,
    max_components: usize,
    explained_threshold: f64,
    first_overshoot: f64,
    subsequent_overshoot: f64,
    sd_shrink_factor: f64,
    max_shrink_rounds: usize,
    bisection_tolerance: f64,
    bisection_max_iterations: usize,
    fraction_step: f64,
    stall_sweeps: usize,
    max_sweeps: usize,
    show_calculation_command: bool,
}

impl Default for DecomposerConfig {
    fn default() -> Self {
        Self {
            component_family: ComponentFamily::LogNormal,
            max_components: MAX_COMPONENTS,
            explained_threshold: EXPLAINED_THRESHOLD,
            first_overshoot: FIRST_COMPONENT_OVERSHOOT,
            subsequent_overshoot: SUBSEQUENT_COMPONENT_OVERSHOOT,
            sd_shrink_factor: SD_SHRINK_FACTOR,
            max_shrink_rounds: MAX_SHRINK_ROUNDS,
            bisection_tolerance: BISECTION_TOLERANCE,
            bisection_max_iterations: BISECTION_MAX_ITERATIONS,
            fraction_step: FRACTION_STEP,
            stall_sweeps: STALL_SWEEPS,
            max_sweeps: MAX_SWEEPS,
            show_calculation_command: false,
        }
    }
}

impl DecomposerConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> DecomposerConfigBuilder {
        DecomposerConfigBuilder::default()
    }

    /// Parses and validates TOML text; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// `Parse` for malformed TOML, unknown keys or an unknown component
    /// family, otherwise the errors of [`validate`](Self::validate).
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Family of the extracted components.
    #[inline]
    pub fn component_family(&self) -> ComponentFamily {
        self.component_family
    }

    /// Maximum number of extracted components.
    #[inline]
    pub fn max_components(&self) -> usize {
        self.max_components
    }

    /// Explained fraction at which extraction stops.
    #[inline]
    pub fn explained_threshold(&self) -> f64 {
        self.explained_threshold
    }

    /// Allowed overshoot for the first component.
    #[inline]
    pub fn first_overshoot(&self) -> f64 {
        self.first_overshoot
    }

    /// Allowed overshoot for later components.
    #[inline]
    pub fn subsequent_overshoot(&self) -> f64 {
        self.subsequent_overshoot
    }

    /// Standard deviation shrink factor per round.
    #[inline]
    pub fn sd_shrink_factor(&self) -> f64 {
        self.sd_shrink_factor
    }

    /// Maximum shrink rounds per component.
    #[inline]
    pub fn max_shrink_rounds(&self) -> usize {
        self.max_shrink_rounds
    }

    /// Solver settings for the component mean estimate.
    #[inline]
    pub fn bisection(&self) -> SolverConfig<f64> {
        SolverConfig {
            tolerance: self.bisection_tolerance,
            max_iterations: self.bisection_max_iterations,
        }
    }

    /// Fraction change per coordinate-descent move.
    #[inline]
    pub fn fraction_step(&self) -> f64 {
        self.fraction_step
    }

    /// Sweeps without improvement that end the fraction optimisation.
    #[inline]
    pub fn stall_sweeps(&self) -> usize {
        self.stall_sweeps
    }

    /// Hard cap on fraction optimisation sweeps.
    #[inline]
    pub fn max_sweeps(&self) -> usize {
        self.max_sweeps
    }

    /// Whether the report ends with a calculation command.
    #[inline]
    pub fn show_calculation_command(&self) -> bool {
        self.show_calculation_command
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidParameter` if:
    /// - `max_components`, `max_shrink_rounds`, `bisection_max_iterations`,
    ///   `stall_sweeps` or `max_sweeps` is 0
    /// - `explained_threshold` is not in (0, 1]
    /// - an overshoot or the bisection tolerance is not positive
    /// - `sd_shrink_factor` is not in (0, 1)
    /// - `fraction_step` is not in (0, 0.5]
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("max_components", self.max_components),
            ("max_shrink_rounds", self.max_shrink_rounds),
            ("bisection_max_iterations", self.bisection_max_iterations),
            ("stall_sweeps", self.stall_sweeps),
            ("max_sweeps", self.max_sweeps),
        ] {
            if value == 0 {
                return Err(invalid(name, "must be positive"));
            }
        }
        if !(self.explained_threshold > 0.0 && self.explained_threshold <= 1.0) {
            return Err(invalid("explained_threshold", "must be in (0, 1]"));
        }
        for (name, value) in [
            ("first_overshoot", self.first_overshoot),
            ("subsequent_overshoot", self.subsequent_overshoot),
            ("bisection_tolerance", self.bisection_tolerance),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(name, "must be finite and positive"));
            }
        }
        if !(self.sd_shrink_factor > 0.0 && self.sd_shrink_factor < 1.0) {
            return Err(invalid("sd_shrink_factor", "must be in (0, 1)"));
        }
        if !(self.fraction_step > 0.0 && self.fraction_step <= 0.5) {
            return Err(invalid("fraction_step", "must be in (0, 0.5]"));
        }
        Ok(())
    }
}

/// Builder for [`DecomposerConfig`]; unset fields keep their defaults.
#[derive(Clone, Debug, Default)]
pub struct DecomposerConfigBuilder {
    component_family: Option<ComponentFamily>,
    max_components: Option<usize>,
    explained_threshold: Option<f64>,
    first_overshoot: Option<f64>,
    subsequent_overshoot: Option<f64>,
    sd_shrink_factor: Option<f64>,
    max_shrink_rounds: Option<usize>,
    bisection: Option<SolverConfig<f64>>,
    fraction_step: Option<f64>,
    stall_sweeps: Option<usize>,
    max_sweeps: Option<usize>,
    show_calculation_command: Option<bool>,
}

impl DecomposerConfigBuilder {
    /// Sets the component family.
    #[inline]
    pub fn component_family(mut self, family: ComponentFamily) -> Self {
        self.component_family = Some(family);
        self
    }

    /// Sets the maximum number of components.
    #[inline]
    pub fn max_components(mut self, max_components: usize) -> Self {
        self.max_components = Some(max_components);
        self
    }

    /// Sets the explained fraction at which extraction stops.
    #[inline]
    pub fn explained_threshold(mut self, threshold: f64) -> Self {
        self.explained_threshold = Some(threshold);
        self
    }

    /// Sets the overshoot allowed for the first and for later components.
    #[inline]
    pub fn overshoot(mut self, first: f64, subsequent: f64) -> Self {
        self.first_overshoot = Some(first);
        self.subsequent_overshoot = Some(subsequent);
        self
    }

    /// Sets the shrink factor and the maximum number of shrink rounds.
    #[inline]
    pub fn sd_shrink(mut self, factor: f64, max_rounds: usize) -> Self {
        self.sd_shrink_factor = Some(factor);
        self.max_shrink_rounds = Some(max_rounds);
        self
    }

    /// Sets the solver settings of the component mean estimate.
    #[inline]
    pub fn bisection(mut self, config: SolverConfig<f64>) -> Self {
        self.bisection = Some(config);
        self
    }

    /// Sets the fraction change per coordinate-descent move.
    #[inline]
    pub fn fraction_step(mut self, step: f64) -> Self {
        self.fraction_step = Some(step);
        self
    }

    /// Sets the stall count and the hard sweep cap of the optimisation.
    #[inline]
    pub fn sweeps(mut self, stall: usize, max: usize) -> Self {
        self.stall_sweeps = Some(stall);
        self.max_sweeps = Some(max);
        self
    }

    /// Enables or disables the calculation command in the report.
    #[inline]
    pub fn show_calculation_command(mut self, show: bool) -> Self {
        self.show_calculation_command = Some(show);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the resulting configuration fails
    /// [`DecomposerConfig::validate`].
    pub fn build(self) -> Result<DecomposerConfig, ConfigError> {
        let defaults = DecomposerConfig::default();
        let bisection = self.bisection.unwrap_or_else(|| defaults.bisection());
        let config = DecomposerConfig {
            component_family: self.component_family.unwrap_or(defaults.component_family),
            max_components: self.max_components.unwrap_or(defaults.max_components),
            explained_threshold: self
                .explained_threshold
                .unwrap_or(defaults.explained_threshold),
            first_overshoot: self.first_overshoot.unwrap_or(defaults.first_overshoot),
            subsequent_overshoot: self
                .subsequent_overshoot
                .unwrap_or(defaults.subsequent_overshoot),
            sd_shrink_factor: self.sd_shrink_factor.unwrap_or(defaults.sd_shrink_factor),
            max_shrink_rounds: self.max_shrink_rounds.unwrap_or(defaults.max_shrink_rounds),
            bisection_tolerance: bisection.tolerance,
            bisection_max_iterations: bisection.max_iterations,
            fraction_step: self.fraction_step.unwrap_or(defaults.fraction_step),
            stall_sweeps: self.stall_sweeps.unwrap_or(defaults.stall_sweeps),
            max_sweeps: self.max_sweeps.unwrap_or(defaults.max_sweeps),
            show_calculation_command: self
                .show_calculation_command
                .unwrap_or(defaults.show_calculation_command),
        };

        config.validate()?;
        Ok(config)
    }
}

fn invalid(name: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidParameter {
        name,
        value: value.to_string(),
    }
}
