//! Catalogue of distribution families.
//!
//! The registry is built once and then only read, so a single instance can
//! be shared by reference between fitters running on different threads.
//!
//! # Canonical string format
//!
//! ```text
//! Name (p1;p2;...)
//! ```
//!
//! Parameters appear in the family's canonical order using the shortest
//! representation that parses back to the same `f64`.

use simstat_core::traits::ContinuousDistribution;
use simstat_core::types::DistributionError;
use tracing::debug;

use crate::distributions::{
    CauchyFamily, ExponentialFamily, GammaFamily, LaplaceFamily, LogNormalFamily, LogisticFamily,
    NormalFamily, OnePointFamily, TriangularFamily, UniformFamily, WeibullFamily,
};
use crate::family::{BoxedDistribution, DistributionFamily};

/// Ordered set of distribution families.
///
/// Iteration order is registration order; the fitter evaluates candidates
/// in this order, which decides ties between equal scores.
///
/// # Examples
///
/// ```rust
/// use simstat_models::DistributionRegistry;
///
/// let registry = DistributionRegistry::with_default_families();
/// assert!(registry.family("gaussian").is_some());
/// assert_eq!(registry.family("Gaussian").unwrap().name(), "Normal");
///
/// let d = registry.from_canonical_string("Exponential (50)").unwrap();
/// assert_eq!(d.mean(), 50.0);
/// ```
#[derive(Debug, Default)]
pub struct DistributionRegistry {
    families: Vec<Box<dyn DistributionFamily>>,
}

impl DistributionRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            families: Vec::new(),
        }
    }

    /// Registry holding every family shipped with this crate.
    pub fn with_default_families() -> Self {
        let mut registry = Self::new();
        registry
            .register(ExponentialFamily)
            .register(UniformFamily)
            .register(NormalFamily)
            .register(LogNormalFamily)
            .register(GammaFamily)
            .register(WeibullFamily)
            .register(LogisticFamily)
            .register(LaplaceFamily)
            .register(TriangularFamily)
            .register(CauchyFamily)
            .register(OnePointFamily);
        registry
    }

    /// Appends `family`. A family whose name is already registered replaces
    /// the earlier entry in place.
    pub fn register<F>(&mut self, family: F) -> &mut Self
    where
        F: DistributionFamily + 'static,
    {
        let name = family.name();
        match self
            .families
            .iter()
            .position(|f| f.name().eq_ignore_ascii_case(name))
        {
            Some(index) => {
                debug!(family = name, "replacing registered family");
                self.families[index] = Box::new(family);
            }
            None => {
                debug!(family = name, "registering family");
                self.families.push(Box::new(family));
            }
        }
        self
    }

    /// Registered families in registration order.
    pub fn families(&self) -> impl Iterator<Item = &dyn DistributionFamily> + '_ {
        self.families.iter().map(|f| f.as_ref())
    }

    /// Number of registered families.
    #[inline]
    pub fn len(&self) -> usize {
        self.families.len()
    }

    /// Whether no family is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Canonical names in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.families.iter().map(|f| f.name()).collect()
    }

    /// Family by canonical name or alias, ignoring ASCII case.
    pub fn family(&self, name: &str) -> Option<&dyn DistributionFamily> {
        let name = name.trim();
        self.families()
            .find(|f| f.name().eq_ignore_ascii_case(name))
            .or_else(|| {
                self.families().find(|f| {
                    f.aliases()
                        .iter()
                        .any(|alias| alias.eq_ignore_ascii_case(name))
                })
            })
    }

    /// `"Name (p1;p2;...)"` for `distribution`.
    pub fn to_canonical_string(&self, distribution: &dyn ContinuousDistribution) -> String {
        let parameters = distribution
            .parameters()
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(";");
        format!("{} ({})", distribution.name(), parameters)
    }

    /// Parses a canonical string.
    ///
    /// # Errors
    ///
    /// - `ParseError` for text not of the form `Name (p1;p2;...)`
    /// - `UnknownFamily` if no family matches the name
    /// - the family's own errors for wrong parameter counts or values
    pub fn from_canonical_string(&self, text: &str) -> Result<BoxedDistribution, DistributionError> {
        let text = text.trim();
        let open = text
            .find('(')
            .ok_or_else(|| DistributionError::ParseError(format!("missing '(' in \"{}\"", text)))?;
        let inner = text[open + 1..]
            .strip_suffix(')')
            .ok_or_else(|| DistributionError::ParseError(format!("missing ')' in \"{}\"", text)))?;

        let name = text[..open].trim();
        if name.is_empty() {
            return Err(DistributionError::ParseError(format!(
                "missing family name in \"{}\"",
                text
            )));
        }
        let family = self
            .family(name)
            .ok_or_else(|| DistributionError::UnknownFamily(name.to_string()))?;

        let parameters = if inner.trim().is_empty() {
            Vec::new()
        } else {
            inner
                .split(';')
                .map(|token| {
                    let token = token.trim();
                    token.parse::<f64>().map_err(|_| {
                        DistributionError::ParseError(format!("invalid number \"{}\"", token))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?
        };

        family.from_parameters(&parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order() {
        let registry = DistributionRegistry::with_default_families();
        assert_eq!(
            registry.names(),
            vec![
                "Exponential",
                "Uniform",
                "Normal",
                "LogNormal",
                "Gamma",
                "Weibull",
                "Logistic",
                "Laplace",
                "Triangular",
                "Cauchy",
                "OnePoint"
            ]
        );
        assert_eq!(registry.len(), 11);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_lookup_ignores_case_and_aliases() {
        let registry = DistributionRegistry::with_default_families();
        assert_eq!(registry.family("lognormal").map(|f| f.name()), Some("LogNormal"));
        assert_eq!(registry.family("  GAMMA ").map(|f| f.name()), Some("Gamma"));
        assert_eq!(registry.family("GammaDistDirect").map(|f| f.name()), Some("Gamma"));
        assert!(registry.family("Zipf").is_none());
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = DistributionRegistry::new();
        assert!(registry.is_empty());
        registry.register(NormalFamily).register(NormalFamily);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_canonical_string_format() {
        let registry = DistributionRegistry::with_default_families();
        let d = registry.from_canonical_string("Triangular (0;1.5;3)").unwrap();
        assert_eq!(registry.to_canonical_string(d.as_ref()), "Triangular (0;1.5;3)");

        let d = registry.from_canonical_string("normal( 0.1 ; 2 )").unwrap();
        assert_eq!(registry.to_canonical_string(d.as_ref()), "Normal (0.1;2)");
    }

    #[test]
    fn test_parse_errors() {
        let registry = DistributionRegistry::with_default_families();
        assert!(matches!(
            registry.from_canonical_string("Normal 1;2"),
            Err(DistributionError::ParseError(_))
        ));
        assert!(matches!(
            registry.from_canonical_string("Normal (1;2"),
            Err(DistributionError::ParseError(_))
        ));
        assert!(matches!(
            registry.from_canonical_string("(1;2)"),
            Err(DistributionError::ParseError(_))
        ));
        assert!(matches!(
            registry.from_canonical_string("Normal (1;x)"),
            Err(DistributionError::ParseError(_))
        ));
        assert!(matches!(
            registry.from_canonical_string("Zipf (1)"),
            Err(DistributionError::UnknownFamily(_))
        ));
        assert!(matches!(
            registry.from_canonical_string("Normal (1)"),
            Err(DistributionError::ParameterCount { expected: 2, got: 1, .. })
        ));
        assert!(matches!(
            registry.from_canonical_string("Normal (1;-1)"),
            Err(DistributionError::InvalidParameter { name: "sd", .. })
        ));
    }
}
