//! # simstat_fitting: Distribution Fitting and Decomposition (L3)
//!
//! This crate provides:
//! - Loaders turning sample lists, value/count tables and density text into
//!   an [`EmpiricalDensity`] (`input`)
//! - Goodness-of-fit measures between empirical data and a candidate
//!   distribution (`evaluator`)
//! - [`DistributionFitter`], ranking every family of a
//!   [`DistributionRegistry`](simstat_models::DistributionRegistry)
//! - [`MultiModalDecomposer`], splitting a multi-modal density into
//!   log-normal or gamma components
//!
//! Both drivers write their results to a plain-text and an HTML [`Report`].
//!
//! ## Design Principles
//!
//! - **Explicit registry**: the fitter borrows the family catalogue it ranks
//! - **Reproducible ranking**: with the `parallel` feature candidates are
//!   evaluated on the rayon pool but ranked in registry order
//! - **Named constants**: every empirically tuned value lives in `config`
//!
//! ## Feature Flags
//!
//! - `parallel` (default): evaluate fit candidates with rayon
//!
//! ## Usage Examples
//!
//! ```rust
//! use simstat_fitting::{DistributionFitter, FitterInput};
//! use simstat_models::DistributionRegistry;
//!
//! let registry = DistributionRegistry::with_default_families();
//! let input = FitterInput::from_samples_text("3\n4\n4\n5\n5\n5\n6\n6\n7").unwrap();
//!
//! let mut fitter = DistributionFitter::new(&registry);
//! let best = fitter.fit(&input).best().unwrap();
//! assert!(best.squared_error().is_finite());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod density;
pub mod error;
pub mod evaluator;
pub mod fitter;
pub mod input;
pub mod multimodal;
pub mod report;

pub use config::{ComponentFamily, DecomposerConfig, DecomposerConfigBuilder, FitterConfig};
pub use density::EmpiricalDensity;
pub use error::{ConfigError, InputError};
pub use evaluator::{FitEvaluator, FitScores};
pub use fitter::{DistributionFitter, FitCandidate, RankedFits};
pub use input::{FitterInput, LoadInput};
pub use multimodal::{build_example, ModalComponent, MultiModalDecomposer};
pub use report::Report;
