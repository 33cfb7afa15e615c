//! Continuous distribution families.
//!
//! Each module holds the distribution type (an immutable, validated
//! parameter set implementing
//! [`ContinuousDistribution`](simstat_core::traits::ContinuousDistribution))
//! and its unit-struct family implementing
//! [`DistributionFamily`](crate::DistributionFamily).
//!
//! | Family | Parameters | Moment match |
//! |--------|------------|--------------|
//! | Exponential | mean | mean |
//! | Uniform | lower, upper | mean ± √3·sd, observed support when fitting |
//! | Normal | mean, sd | identity |
//! | LogNormal | mean, sd | identity |
//! | Gamma | shape, scale | k = m²/sd², θ = sd²/m |
//! | Weibull | shape, scale | coefficient of variation |
//! | Logistic | location, scale | s = sd·√3/π |
//! | Laplace | location, scale | b = sd/√2 |
//! | Triangular | lower, mode, upper | symmetric, observed support when fitting |
//! | Cauchy | median, scale | median = mean, scale = sd |
//! | OnePoint | point | mean |

pub mod cauchy;
pub mod exponential;
pub mod gamma;
pub mod laplace;
pub mod log_normal;
pub mod logistic;
pub mod normal;
pub mod one_point;
pub mod triangular;
pub mod uniform;
pub mod weibull;

pub use cauchy::{Cauchy, CauchyFamily};
pub use exponential::{Exponential, ExponentialFamily};
pub use gamma::{Gamma, GammaFamily};
pub use laplace::{Laplace, LaplaceFamily};
pub use log_normal::{LogNormal, LogNormalFamily};
pub use logistic::{Logistic, LogisticFamily};
pub use normal::{Normal, NormalFamily};
pub use one_point::{OnePoint, OnePointFamily};
pub use triangular::{Triangular, TriangularFamily};
pub use uniform::{Uniform, UniformFamily};
pub use weibull::{Weibull, WeibullFamily};
