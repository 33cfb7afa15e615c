//! Gamma variates by rejection.
//!
//! - `shape < 1`: Ahrens–Dieter (1974) Algorithm GS
//! - `shape >= 1`: Marsaglia–Tsang (2000) squeeze method on a normal draw
//! - `|shape - 1| < 1e-10`: exponential with mean `scale`

use std::f64::consts::E;

use simstat_core::traits::RandomSource;

/// Shapes this close to 1 are sampled as exponential.
pub const EXPONENTIAL_SHAPE_TOLERANCE: f64 = 1e-10;

/// Squeeze constant of the Marsaglia–Tsang acceptance test.
const SQUEEZE: f64 = 0.0331;

/// One Gamma(`shape`, `scale`) variate.
///
/// Both parameters must be positive; the rejection loops terminate with
/// probability one.
pub fn sample_gamma(shape: f64, scale: f64, rng: &mut dyn RandomSource) -> f64 {
    if (shape - 1.0).abs() < EXPONENTIAL_SHAPE_TOLERANCE {
        return -(1.0 - rng.next_double()).ln() * scale;
    }
    if shape < 1.0 {
        ahrens_dieter_gs(shape, rng) * scale
    } else {
        marsaglia_tsang(shape, rng) * scale
    }
}

fn ahrens_dieter_gs(shape: f64, rng: &mut dyn RandomSource) -> f64 {
    let b = 1.0 + shape / E;
    loop {
        let p = b * rng.next_double();
        if p <= 1.0 {
            let x = p.powf(1.0 / shape);
            if rng.next_double() <= (-x).exp() {
                return x;
            }
        } else {
            let x = -((b - p) / shape).ln();
            if rng.next_double() <= x.powf(shape - 1.0) {
                return x;
            }
        }
    }
}

fn marsaglia_tsang(shape: f64, rng: &mut dyn RandomSource) -> f64 {
    let d = shape - 1.0 / 3.0;
    let c = 1.0 / (9.0 * d).sqrt();
    loop {
        let x = rng.next_gaussian();
        let t = 1.0 + c * x;
        let v = t * t * t;
        if v <= 0.0 {
            continue;
        }
        let x2 = x * x;
        let u = rng.next_double();
        if u < 1.0 - SQUEEZE * x2 * x2 {
            return d * v;
        }
        if u.ln() < 0.5 * x2 + d * (1.0 - v + v.ln()) {
            return d * v;
        }
    }
}
