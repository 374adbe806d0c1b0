//! Gamma and Beta sampling over the deterministic generator
//!
//! The Beta posterior draws that drive the simulation are built from Gamma
//! draws via the ratio `X / (X + Y)`. Gamma sampling uses the
//! Marsaglia-Tsang rejection method with Box-Muller normals, consuming
//! uniforms from a single sequential stream; the order of draws is part of
//! the reproducibility contract.

use std::f64::consts::PI;

use crate::rng::Mulberry32;

/// Draw one sample from `Gamma(shape, 1)`
///
/// For `shape >= 1` this is Marsaglia-Tsang; for `shape < 1` the sample is
/// boosted from `Gamma(shape + 1, 1)` by `u^(1/shape)`. The boost recurses
/// exactly one level since `shape + 1 >= 1`.
pub fn sample_gamma(shape: f64, rng: &mut Mulberry32) -> f64 {
    if shape < 1.0 {
        let boosted = sample_gamma(shape + 1.0, rng);
        let u = rng.next_f64();
        return boosted * u.powf(1.0 / shape);
    }

    let d = shape - 1.0 / 3.0;
    let c = 1.0 / (9.0 * d).sqrt();

    loop {
        let mut x;
        let mut v;
        loop {
            // Clamp the log draw away from zero; mulberry32 can emit 0.
            let u1 = rng.next_f64().max(f64::EPSILON);
            let u2 = rng.next_f64();
            x = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
            v = 1.0 + c * x;
            if v > 0.0 {
                break;
            }
        }

        let v3 = v * v * v;
        let u = rng.next_f64();

        if u < 1.0 - 0.0331 * x.powi(4) {
            return d * v3;
        }
        if u.ln() < 0.5 * x * x + d * (1.0 - v3 + v3.ln()) {
            return d * v3;
        }
    }
}

/// Draw one sample from `Beta(alpha, beta)`
///
/// X is drawn before Y so the generator stream stays reproducible.
pub fn sample_beta(alpha: f64, beta: f64, rng: &mut Mulberry32) -> f64 {
    let x = sample_gamma(alpha, rng);
    let y = sample_gamma(beta, rng);
    x / (x + y)
}
