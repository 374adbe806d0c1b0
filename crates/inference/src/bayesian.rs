//! Bayesian win-probability estimation
//!
//! Each variant's unknown conversion rate is modeled as a Beta posterior
//! under a Beta(1, 1) prior. A Monte Carlo run draws one joint sample per
//! trial and counts how often each variant comes out on top; the win
//! fraction is the reported probability of being the best variant.

use std::collections::HashMap;

use tracing::debug;
use uplift_types::VariantObservation;

use crate::rng::{derive_seed, Mulberry32};
use crate::sampling::sample_beta;

/// Simulation count used when the caller does not request one
pub const DEFAULT_SIMULATIONS: u64 = 10_000;

/// Estimate each variant's probability of having the highest true rate
///
/// Returns one entry per input key, each in [0, 1]. The run is seeded from
/// the input data itself, so identical counts (in any order) and an
/// identical simulation count always reproduce the same output.
///
/// Degenerate inputs short-circuit: an empty slice yields an empty map, a
/// single variant trivially wins everything, and an experiment with no
/// exposures at all yields a uniform split.
pub fn win_probabilities(
    variants: &[VariantObservation],
    simulations: u64,
) -> HashMap<String, f64> {
    if variants.is_empty() {
        return HashMap::new();
    }

    if variants.len() == 1 {
        return HashMap::from([(variants[0].key.clone(), 1.0)]);
    }

    let total_exposures: u64 = variants.iter().map(|v| v.exposures).sum();
    if total_exposures == 0 {
        let uniform = 1.0 / variants.len() as f64;
        return variants
            .iter()
            .map(|v| (v.key.clone(), uniform))
            .collect();
    }

    if simulations == 0 {
        // Zero trials carry no evidence; report zero wins rather than 0/0.
        return variants.iter().map(|v| (v.key.clone(), 0.0)).collect();
    }

    let seed = derive_seed(variants, simulations);
    let mut rng = Mulberry32::new(seed);

    debug!(
        seed,
        simulations,
        variant_count = variants.len(),
        "running posterior simulation"
    );

    // Beta(1, 1) prior. The max-with-1 floor keeps the failure shape
    // positive if a variant ever reports more conversions than exposures.
    let shapes: Vec<(f64, f64)> = variants
        .iter()
        .map(|v| {
            let alpha = v.conversions as f64 + 1.0;
            let beta = (v.exposures as f64 - v.conversions as f64 + 1.0).max(1.0);
            (alpha, beta)
        })
        .collect();

    let mut wins = vec![0u64; variants.len()];
    for _ in 0..simulations {
        let mut best = 0usize;
        let mut best_rate = f64::MIN;

        for (i, &(alpha, beta)) in shapes.iter().enumerate() {
            let rate = sample_beta(alpha, beta, &mut rng);
            // Strict comparison: on an exact tie the earlier variant keeps
            // the lead.
            if rate > best_rate {
                best_rate = rate;
                best = i;
            }
        }

        wins[best] += 1;
    }

    variants
        .iter()
        .zip(wins)
        .map(|(v, w)| (v.key.clone(), w as f64 / simulations as f64))
        .collect()
}
