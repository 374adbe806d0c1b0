//! Deterministic traffic assignment
//!
//! Routes live visitors into rollout buckets and experiment variants with
//! no stored per-visitor state: the same visitor always lands in the same
//! place for the same flag or experiment. SHA-256 gives a uniform bucket
//! distribution that is also hard to game at the boundaries, which the
//! non-cryptographic seeding hash in [`crate::rng`] does not need to be.

use sha2::{Digest, Sha256};
use uplift_types::VariantRollout;

/// Map a hash preimage to a point in [0, 100)
///
/// The first 4 digest bytes, read big-endian, match the first 8 hex
/// characters of the hex-encoded digest.
fn bucket(input: &str) -> f64 {
    let digest = Sha256::digest(input.as_bytes());
    let lead = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    f64::from(lead) / f64::from(u32::MAX) * 100.0
}

/// Percentage-rollout gate for a feature flag
///
/// True iff the visitor's bucket for this flag falls strictly below
/// `percentage`. A percentage at or above 100 admits everyone; at or below
/// 0 it admits no one.
pub fn is_in_rollout_percentage(flag_key: &str, percentage: f64, visitor_id: &str) -> bool {
    if percentage >= 100.0 {
        return true;
    }
    if percentage <= 0.0 {
        return false;
    }

    bucket(&format!("{flag_key}:{visitor_id}")) < percentage
}

/// Select an experiment variant for a visitor
///
/// Walks `variants` in caller-supplied order, accumulating rollout
/// percentages, and returns the first variant whose cumulative boundary
/// exceeds the visitor's bucket. Boundaries depend on that order, so the
/// slice must not be re-sorted.
///
/// When the percentages sum to less than 100, bucket values past the final
/// boundary fall back to the LAST variant rather than no variant.
pub fn experiment_variant(
    experiment_id: &str,
    variants: &[VariantRollout],
    profile_id: &str,
) -> Option<String> {
    let last = variants.last()?;

    let point = bucket(&format!("experiment:{experiment_id}:{profile_id}"));

    let mut cumulative = 0.0;
    for variant in variants {
        cumulative += variant.rollout_percentage;
        if point < cumulative {
            return Some(variant.key.clone());
        }
    }

    Some(last.key.clone())
}
