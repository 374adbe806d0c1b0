//! Traffic rollout configuration types

use serde::{Deserialize, Serialize};

/// One variant's share of experiment traffic
///
/// Percentages across an experiment's variants are expected to sum to 100;
/// the assignment function evaluates cumulative boundaries in the given
/// order and does not validate the sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRollout {
    /// Key returned when this variant is selected
    pub key: String,
    /// Share of traffic in [0, 100]
    pub rollout_percentage: f64,
}

impl VariantRollout {
    /// Create a new rollout entry
    pub fn new(key: impl Into<String>, rollout_percentage: f64) -> Self {
        Self {
            key: key.into(),
            rollout_percentage,
        }
    }

    /// Split traffic evenly across the given keys
    pub fn even_split<I, S>(keys: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        if keys.is_empty() {
            return Vec::new();
        }
        let share = 100.0 / keys.len() as f64;
        keys.into_iter().map(|key| Self::new(key, share)).collect()
    }
}
