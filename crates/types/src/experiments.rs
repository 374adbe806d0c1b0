//! Experiment observation and reporting types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregated counts for one variant over an analysis window
///
/// Constructed fresh per inference call from externally aggregated counts;
/// the engine never persists these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantObservation {
    /// Stable variant key, unique within one experiment
    pub key: String,
    /// Unique subjects exposed to this variant
    pub exposures: u64,
    /// Unique exposed subjects that completed the goal event
    pub conversions: u64,
}

impl VariantObservation {
    /// Create a new observation
    pub fn new(key: impl Into<String>, exposures: u64, conversions: u64) -> Self {
        Self {
            key: key.into(),
            exposures,
            conversions,
        }
    }

    /// Observed conversion rate, zero when nothing was exposed
    pub fn conversion_rate(&self) -> f64 {
        if self.exposures > 0 {
            self.conversions as f64 / self.exposures as f64
        } else {
            0.0
        }
    }
}

/// Frequentist comparison of a challenger against the control variant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignificanceSummary {
    /// Two-tailed p-value from the two-proportion z-test
    pub p_value: f64,
    /// Whether the difference clears the configured significance level
    pub is_significant: bool,
    /// Confidence interval for the rate difference (challenger minus control)
    pub difference_interval: (f64, f64),
    /// Cohen's h effect size
    pub effect_size: f64,
}

/// Per-variant entry of an experiment report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantSummary {
    /// Variant key
    pub key: String,
    /// Unique subjects exposed
    pub exposures: u64,
    /// Unique subjects converted
    pub conversions: u64,
    /// Observed conversion rate
    pub conversion_rate: f64,
    /// Posterior mean conversion rate under the Beta(1, 1) prior
    pub posterior_mean: f64,
    /// 95% credible interval for the conversion rate
    pub credible_interval: (f64, f64),
    /// Monte Carlo estimate of the probability this variant is the best
    pub win_probability: f64,
    /// Whether this variant currently leads on win probability
    pub is_leader: bool,
    /// Comparison against the control variant, when one exists
    pub significance: Option<SignificanceSummary>,
}

/// Complete analysis output for one experiment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentReport {
    /// Experiment key the report was computed for
    pub experiment_key: String,
    /// Simulation count actually used (after clamping)
    pub simulations: u64,
    /// Per-variant summaries, in caller-supplied order
    pub variants: Vec<VariantSummary>,
    /// When the report was assembled
    pub generated_at: DateTime<Utc>,
}

impl ExperimentReport {
    /// The variant leading on win probability, if any
    pub fn leader(&self) -> Option<&VariantSummary> {
        self.variants.iter().find(|v| v.is_leader)
    }

    /// Look up one variant's summary by key
    pub fn variant(&self, key: &str) -> Option<&VariantSummary> {
        self.variants.iter().find(|v| v.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_conversion_rate() {
        let obs = VariantObservation::new("control", 1000, 250);
        assert_eq!(obs.conversion_rate(), 0.25);
    }

    #[test]
    fn test_observation_zero_exposures() {
        let obs = VariantObservation::new("empty", 0, 0);
        assert_eq!(obs.conversion_rate(), 0.0);
    }

    #[test]
    fn test_observation_wire_casing() {
        let obs = VariantObservation::new("treatment", 10, 3);
        let json = serde_json::to_value(&obs).unwrap();

        // The surrounding API layer expects camelCase fields.
        assert_eq!(json["key"], "treatment");
        assert_eq!(json["exposures"], 10);
        assert_eq!(json["conversions"], 3);
    }

    #[test]
    fn test_report_leader_lookup() {
        let report = ExperimentReport {
            experiment_key: "exp-1".to_string(),
            simulations: 10_000,
            variants: vec![
                VariantSummary {
                    key: "control".to_string(),
                    exposures: 100,
                    conversions: 10,
                    conversion_rate: 0.1,
                    posterior_mean: 0.107,
                    credible_interval: (0.05, 0.17),
                    win_probability: 0.2,
                    is_leader: false,
                    significance: None,
                },
                VariantSummary {
                    key: "treatment".to_string(),
                    exposures: 100,
                    conversions: 20,
                    conversion_rate: 0.2,
                    posterior_mean: 0.205,
                    credible_interval: (0.13, 0.28),
                    win_probability: 0.8,
                    is_leader: true,
                    significance: None,
                },
            ],
            generated_at: Utc::now(),
        };

        assert_eq!(report.leader().unwrap().key, "treatment");
        assert_eq!(report.variant("control").unwrap().win_probability, 0.2);
        assert!(report.variant("missing").is_none());
    }
}
