//! Experiment report assembly
//!
//! The in-process entry point for the results layer: runs the Bayesian
//! engine, decorates each variant with posterior statistics, and attaches a
//! frequentist comparison against the control variant when one exists.

use chrono::Utc;
use tracing::{debug, info, warn};
use uplift_config::EngineSettings;
use uplift_types::{ExperimentReport, SignificanceSummary, VariantObservation, VariantSummary};

use crate::bayesian::win_probabilities;
use crate::statistical::ProportionTest;

/// Variant key treated as the experiment's baseline
pub const CONTROL_KEY: &str = "control";

/// Experiment analysis facade
pub struct ExperimentAnalyzer {
    settings: EngineSettings,
}

impl ExperimentAnalyzer {
    /// Create an analyzer from engine settings
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    /// Analyze with the configured default simulation count
    pub fn analyze(
        &self,
        experiment_key: &str,
        variants: &[VariantObservation],
    ) -> ExperimentReport {
        self.analyze_with_simulations(experiment_key, variants, self.settings.default_simulations)
    }

    /// Analyze with a caller-requested simulation count
    ///
    /// Requests above the configured ceiling are clamped, which bounds
    /// worst-case latency per call.
    pub fn analyze_with_simulations(
        &self,
        experiment_key: &str,
        variants: &[VariantObservation],
        simulations: u64,
    ) -> ExperimentReport {
        let clamped = simulations.min(self.settings.max_simulations);
        if clamped < simulations {
            warn!(
                requested = simulations,
                clamped,
                "simulation request exceeds configured maximum"
            );
        }

        info!(
            experiment_key,
            simulations = clamped,
            variant_count = variants.len(),
            "analyzing experiment"
        );

        let probabilities = win_probabilities(variants, clamped);

        let leader = variants
            .iter()
            .enumerate()
            .fold(None::<(usize, f64)>, |best, (i, v)| {
                let p = probabilities.get(&v.key).copied().unwrap_or(0.0);
                match best {
                    Some((_, best_p)) if p <= best_p => best,
                    _ => Some((i, p)),
                }
            })
            .map(|(i, _)| i);

        let control = variants.iter().find(|v| v.key == CONTROL_KEY);

        let summaries = variants
            .iter()
            .enumerate()
            .map(|(i, variant)| {
                let win_probability = probabilities.get(&variant.key).copied().unwrap_or(0.0);
                let (posterior_mean, credible_interval) = posterior_stats(variant);

                let significance = control
                    .filter(|c| c.key != variant.key)
                    .and_then(|c| self.compare_to_control(c, variant));

                VariantSummary {
                    key: variant.key.clone(),
                    exposures: variant.exposures,
                    conversions: variant.conversions,
                    conversion_rate: variant.conversion_rate(),
                    posterior_mean,
                    credible_interval,
                    win_probability,
                    is_leader: leader == Some(i),
                    significance,
                }
            })
            .collect();

        ExperimentReport {
            experiment_key: experiment_key.to_string(),
            simulations: clamped,
            variants: summaries,
            generated_at: Utc::now(),
        }
    }

    fn compare_to_control(
        &self,
        control: &VariantObservation,
        challenger: &VariantObservation,
    ) -> Option<SignificanceSummary> {
        let test = ProportionTest::new(control, challenger);
        let alpha = self.settings.significance_level;

        match (test.p_value(), test.confidence_interval(1.0 - alpha)) {
            (Ok(p_value), Ok(difference_interval)) => Some(SignificanceSummary {
                p_value,
                is_significant: p_value < alpha,
                difference_interval,
                effect_size: test.effect_size(),
            }),
            (Err(e), _) | (_, Err(e)) => {
                debug!(
                    challenger = %challenger.key,
                    error = %e,
                    "skipping significance comparison"
                );
                None
            }
        }
    }
}

/// Posterior mean and 95% credible interval under the Beta(1, 1) prior
///
/// The interval uses the normal approximation of the Beta posterior, which
/// is tight at the exposure counts a running experiment accumulates.
fn posterior_stats(variant: &VariantObservation) -> (f64, (f64, f64)) {
    let alpha = variant.conversions as f64 + 1.0;
    let beta = (variant.exposures as f64 - variant.conversions as f64 + 1.0).max(1.0);

    let mean = alpha / (alpha + beta);
    let std = (alpha * beta / ((alpha + beta).powi(2) * (alpha + beta + 1.0))).sqrt();

    let interval = ((mean - 1.96 * std).max(0.0), (mean + 1.96 * std).min(1.0));
    (mean, interval)
}
