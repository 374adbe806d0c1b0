//! Classical significance testing for experiment results
//!
//! The results table reports a frequentist comparison next to the Bayesian
//! win probability: a two-proportion z-test between the control variant's
//! conversion counts and a challenger's.

use statrs::distribution::{ContinuousCDF, Normal};
use uplift_types::VariantObservation;

use crate::errors::{InferenceError, Result};

/// Two-proportion z-test between a control and a challenger variant
///
/// Tests the null hypothesis that both variants share the same true
/// conversion rate.
#[derive(Debug, Clone)]
pub struct ProportionTest<'a> {
    control: &'a VariantObservation,
    challenger: &'a VariantObservation,
}

impl<'a> ProportionTest<'a> {
    /// Create a test over two observations
    pub fn new(control: &'a VariantObservation, challenger: &'a VariantObservation) -> Self {
        Self {
            control,
            challenger,
        }
    }

    /// Sample proportions (control, challenger)
    pub fn proportions(&self) -> (f64, f64) {
        (
            self.control.conversion_rate(),
            self.challenger.conversion_rate(),
        )
    }

    /// Pooled proportion across both groups
    pub fn pooled_proportion(&self) -> f64 {
        let total_conversions = self.control.conversions + self.challenger.conversions;
        let total_exposures = self.control.exposures + self.challenger.exposures;

        if total_exposures > 0 {
            total_conversions as f64 / total_exposures as f64
        } else {
            0.0
        }
    }

    /// Z-statistic for the difference in proportions
    pub fn z_statistic(&self) -> Result<f64> {
        let (p1, p2) = self.proportions();
        let p_pool = self.pooled_proportion();

        let n1 = self.control.exposures as f64;
        let n2 = self.challenger.exposures as f64;

        if n1 == 0.0 || n2 == 0.0 {
            return Err(InferenceError::InsufficientData(
                "cannot run z-test with zero exposures".to_string(),
            ));
        }

        let se = (p_pool * (1.0 - p_pool) * (1.0 / n1 + 1.0 / n2)).sqrt();
        if se == 0.0 {
            return Err(InferenceError::StatisticalError(
                "standard error is zero, cannot compute z-statistic".to_string(),
            ));
        }

        Ok((p2 - p1) / se)
    }

    /// Two-tailed p-value
    pub fn p_value(&self) -> Result<f64> {
        let z = self.z_statistic()?;

        let normal = Normal::new(0.0, 1.0)
            .map_err(|e| InferenceError::StatisticalError(e.to_string()))?;

        Ok(2.0 * (1.0 - normal.cdf(z.abs())))
    }

    /// Whether the difference is significant at the given alpha level
    pub fn is_significant(&self, alpha: f64) -> Result<bool> {
        Ok(self.p_value()? < alpha)
    }

    /// Confidence interval for the rate difference (challenger minus control)
    pub fn confidence_interval(&self, confidence: f64) -> Result<(f64, f64)> {
        let (p1, p2) = self.proportions();
        let diff = p2 - p1;

        let n1 = self.control.exposures as f64;
        let n2 = self.challenger.exposures as f64;

        if n1 == 0.0 || n2 == 0.0 {
            return Err(InferenceError::InsufficientData(
                "cannot build a confidence interval with zero exposures".to_string(),
            ));
        }

        let se = ((p1 * (1.0 - p1) / n1) + (p2 * (1.0 - p2) / n2)).sqrt();

        let normal = Normal::new(0.0, 1.0)
            .map_err(|e| InferenceError::StatisticalError(e.to_string()))?;
        let alpha = 1.0 - confidence;
        let z = normal.inverse_cdf(1.0 - alpha / 2.0);

        let margin = z * se;
        Ok((diff - margin, diff + margin))
    }

    /// Cohen's h effect size
    pub fn effect_size(&self) -> f64 {
        let (p1, p2) = self.proportions();
        2.0 * (p2.sqrt().asin() - p1.sqrt().asin())
    }
}

/// Required sample size per variant for a planned experiment
pub struct SampleSizeCalculator {
    /// Baseline conversion rate
    pub baseline_rate: f64,
    /// Minimum detectable effect (relative improvement)
    pub min_effect: f64,
    /// Statistical power (1 - beta)
    pub power: f64,
    /// Significance level (alpha)
    pub alpha: f64,
}

impl SampleSizeCalculator {
    /// Create a calculator, validating every input range
    pub fn new(baseline_rate: f64, min_effect: f64, power: f64, alpha: f64) -> Result<Self> {
        if baseline_rate <= 0.0 || baseline_rate >= 1.0 {
            return Err(InferenceError::InvalidParameter(
                "baseline rate must be between 0 and 1".to_string(),
            ));
        }

        if power <= 0.0 || power >= 1.0 {
            return Err(InferenceError::InvalidParameter(
                "power must be between 0 and 1".to_string(),
            ));
        }

        if alpha <= 0.0 || alpha >= 1.0 {
            return Err(InferenceError::InvalidParameter(
                "alpha must be between 0 and 1".to_string(),
            ));
        }

        Ok(Self {
            baseline_rate,
            min_effect,
            power,
            alpha,
        })
    }

    /// Required exposures per variant
    pub fn calculate(&self) -> Result<usize> {
        let p1 = self.baseline_rate;
        let p2 = self.baseline_rate * (1.0 + self.min_effect);

        if p2 >= 1.0 {
            return Err(InferenceError::InvalidParameter(
                "effect size too large, challenger rate exceeds 1.0".to_string(),
            ));
        }

        let normal = Normal::new(0.0, 1.0)
            .map_err(|e| InferenceError::StatisticalError(e.to_string()))?;

        let z_alpha = normal.inverse_cdf(1.0 - self.alpha / 2.0);
        let z_beta = normal.inverse_cdf(self.power);

        let p_avg = (p1 + p2) / 2.0;
        let delta = (p2 - p1).abs();

        let n = ((z_alpha + z_beta).powi(2) * 2.0 * p_avg * (1.0 - p_avg)) / delta.powi(2);

        Ok(n.ceil() as usize)
    }
}
