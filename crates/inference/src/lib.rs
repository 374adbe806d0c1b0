//! Experiment inference engine for the uplift analytics product
//!
//! This crate decides, for an A/B test with noisy exposure/conversion counts,
//! which variant is most likely to be the best performer. It combines a
//! deterministic Monte Carlo simulation over Beta posteriors with a
//! companion hash-based assignment function that routes live traffic into
//! variants consistently, plus classical significance testing for the
//! results table.

pub mod analyzer;
pub mod assignment;
pub mod bayesian;
pub mod errors;
pub mod rng;
pub mod sampling;
pub mod statistical;

pub use analyzer::ExperimentAnalyzer;
pub use assignment::{experiment_variant, is_in_rollout_percentage};
pub use bayesian::{win_probabilities, DEFAULT_SIMULATIONS};
pub use errors::{InferenceError, Result};
pub use rng::{derive_seed, Mulberry32};
pub use statistical::{ProportionTest, SampleSizeCalculator};
