//! Configuration management for the uplift experiment engine

use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Engine settings for experiment analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Simulation count used when the caller does not request one
    pub default_simulations: u64,

    /// Hard ceiling on simulations per analysis call
    pub max_simulations: u64,

    /// Significance level (alpha) for the frequentist comparison
    pub significance_level: f64,
}

impl EngineSettings {
    /// Load settings from file and environment
    ///
    /// Environment variables prefixed with `UPLIFT_` override file values,
    /// with `__` separating nested keys.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut figment = Figment::from(figment::providers::Serialized::defaults(Self::default()));

        if let Some(path) = config_path {
            figment = figment.merge(Yaml::file(path));
        }

        figment = figment.merge(Env::prefixed("UPLIFT_").split("__"));

        let settings: Self = figment
            .extract()
            .map_err(|e| ConfigError::LoadError(e.to_string()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings
    pub fn validate(&self) -> Result<()> {
        if self.default_simulations == 0 {
            return Err(ConfigError::ValidationError(
                "default_simulations must be at least 1".to_string(),
            ));
        }

        if self.max_simulations < self.default_simulations {
            return Err(ConfigError::ValidationError(
                "max_simulations must be at least default_simulations".to_string(),
            ));
        }

        if self.significance_level <= 0.0 || self.significance_level >= 1.0 {
            return Err(ConfigError::ValidationError(
                "significance_level must be strictly between 0 and 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            default_simulations: 10_000,
            max_simulations: 200_000,
            significance_level: 0.05,
        }
    }
}
