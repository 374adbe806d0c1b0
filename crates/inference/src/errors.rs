//! Error types for the inference engine

use thiserror::Error;

pub type Result<T> = std::result::Result<T, InferenceError>;

#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Statistical error: {0}")]
    StatisticalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
