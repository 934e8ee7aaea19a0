//! Error types for carprice

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A dataset or model artifact required at startup is missing.
    #[error("Data or model files missing: {0}")]
    DataUnavailable(String),

    #[error("Invalid market dataset: {0}")]
    Dataset(String),

    #[error("Unsupported model artifact: {0}")]
    ModelFormat(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Estimator returned a non-finite price: {0}")]
    InvalidPrediction(f64),
}

pub type Result<T> = std::result::Result<T, Error>;
