//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Backend URL must start with http:// or https://")]
    InvalidBackendUrl,

    #[error("Invalid log filter: {0}")]
    InvalidLogLevel(String),

    #[error("Program price must be greater than zero")]
    InvalidPrice,

    #[error("Currency must be a three-letter ISO code")]
    InvalidCurrency,
}
