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
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Service URL must start with http:// or https://")]
    InvalidServiceUrl,

    #[error("Service timeout must be between 1 and 300 seconds")]
    InvalidTimeout,

    #[error("Excerpt length must be greater than zero")]
    InvalidExcerptLength,

    #[error("Log level must not be empty")]
    MissingLogLevel,
}
