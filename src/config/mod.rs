//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `LIVE_INTERVIEW` prefix and nested values use double underscores as separators.
//! Every value has a default, so an empty environment is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use live_interview::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Interviewer service at {}", config.service.base_url);
//! ```

mod error;
mod interview;
mod logging;
mod service;

pub use error::{ConfigError, ValidationError};
pub use interview::InterviewConfig;
pub use logging::{Environment, LoggingConfig};
pub use service::ServiceConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Assessment backend (base URL, timeout, API key)
    #[serde(default)]
    pub service: ServiceConfig,

    /// Interview behavior
    #[serde(default)]
    pub interview: InterviewConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `LIVE_INTERVIEW` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `LIVE_INTERVIEW__SERVICE__BASE_URL=...` -> `service.base_url = ...`
    /// - `LIVE_INTERVIEW__INTERVIEW__EXCERPT_CHARS=80` -> `interview.excerpt_chars = 80`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("LIVE_INTERVIEW")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.service.validate()?;
        self.interview.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
