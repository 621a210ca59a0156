//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `STORE_DOCTOR` prefix and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use store_doctor::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Using {:?}", config.ai.primary_provider);
//! ```

mod ai;
mod consultation;
mod error;
mod knowledge;
mod logging;
mod reference;

pub use ai::{AiConfig, AiProvider};
pub use consultation::ConsultationConfig;
pub use error::{ConfigError, ValidationError};
pub use knowledge::KnowledgeConfig;
pub use logging::LoggingConfig;
pub use reference::ReferenceConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults; only the API key of the primary backend must
/// be supplied. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Generative backend configuration (Gemini/OpenAI)
    #[serde(default)]
    pub ai: AiConfig,

    /// Sampling and prompt budgets
    #[serde(default)]
    pub consultation: ConsultationConfig,

    /// Reference document cache
    #[serde(default)]
    pub reference: ReferenceConfig,

    /// Knowledge base source
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Log filter
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `STORE_DOCTOR` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `STORE_DOCTOR__AI__GEMINI_API_KEY=...` -> `ai.gemini_api_key = ...`
    /// - `STORE_DOCTOR__REFERENCE__TTL_SECS=600` -> `reference.ttl_secs = 600`
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
                    .prefix("STORE_DOCTOR")
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
        self.ai.validate()?;
        self.consultation.validate()?;
        self.reference.validate()?;
        self.knowledge.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
