//! Logging configuration

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use super::error::ValidationError;

/// Log filter settings
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `store_doctor=debug`
    #[serde(default = "default_level")]
    pub level: String,
}

impl LoggingConfig {
    /// Builds the filter, preferring `RUST_LOG` when it is set.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|_| ValidationError::InvalidLogLevel(self.level.clone()))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_module_directive_is_valid() {
        let config = LoggingConfig {
            level: "store_doctor=debug,reqwest=warn".to_string(),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_garbage_directive_is_rejected() {
        let config = LoggingConfig {
            level: "store_doctor=verbose".to_string(),
        };
        assert!(config.validate().is_err());
    }
}
