//! Generative backend configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Generative backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Google Gemini API key
    pub gemini_api_key: Option<String>,

    /// OpenAI API key
    pub openai_api_key: Option<String>,

    /// Backend used for every generation
    #[serde(default = "default_provider")]
    pub primary_provider: AiProvider,

    /// Model override; each backend has its own default
    pub model: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Generative backend type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    Gemini,
    OpenAI,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if Gemini is configured
    pub fn has_gemini(&self) -> bool {
        self.gemini_api_key.as_ref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        self.openai_api_key.as_ref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Model override, ignoring blank values
    pub fn model_override(&self) -> Option<&str> {
        self.model.as_deref().map(str::trim).filter(|m| !m.is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.primary_provider {
            AiProvider::Gemini if !self.has_gemini() => {
                return Err(ValidationError::MissingRequired("GEMINI_API_KEY"));
            }
            AiProvider::OpenAI if !self.has_openai() => {
                return Err(ValidationError::MissingRequired("OPENAI_API_KEY"));
            }
            _ => {}
        }

        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            openai_api_key: None,
            primary_provider: default_provider(),
            model: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_provider() -> AiProvider {
    AiProvider::Gemini
}

fn default_timeout() -> u64 {
    120
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.primary_provider, AiProvider::Gemini);
        assert_eq!(config.timeout_secs, 120);
        assert!(config.model_override().is_none());
    }

    #[test]
    fn test_timeout_duration() {
        let config = AiConfig {
            timeout_secs: 60,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_has_provider_checks() {
        let config = AiConfig {
            gemini_api_key: Some("  ".to_string()),
            openai_api_key: Some("sk-xxx".to_string()),
            ..Default::default()
        };
        assert!(!config.has_gemini());
        assert!(config.has_openai());
    }

    #[test]
    fn test_validation_missing_gemini_key() {
        let config = AiConfig::default();
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("GEMINI_API_KEY"))
        );
    }

    #[test]
    fn test_validation_primary_missing_key() {
        let config = AiConfig {
            primary_provider: AiProvider::OpenAI,
            gemini_api_key: Some("AIza-xxx".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("OPENAI_API_KEY"))
        );
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = AiConfig {
            gemini_api_key: Some("AIza-xxx".to_string()),
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validation_valid_config() {
        let config = AiConfig {
            gemini_api_key: Some("AIza-xxx".to_string()),
            model: Some("gemini-1.5-pro".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.model_override(), Some("gemini-1.5-pro"));
    }
}
