//! Consultation tuning: sampling and prompt budgets

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::prompt::AssemblerConfig;
use crate::ports::GenerationOptions;

/// Sampling options and prompt size limits
#[derive(Debug, Clone, Deserialize)]
pub struct ConsultationConfig {
    /// Sampling temperature passed to the backend
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Cap on generated tokens; backend default when unset
    pub max_tokens: Option<u32>,

    /// Characters of reference document kept in a prompt
    #[serde(default = "default_max_reference_chars")]
    pub max_reference_chars: usize,

    /// Messages included in the prescription prompt
    #[serde(default = "default_recent_window")]
    pub recent_window: usize,

    /// Per-message character budget in the prescription prompt
    #[serde(default = "default_recent_message_chars")]
    pub recent_message_chars: usize,
}

impl ConsultationConfig {
    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    pub fn assembler_config(&self) -> AssemblerConfig {
        AssemblerConfig {
            max_reference_chars: self.max_reference_chars,
            recent_window: self.recent_window,
            recent_message_chars: self.recent_message_chars,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        if self.max_tokens == Some(0) {
            return Err(ValidationError::ZeroBudget("max_tokens"));
        }
        if self.max_reference_chars == 0 {
            return Err(ValidationError::ZeroBudget("max_reference_chars"));
        }
        if self.recent_window == 0 {
            return Err(ValidationError::ZeroBudget("recent_window"));
        }
        if self.recent_message_chars == 0 {
            return Err(ValidationError::ZeroBudget("recent_message_chars"));
        }
        Ok(())
    }
}

impl Default for ConsultationConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_tokens: None,
            max_reference_chars: default_max_reference_chars(),
            recent_window: default_recent_window(),
            recent_message_chars: default_recent_message_chars(),
        }
    }
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_reference_chars() -> usize {
    12_000
}

fn default_recent_window() -> usize {
    6
}

fn default_recent_message_chars() -> usize {
    600
}
