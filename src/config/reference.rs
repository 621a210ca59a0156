//! Reference document cache configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Reference document fetch and cache settings
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceConfig {
    /// How long a fetched document stays fresh
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,

    /// HTTP timeout for one fetch
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

impl ReferenceConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ttl_secs == 0 {
            return Err(ValidationError::InvalidTtl);
        }
        if self.fetch_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl(),
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

fn default_ttl() -> u64 {
    3600
}

fn default_fetch_timeout() -> u64 {
    15
}
