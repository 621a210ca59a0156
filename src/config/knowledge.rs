//! Knowledge base source configuration

use serde::Deserialize;
use std::path::Path;

use super::error::ValidationError;

/// Where the knowledge base comes from
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KnowledgeConfig {
    /// YAML file replacing the built-in knowledge base
    pub path: Option<String>,
}

impl KnowledgeConfig {
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref().map(Path::new)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.path {
            Some(path) if path.trim().is_empty() => Err(ValidationError::EmptyKnowledgePath),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_builtin() {
        let config = KnowledgeConfig::default();
        assert!(config.path().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_path_rejected() {
        let config = KnowledgeConfig {
            path: Some(" ".to_string()),
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptyKnowledgePath));
    }
}
