//! Versioned collection of scenarios.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Scenario, ScenarioId};

/// Errors raised while loading or validating a knowledge base.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("failed to read knowledge base: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse knowledge base: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("knowledge base has no scenarios")]
    NoScenarios,

    #[error("duplicate scenario id '{0}'")]
    DuplicateScenario(ScenarioId),

    #[error("default scenario '{0}' is not defined")]
    MissingDefault(ScenarioId),

    #[error("scenario '{0}' has an empty persona")]
    EmptyPersona(ScenarioId),
}

/// Static domain text selected by scenario.
///
/// # Invariants
///
/// - at least one scenario
/// - scenario ids are unique
/// - `default_scenario` names one of the scenarios
///
/// Deserialization validates, so a parsed value always upholds these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawKnowledgeBase")]
pub struct KnowledgeBase {
    pub(super) version: String,
    pub(super) default_scenario: ScenarioId,
    pub(super) scenarios: Vec<Scenario>,
}

/// Unvalidated shape of a knowledge base file.
#[derive(Deserialize)]
struct RawKnowledgeBase {
    version: String,
    default_scenario: ScenarioId,
    scenarios: Vec<Scenario>,
}

impl TryFrom<RawKnowledgeBase> for KnowledgeBase {
    type Error = KnowledgeError;

    fn try_from(raw: RawKnowledgeBase) -> Result<Self, Self::Error> {
        KnowledgeBase::new(raw.version, raw.default_scenario, raw.scenarios)
    }
}

impl KnowledgeBase {
    /// Builds and validates a knowledge base.
    ///
    /// # Errors
    ///
    /// Returns `KnowledgeError` if any invariant fails.
    pub fn new(
        version: impl Into<String>,
        default_scenario: ScenarioId,
        scenarios: Vec<Scenario>,
    ) -> Result<Self, KnowledgeError> {
        let kb = Self {
            version: version.into(),
            default_scenario,
            scenarios,
        };
        kb.validate()?;
        Ok(kb)
    }

    /// Parses a knowledge base from YAML text.
    ///
    /// # Errors
    ///
    /// - `Parse` on malformed YAML
    /// - any validation error
    pub fn from_yaml_str(yaml: &str) -> Result<Self, KnowledgeError> {
        let raw: RawKnowledgeBase = serde_yaml::from_str(yaml)?;
        raw.try_into()
    }

    /// Reads a knowledge base from a YAML file.
    ///
    /// # Errors
    ///
    /// - `Io` if the file cannot be read
    /// - anything `from_yaml_str` returns
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, KnowledgeError> {
        let text = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_yaml_str(&text)
    }

    /// Checks the invariants.
    pub fn validate(&self) -> Result<(), KnowledgeError> {
        if self.scenarios.is_empty() {
            return Err(KnowledgeError::NoScenarios);
        }

        let mut seen = HashSet::new();
        for scenario in &self.scenarios {
            if !seen.insert(&scenario.id) {
                return Err(KnowledgeError::DuplicateScenario(scenario.id.clone()));
            }
            if scenario.knowledge.persona.trim().is_empty() {
                return Err(KnowledgeError::EmptyPersona(scenario.id.clone()));
            }
        }

        if !seen.contains(&self.default_scenario) {
            return Err(KnowledgeError::MissingDefault(self.default_scenario.clone()));
        }
        Ok(())
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Looks up a scenario by id.
    pub fn scenario(&self, id: &ScenarioId) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| &s.id == id)
    }

    /// The scenario used when none is selected.
    pub fn default_scenario(&self) -> &Scenario {
        self.scenario(&self.default_scenario)
            .unwrap_or(&self.scenarios[0])
    }

    /// Resolves an optional selection, falling back to the default scenario
    /// for `None` and for ids this knowledge base does not define.
    pub fn resolve(&self, id: Option<&ScenarioId>) -> &Scenario {
        id.and_then(|id| self.scenario(id))
            .unwrap_or_else(|| self.default_scenario())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::knowledge::builtin;

    const YAML: &str = r#"
version: "test-1"
default_scenario: basic
scenarios:
  - id: basic
    title: Basic
    knowledge:
      version: "1"
      persona: You are a consultant.
      domain_facts: ["Fact one."]
      response_rules: ["Rule one."]
  - id: footfall
    title: Footfall
    reference_url: https://example.org/footfall.txt
    defaults:
      location_type: foot_traffic
    knowledge:
      version: "3"
      persona: You are a retail analyst.
"#;

    mod loading {
        use super::*;

        #[test]
        fn parses_valid_yaml() {
            let kb = KnowledgeBase::from_yaml_str(YAML).unwrap();
            assert_eq!(kb.version(), "test-1");
            assert_eq!(kb.scenarios().len(), 2);

            let footfall = kb.scenario(&ScenarioId::new("footfall").unwrap()).unwrap();
            assert_eq!(
                footfall.reference_url.as_deref(),
                Some("https://example.org/footfall.txt")
            );
            assert!(footfall.knowledge.domain_facts.is_empty());
        }

        #[test]
        fn rejects_missing_default() {
            let yaml = YAML.replace("default_scenario: basic", "default_scenario: other");
            let err = KnowledgeBase::from_yaml_str(&yaml).unwrap_err();
            assert!(matches!(err, KnowledgeError::MissingDefault(_)));
        }

        #[test]
        fn rejects_duplicate_ids() {
            let yaml = YAML.replace("id: footfall", "id: basic");
            let err = KnowledgeBase::from_yaml_str(&yaml).unwrap_err();
            assert!(matches!(err, KnowledgeError::DuplicateScenario(_)));
        }

        #[test]
        fn direct_deserialization_validates() {
            let yaml = "version: v\ndefault_scenario: basic\nscenarios: []\n";
            let result = serde_yaml::from_str::<KnowledgeBase>(yaml);

            let err = result.unwrap_err();
            assert!(err.to_string().contains("knowledge base has no scenarios"));
        }

        #[test]
        fn direct_deserialization_rejects_missing_default() {
            let yaml = YAML.replace("default_scenario: basic", "default_scenario: other");
            assert!(serde_yaml::from_str::<KnowledgeBase>(&yaml).is_err());
        }

        #[test]
        fn rejects_empty_scenarios() {
            let yaml = "version: v\ndefault_scenario: basic\nscenarios: []\n";
            let err = KnowledgeBase::from_yaml_str(yaml).unwrap_err();
            assert!(matches!(err, KnowledgeError::NoScenarios));
        }

        #[test]
        fn rejects_malformed_yaml() {
            let err = KnowledgeBase::from_yaml_str("scenarios: [").unwrap_err();
            assert!(matches!(err, KnowledgeError::Parse(_)));
        }

        #[tokio::test]
        async fn loads_from_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("kb.yaml");
            tokio::fs::write(&path, YAML).await.unwrap();

            let kb = KnowledgeBase::load(&path).await.unwrap();
            assert_eq!(kb.default_scenario().id.as_str(), "basic");
        }

        #[tokio::test]
        async fn missing_file_is_io_error() {
            let dir = tempfile::tempdir().unwrap();
            let err = KnowledgeBase::load(dir.path().join("absent.yaml"))
                .await
                .unwrap_err();
            assert!(matches!(err, KnowledgeError::Io(_)));
        }
    }

    mod lookup {
        use super::*;

        #[test]
        fn resolve_none_gives_default() {
            let kb = builtin();
            assert_eq!(kb.resolve(None).id, kb.default_scenario().id);
        }

        #[test]
        fn resolve_unknown_falls_back_to_default() {
            let kb = builtin();
            let unknown = ScenarioId::new("unknown").unwrap();
            assert_eq!(kb.resolve(Some(&unknown)).id, kb.default_scenario().id);
        }

        #[test]
        fn resolve_known_returns_it() {
            let kb = builtin();
            let id = ScenarioId::new("sales-slump").unwrap();
            assert_eq!(kb.resolve(Some(&id)).id, id);
        }

        #[test]
        fn new_rejects_empty_scenarios() {
            let err = KnowledgeBase::new("v", ScenarioId::new("a").unwrap(), vec![]).unwrap_err();
            assert!(matches!(err, KnowledgeError::NoScenarios));
        }
    }
}
