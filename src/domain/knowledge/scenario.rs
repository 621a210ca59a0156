//! Scenario presets.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::consultation::ProfileDraft;
use crate::domain::foundation::ValidationError;

/// Identifier of a scenario; also the reference cache key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScenarioId(pub(super) String);

impl ScenarioId {
    /// Creates a new ScenarioId, returning error if blank.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err(ValidationError::empty_field("scenario"));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ScenarioId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ScenarioId> for String {
    fn from(id: ScenarioId) -> Self {
        id.0
    }
}

/// Domain text injected into every prompt for a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBlock {
    /// Version tag of this block, bumped whenever the text changes.
    pub version: String,
    /// Who the model should act as.
    pub persona: String,
    /// Facts the model should rely on.
    #[serde(default)]
    pub domain_facts: Vec<String>,
    /// Constraints on how the model answers.
    #[serde(default)]
    pub response_rules: Vec<String>,
}

/// A named preset combining a knowledge block, a reference document and
/// intake defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: ScenarioId,
    pub title: String,
    /// Where the reference document for this scenario is fetched from.
    #[serde(default)]
    pub reference_url: Option<String>,
    /// Intake values pre-filled when the scenario is selected.
    #[serde(default)]
    pub defaults: ProfileDraft,
    pub knowledge: KnowledgeBlock,
}
