//! Diagnosis artifacts - generated text keyed by pipeline stage.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Pipeline stage that produced an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosisStage {
    /// Assessment generated right after intake.
    Initial,
    /// Final report generated at the end of the consultation.
    Prescription,
}

impl fmt::Display for DiagnosisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosisStage::Initial => f.write_str("initial"),
            DiagnosisStage::Prescription => f.write_str("prescription"),
        }
    }
}

/// A generated text result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisArtifact {
    content: String,
    generated_at: Timestamp,
}

impl DiagnosisArtifact {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            generated_at: Timestamp::now(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn generated_at(&self) -> &Timestamp {
        &self.generated_at
    }
}

/// Artifacts of one session, at most one per stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiagnosisArtifacts(BTreeMap<DiagnosisStage, DiagnosisArtifact>);

impl DiagnosisArtifacts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an artifact, returning the one it replaced.
    pub fn record(
        &mut self,
        stage: DiagnosisStage,
        content: impl Into<String>,
    ) -> Option<DiagnosisArtifact> {
        self.0.insert(stage, DiagnosisArtifact::new(content))
    }

    pub fn get(&self, stage: DiagnosisStage) -> Option<&DiagnosisArtifact> {
        self.0.get(&stage)
    }

    pub fn contains(&self, stage: DiagnosisStage) -> bool {
        self.0.contains_key(&stage)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DiagnosisStage, &DiagnosisArtifact)> {
        self.0.iter().map(|(stage, artifact)| (*stage, artifact))
    }
}
