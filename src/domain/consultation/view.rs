//! Read-only view model handed to the rendering layer.

use serde::Serialize;

use crate::domain::knowledge::ScenarioId;

use super::{
    ConsultationStage, ConversationMessage, DiagnosisArtifacts, DiagnosisStage, ProfileDraft,
    StoreProfile,
};

/// Snapshot of a session for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsultationView {
    pub stage: ConsultationStage,
    pub scenario: Option<ScenarioId>,
    pub draft: ProfileDraft,
    pub profile: Option<StoreProfile>,
    pub messages: Vec<ConversationMessage>,
    pub artifacts: DiagnosisArtifacts,
}

impl ConsultationView {
    /// Text of the artifact for a stage, if generated.
    pub fn artifact(&self, stage: DiagnosisStage) -> Option<&str> {
        self.artifacts.get(stage).map(|a| a.content())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::consultation::Session;

    #[test]
    fn fresh_view_serializes_stage_and_empty_lists() {
        let json = serde_json::to_value(Session::new().view()).unwrap();
        assert_eq!(json["stage"], "intake");
        assert_eq!(json["messages"], serde_json::json!([]));
        assert_eq!(json["artifacts"], serde_json::json!({}));
        assert!(json["profile"].is_null());
    }
}
