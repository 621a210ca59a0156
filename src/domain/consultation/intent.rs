//! Discrete user actions consumed by the consultation engine.

use crate::domain::knowledge::ScenarioId;

use super::ProfileDraft;

/// A user-triggered action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Pick the scenario preset. Intake only.
    SelectScenario(ScenarioId),
    /// Submit the intake form. Intake only.
    SubmitProfile(ProfileDraft),
    /// Ask a follow-up question. Consultation only.
    AskQuestion(String),
    /// Generate the final report. Consultation only.
    IssuePrescription,
    /// Discard the session and start over. Any stage.
    Restart,
}

impl Intent {
    /// Stable action name used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Intent::SelectScenario(_) => "select_scenario",
            Intent::SubmitProfile(_) => "submit_profile",
            Intent::AskQuestion(_) => "ask_question",
            Intent::IssuePrescription => "issue_prescription",
            Intent::Restart => "restart",
        }
    }

    /// Returns true if handling this intent calls the generative backend.
    pub fn requires_generation(&self) -> bool {
        matches!(
            self,
            Intent::SubmitProfile(_) | Intent::AskQuestion(_) | Intent::IssuePrescription
        )
    }
}
