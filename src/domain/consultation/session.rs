//! Session aggregate.
//!
//! A session is the whole record of one consultation: the selected scenario,
//! the intake draft, the submitted profile, the dialogue and the generated
//! artifacts. It is owned by a single interactive run and mutated only by
//! the consultation engine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{StateMachine, ValidationError};
use crate::domain::knowledge::ScenarioId;

use super::{
    ConsultationError, ConversationMessage, ConsultationStage, ConsultationView,
    DiagnosisArtifacts, DiagnosisStage, ProfileDraft, Role, StoreProfile,
};

/// Session aggregate.
///
/// # Invariants
///
/// - `messages` is empty while `stage` is `Intake`
/// - message sequences are 1, 2, 3, ... in list order
/// - `stage == Report` implies a `prescription` artifact
/// - `restart` replaces the whole value, so no partially reset session
///   is ever observable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    stage: ConsultationStage,
    scenario: Option<ScenarioId>,
    draft: ProfileDraft,
    profile: Option<StoreProfile>,
    messages: Vec<ConversationMessage>,
    artifacts: DiagnosisArtifacts,
}

impl Session {
    /// Creates a fresh session in `Intake`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a session from its parts (no validation).
    pub fn reconstitute(
        stage: ConsultationStage,
        scenario: Option<ScenarioId>,
        draft: ProfileDraft,
        profile: Option<StoreProfile>,
        messages: Vec<ConversationMessage>,
        artifacts: DiagnosisArtifacts,
    ) -> Self {
        Self {
            stage,
            scenario,
            draft,
            profile,
            messages,
            artifacts,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn stage(&self) -> ConsultationStage {
        self.stage
    }

    /// Selected scenario, `None` meaning the knowledge base default.
    pub fn scenario(&self) -> Option<&ScenarioId> {
        self.scenario.as_ref()
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn profile(&self) -> Option<&StoreProfile> {
        self.profile.as_ref()
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn artifacts(&self) -> &DiagnosisArtifacts {
        &self.artifacts
    }

    /// Returns the text of the artifact for a stage, if generated.
    pub fn artifact(&self, stage: DiagnosisStage) -> Option<&str> {
        self.artifacts.get(stage).map(|a| a.content())
    }

    /// Read-only snapshot for display.
    pub fn view(&self) -> ConsultationView {
        ConsultationView {
            stage: self.stage,
            scenario: self.scenario.clone(),
            draft: self.draft.clone(),
            profile: self.profile.clone(),
            messages: self.messages.clone(),
            artifacts: self.artifacts.clone(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Selects a scenario and replaces the draft with its defaults.
    ///
    /// During intake the draft holds only the selected scenario's defaults;
    /// the owner's own values arrive with `submit_draft` and win over them.
    /// Switching scenarios therefore never carries the previous scenario's
    /// defaults along.
    ///
    /// # Errors
    ///
    /// - `InvalidAction` outside `Intake`
    pub(crate) fn select_scenario(
        &mut self,
        scenario: ScenarioId,
        defaults: &ProfileDraft,
    ) -> Result<(), ConsultationError> {
        self.ensure(self.stage.accepts_intake(), "select_scenario")?;

        self.draft = defaults.clone();
        self.scenario = Some(scenario);
        Ok(())
    }

    /// Merges a submitted form over the draft and validates the result.
    ///
    /// Non-blank submitted values win. The merged draft and the validated
    /// profile are kept only when validation passes.
    ///
    /// # Errors
    ///
    /// - `InvalidAction` outside `Intake`
    /// - `MissingFields` naming every absent required field
    pub(crate) fn submit_draft(&mut self, submitted: &ProfileDraft) -> Result<(), ConsultationError> {
        self.ensure(self.stage.accepts_intake(), "submit_profile")?;

        let merged = self.draft.merged_with(submitted);
        let profile = merged.validate()?;
        self.draft = merged;
        self.attach_profile(profile)
    }

    /// Attaches the validated profile ahead of the initial diagnosis.
    ///
    /// # Errors
    ///
    /// - `InvalidAction` outside `Intake`
    pub(crate) fn attach_profile(&mut self, profile: StoreProfile) -> Result<(), ConsultationError> {
        self.ensure(self.stage.accepts_intake(), "submit_profile")?;

        self.profile = Some(profile);
        Ok(())
    }

    /// Moves to `Consultation`, storing the initial diagnosis as both the
    /// `initial` artifact and the opening assistant message.
    ///
    /// # Errors
    ///
    /// - `InvalidAction` outside `Intake`
    /// - `MissingFields` if no profile has been attached
    pub(crate) fn begin_consultation(
        &mut self,
        diagnosis: impl Into<String>,
    ) -> Result<(), ConsultationError> {
        let next = self.transition(ConsultationStage::Consultation, "submit_profile")?;
        if self.profile.is_none() {
            return Err(ValidationError::missing_fields(ProfileDraft::REQUIRED_FIELDS).into());
        }

        let diagnosis = diagnosis.into();
        self.artifacts.record(DiagnosisStage::Initial, diagnosis.clone());
        self.messages.clear();
        self.append(Role::Assistant, diagnosis);
        self.stage = next;
        Ok(())
    }

    /// Appends an owner question.
    ///
    /// # Errors
    ///
    /// - `InvalidAction` outside `Consultation`
    /// - `EmptyField` if the question is blank
    pub(crate) fn push_question(&mut self, question: &str) -> Result<(), ConsultationError> {
        self.ensure(self.stage.accepts_questions(), "ask_question")?;
        let question = question.trim();
        if question.is_empty() {
            return Err(ValidationError::empty_field("question").into());
        }

        self.append(Role::User, question);
        Ok(())
    }

    /// Appends a consultant reply.
    ///
    /// # Errors
    ///
    /// - `InvalidAction` outside `Consultation`
    pub(crate) fn push_reply(&mut self, reply: impl Into<String>) -> Result<(), ConsultationError> {
        self.ensure(self.stage.accepts_questions(), "ask_question")?;

        self.append(Role::Assistant, reply);
        Ok(())
    }

    /// Stores the prescription and moves to `Report`.
    ///
    /// # Errors
    ///
    /// - `InvalidAction` outside `Consultation`
    /// - `MissingArtifact` if the initial diagnosis does not exist
    pub(crate) fn issue_prescription(
        &mut self,
        prescription: impl Into<String>,
    ) -> Result<(), ConsultationError> {
        let next = self.transition(ConsultationStage::Report, "issue_prescription")?;
        self.ensure_artifact(DiagnosisStage::Initial)?;

        self.artifacts.record(DiagnosisStage::Prescription, prescription);
        self.stage = next;
        Ok(())
    }

    /// Clears everything back to a fresh session in one assignment.
    pub(crate) fn restart(&mut self) {
        *self = Session::default();
    }

    /// Checks that a prescription could be issued right now.
    ///
    /// # Errors
    ///
    /// - `InvalidAction` outside `Consultation`
    /// - `MissingArtifact` if the initial diagnosis does not exist
    pub(crate) fn ensure_can_prescribe(&self) -> Result<(), ConsultationError> {
        self.transition(ConsultationStage::Report, "issue_prescription")?;
        self.ensure_artifact(DiagnosisStage::Initial)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn ensure(&self, allowed: bool, action: &'static str) -> Result<(), ConsultationError> {
        if allowed {
            Ok(())
        } else {
            Err(ConsultationError::invalid_action(action, self.stage))
        }
    }

    fn ensure_artifact(&self, stage: DiagnosisStage) -> Result<(), ConsultationError> {
        if self.artifacts.contains(stage) {
            Ok(())
        } else {
            Err(ConsultationError::MissingArtifact(stage))
        }
    }

    fn transition(
        &self,
        target: ConsultationStage,
        action: &'static str,
    ) -> Result<ConsultationStage, ConsultationError> {
        self.stage
            .transition_to(target)
            .map_err(|_| ConsultationError::invalid_action(action, self.stage))
    }

    fn append(&mut self, role: Role, content: impl Into<String>) {
        let sequence = self.messages.len() as u32 + 1;
        self.messages
            .push(ConversationMessage::new(role, content, sequence));
    }
}
