//! IssuePrescription command handler.
//!
//! Generates the final prescription and closes the consultation.

use std::sync::Arc;

use crate::domain::consultation::{ConsultationError, Session};
use crate::domain::prompt::PromptTask;
use crate::ports::{AIProvider, ReferenceSource};

use super::GenerationPipeline;

/// Result of a successful prescription.
#[derive(Debug, Clone)]
pub struct IssuePrescriptionResult {
    pub prescription: String,
}

/// Handler for IssuePrescription commands.
pub struct IssuePrescriptionHandler<P: ?Sized + AIProvider, S: ?Sized + ReferenceSource> {
    pipeline: Arc<GenerationPipeline<P, S>>,
}

impl<P, S> IssuePrescriptionHandler<P, S>
where
    P: ?Sized + AIProvider,
    S: ?Sized + ReferenceSource,
{
    pub fn new(pipeline: Arc<GenerationPipeline<P, S>>) -> Self {
        Self { pipeline }
    }

    /// # Errors
    ///
    /// - `InvalidAction` outside `Consultation`
    /// - `MissingArtifact` without the initial diagnosis
    /// - `Generation` if the backend fails
    pub async fn handle(
        &self,
        session: &mut Session,
    ) -> Result<IssuePrescriptionResult, ConsultationError> {
        session.ensure_can_prescribe()?;

        let prescription = self.pipeline.generate(PromptTask::Prescribe, session).await?;
        session.issue_prescription(prescription.clone())?;

        Ok(IssuePrescriptionResult { prescription })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::application::consultation::fixtures::{complete_draft, consulting_session, pipeline};
    use crate::domain::consultation::{
        ConsultationStage, DiagnosisArtifacts, DiagnosisStage, ProfileDraft,
    };

    #[tokio::test]
    async fn prescription_moves_to_report() {
        let provider = MockAIProvider::new().with_response("1. Launch a stamp card.");
        let handler = IssuePrescriptionHandler::new(pipeline(&provider));
        let mut session = consulting_session();

        let result = handler.handle(&mut session).await.unwrap();

        assert_eq!(result.prescription, "1. Launch a stamp card.");
        assert_eq!(session.stage(), ConsultationStage::Report);
        assert_eq!(
            session.artifact(DiagnosisStage::Prescription),
            Some("1. Launch a stamp card.")
        );
        assert!(provider
            .last_prompt()
            .unwrap()
            .ends_with(PromptTask::Prescribe.directive()));
    }

    #[tokio::test]
    async fn missing_initial_artifact_fails_and_stays() {
        let provider = MockAIProvider::new();
        let handler = IssuePrescriptionHandler::new(pipeline(&provider));
        let mut session = Session::reconstitute(
            ConsultationStage::Consultation,
            None,
            ProfileDraft::new(),
            Some(complete_draft().validate().unwrap()),
            Vec::new(),
            DiagnosisArtifacts::new(),
        );

        let result = handler.handle(&mut session).await;

        assert!(matches!(
            result,
            Err(ConsultationError::MissingArtifact(DiagnosisStage::Initial))
        ));
        assert_eq!(session.stage(), ConsultationStage::Consultation);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn generation_failure_stays_in_consultation() {
        let provider = MockAIProvider::new().with_error(MockError::RateLimited {
            retry_after_secs: 20,
        });
        let handler = IssuePrescriptionHandler::new(pipeline(&provider));
        let mut session = consulting_session();
        let before = session.clone();

        let err = handler.handle(&mut session).await.unwrap_err();

        assert_eq!(err.to_string(), "generation failed: rate limited: retry after 20s");
        assert_eq!(session, before);
    }

    #[tokio::test]
    async fn rejected_in_intake() {
        let provider = MockAIProvider::new();
        let handler = IssuePrescriptionHandler::new(pipeline(&provider));
        let mut session = Session::new();

        assert!(matches!(
            handler.handle(&mut session).await,
            Err(ConsultationError::InvalidAction { .. })
        ));
    }
}
