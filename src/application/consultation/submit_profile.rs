//! SubmitProfile command handler.
//!
//! Validates the intake form, runs the initial diagnosis and opens the
//! consultation. Nothing is written to the session unless generation
//! succeeds.

use std::sync::Arc;

use crate::domain::consultation::{ConsultationError, ProfileDraft, Session};
use crate::domain::prompt::PromptTask;
use crate::ports::{AIProvider, ReferenceSource};

use super::GenerationPipeline;

/// Command to submit the intake form.
#[derive(Debug, Clone)]
pub struct SubmitProfileCommand {
    pub draft: ProfileDraft,
}

/// Result of a successful submission.
#[derive(Debug, Clone)]
pub struct SubmitProfileResult {
    /// The initial diagnosis, also the opening assistant message.
    pub diagnosis: String,
}

/// Handler for SubmitProfile commands.
pub struct SubmitProfileHandler<P: ?Sized + AIProvider, S: ?Sized + ReferenceSource> {
    pipeline: Arc<GenerationPipeline<P, S>>,
}

impl<P, S> SubmitProfileHandler<P, S>
where
    P: ?Sized + AIProvider,
    S: ?Sized + ReferenceSource,
{
    pub fn new(pipeline: Arc<GenerationPipeline<P, S>>) -> Self {
        Self { pipeline }
    }

    /// # Errors
    ///
    /// - `InvalidAction` outside `Intake`
    /// - `Validation` naming every missing required field
    /// - `Generation` if the backend fails
    pub async fn handle(
        &self,
        session: &mut Session,
        cmd: SubmitProfileCommand,
    ) -> Result<SubmitProfileResult, ConsultationError> {
        let mut next = session.clone();
        next.submit_draft(&cmd.draft)?;

        let diagnosis = self.pipeline.generate(PromptTask::Diagnose, &next).await?;
        next.begin_consultation(diagnosis.clone())?;

        *session = next;
        Ok(SubmitProfileResult { diagnosis })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::application::consultation::fixtures::{complete_draft, pipeline};
    use crate::domain::consultation::{ConsultationStage, DiagnosisStage, Role};
    use crate::domain::foundation::ValidationError;

    #[tokio::test]
    async fn valid_submission_opens_consultation() {
        let provider = MockAIProvider::new().with_response("Welcome! Here is what I see.");
        let handler = SubmitProfileHandler::new(pipeline(&provider));
        let mut session = Session::new();

        let result = handler
            .handle(&mut session, SubmitProfileCommand { draft: complete_draft() })
            .await
            .unwrap();

        assert_eq!(result.diagnosis, "Welcome! Here is what I see.");
        assert_eq!(session.stage(), ConsultationStage::Consultation);
        assert_eq!(session.artifact(DiagnosisStage::Initial), Some("Welcome! Here is what I see."));
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role(), Role::Assistant);
    }

    #[tokio::test]
    async fn diagnose_prompt_contains_profile() {
        let provider = MockAIProvider::new();
        let handler = SubmitProfileHandler::new(pipeline(&provider));
        let mut session = Session::new();

        handler
            .handle(&mut session, SubmitProfileCommand { draft: complete_draft() })
            .await
            .unwrap();

        let prompt = provider.last_prompt().unwrap();
        assert!(prompt.contains("Category: cafe"));
        assert!(prompt.ends_with(PromptTask::Diagnose.directive()));
    }

    #[tokio::test]
    async fn missing_fields_fail_without_calling_provider() {
        let provider = MockAIProvider::new();
        let handler = SubmitProfileHandler::new(pipeline(&provider));
        let mut session = Session::new();

        let err = handler
            .handle(
                &mut session,
                SubmitProfileCommand {
                    draft: ProfileDraft::new().with_category("cafe"),
                },
            )
            .await
            .unwrap_err();

        match err {
            ConsultationError::Validation(ValidationError::MissingFields { fields }) => {
                assert_eq!(fields, vec!["region", "location_type", "sales_tier", "concern"]);
            }
            other => panic!("expected MissingFields, got {other:?}"),
        }
        assert_eq!(session.stage(), ConsultationStage::Intake);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn generation_failure_leaves_session_untouched() {
        let provider = MockAIProvider::new().with_error(MockError::Unavailable {
            message: "quota exhausted".to_string(),
        });
        let handler = SubmitProfileHandler::new(pipeline(&provider));
        let mut session = Session::new();

        let err = handler
            .handle(&mut session, SubmitProfileCommand { draft: complete_draft() })
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "generation failed: provider unavailable: quota exhausted"
        );
        assert_eq!(session, Session::new());
    }
}
