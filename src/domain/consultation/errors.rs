//! Consultation-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::ports::AIError;

use super::{ConsultationStage, DiagnosisStage};

/// Errors returned by consultation operations.
///
/// None of these are fatal: every failure leaves the session in the stage it
/// was in before the intent was handled.
#[derive(Debug, thiserror::Error)]
pub enum ConsultationError {
    /// Intake or question input is missing or malformed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The intent is not legal in the current stage.
    #[error("{action} is not allowed during {stage}")]
    InvalidAction {
        action: &'static str,
        stage: ConsultationStage,
    },

    /// A required artifact has not been generated yet.
    #[error("the {0} diagnosis has not been generated yet")]
    MissingArtifact(DiagnosisStage),

    /// The generative backend failed. The cause is shown to the user as-is.
    #[error("generation failed: {cause}")]
    Generation { cause: AIError },
}

impl ConsultationError {
    pub fn invalid_action(action: &'static str, stage: ConsultationStage) -> Self {
        ConsultationError::InvalidAction { action, stage }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ConsultationError::Validation(err) => err.code(),
            ConsultationError::InvalidAction { .. } => ErrorCode::InvalidAction,
            ConsultationError::MissingArtifact(_) => ErrorCode::MissingArtifact,
            ConsultationError::Generation {
                cause: AIError::RateLimited { .. },
            } => ErrorCode::RateLimited,
            ConsultationError::Generation { .. } => ErrorCode::GenerationFailed,
        }
    }
}

impl From<AIError> for ConsultationError {
    fn from(cause: AIError) -> Self {
        ConsultationError::Generation { cause }
    }
}

impl From<&ConsultationError> for DomainError {
    fn from(err: &ConsultationError) -> Self {
        match err {
            ConsultationError::Validation(inner) => inner.clone().into(),
            ConsultationError::InvalidAction { action, stage } => {
                DomainError::new(err.code(), err.to_string())
                    .with_detail("action", *action)
                    .with_detail("stage", stage.to_string())
            }
            _ => DomainError::new(err.code(), err.to_string()),
        }
    }
}
