//! AskQuestion command handler.
//!
//! Appends the owner's question and the consultant's reply, or nothing.

use std::sync::Arc;

use crate::domain::consultation::{ConsultationError, Session};
use crate::domain::prompt::PromptTask;
use crate::ports::{AIProvider, ReferenceSource};

use super::GenerationPipeline;

/// Command to ask a follow-up question.
#[derive(Debug, Clone)]
pub struct AskQuestionCommand {
    pub question: String,
}

/// Result of a successful question.
#[derive(Debug, Clone)]
pub struct AskQuestionResult {
    pub reply: String,
}

/// Handler for AskQuestion commands.
pub struct AskQuestionHandler<P: ?Sized + AIProvider, S: ?Sized + ReferenceSource> {
    pipeline: Arc<GenerationPipeline<P, S>>,
}

impl<P, S> AskQuestionHandler<P, S>
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
    /// - `Validation` for a blank question
    /// - `Generation` if the backend fails
    pub async fn handle(
        &self,
        session: &mut Session,
        cmd: AskQuestionCommand,
    ) -> Result<AskQuestionResult, ConsultationError> {
        let mut next = session.clone();
        next.push_question(&cmd.question)?;

        let reply = self.pipeline.generate(PromptTask::Answer, &next).await?;
        next.push_reply(reply.clone())?;

        *session = next;
        Ok(AskQuestionResult { reply })
    }
}
