//! Consultation engine.
//!
//! Single entry point for the interactive driver: takes an intent, routes
//! it to its handler and returns a fresh view of the session.

use std::sync::Arc;

use crate::domain::consultation::{
    ConsultationError, ConsultationView, Intent, ReportDocument, Session,
};
use crate::domain::knowledge::KnowledgeBase;
use crate::ports::{AIProvider, ReferenceSource};

use super::{
    AskQuestionCommand, AskQuestionHandler, GenerationPipeline, IssuePrescriptionHandler,
    SelectScenarioCommand, SelectScenarioHandler, SubmitProfileCommand, SubmitProfileHandler,
};

/// Routes intents to handlers.
///
/// The engine holds no session state of its own; the caller owns the
/// `Session` and passes it in for every intent.
pub struct ConsultationEngine<P: ?Sized + AIProvider, S: ?Sized + ReferenceSource> {
    knowledge: Arc<KnowledgeBase>,
    select_scenario: SelectScenarioHandler,
    submit_profile: SubmitProfileHandler<P, S>,
    ask_question: AskQuestionHandler<P, S>,
    issue_prescription: IssuePrescriptionHandler<P, S>,
}

impl<P, S> ConsultationEngine<P, S>
where
    P: ?Sized + AIProvider,
    S: ?Sized + ReferenceSource,
{
    pub fn new(pipeline: GenerationPipeline<P, S>) -> Self {
        let knowledge = Arc::clone(pipeline.knowledge());
        let pipeline = Arc::new(pipeline);
        Self {
            select_scenario: SelectScenarioHandler::new(Arc::clone(&knowledge)),
            submit_profile: SubmitProfileHandler::new(Arc::clone(&pipeline)),
            ask_question: AskQuestionHandler::new(Arc::clone(&pipeline)),
            issue_prescription: IssuePrescriptionHandler::new(pipeline),
            knowledge,
        }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Applies one intent to the session.
    ///
    /// On error the session is exactly as it was before the call.
    pub async fn handle(
        &self,
        session: &mut Session,
        intent: Intent,
    ) -> Result<ConsultationView, ConsultationError> {
        let action = intent.name();
        let from = session.stage();

        let result = match intent {
            Intent::SelectScenario(scenario) => self
                .select_scenario
                .handle(session, SelectScenarioCommand { scenario }),
            Intent::SubmitProfile(draft) => self
                .submit_profile
                .handle(session, SubmitProfileCommand { draft })
                .await
                .map(|_| ()),
            Intent::AskQuestion(question) => self
                .ask_question
                .handle(session, AskQuestionCommand { question })
                .await
                .map(|_| ()),
            Intent::IssuePrescription => self
                .issue_prescription
                .handle(session)
                .await
                .map(|_| ()),
            Intent::Restart => {
                session.restart();
                Ok(())
            }
        };

        match &result {
            Ok(()) => tracing::info!(
                action,
                from = %from,
                to = %session.stage(),
                messages = session.messages().len(),
                "intent handled"
            ),
            Err(err) => tracing::warn!(action, stage = %from, error = %err, "intent rejected"),
        }

        result.map(|()| session.view())
    }

    /// Title of the scenario the session resolves to.
    pub fn scenario_title(&self, session: &Session) -> &str {
        &self.knowledge.resolve(session.scenario()).title
    }

    /// Builds the prescription report for a session in `Report`.
    pub fn report<'a>(
        &'a self,
        session: &'a Session,
    ) -> Result<ReportDocument<'a>, ConsultationError> {
        ReportDocument::from_session(session, self.scenario_title(session))
    }
}
