//! SelectScenario command handler.
//!
//! Picks a scenario preset during intake and pre-fills the draft with the
//! scenario's defaults.

use std::sync::Arc;

use crate::domain::consultation::{ConsultationError, Session};
use crate::domain::foundation::ValidationError;
use crate::domain::knowledge::{KnowledgeBase, ScenarioId};

/// Command to select a scenario.
#[derive(Debug, Clone)]
pub struct SelectScenarioCommand {
    pub scenario: ScenarioId,
}

/// Handler for SelectScenario commands.
pub struct SelectScenarioHandler {
    knowledge: Arc<KnowledgeBase>,
}

impl SelectScenarioHandler {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self { knowledge }
    }

    /// # Errors
    ///
    /// - `InvalidAction` outside `Intake`
    /// - `UnknownValue` if the knowledge base has no such scenario
    pub fn handle(
        &self,
        session: &mut Session,
        cmd: SelectScenarioCommand,
    ) -> Result<(), ConsultationError> {
        if !session.stage().accepts_intake() {
            return Err(ConsultationError::invalid_action("select_scenario", session.stage()));
        }

        let scenario = self.knowledge.scenario(&cmd.scenario).ok_or_else(|| {
            ValidationError::unknown_value("scenario", cmd.scenario.as_str())
        })?;

        session.select_scenario(scenario.id.clone(), &scenario.defaults)
    }
}
