//! Consultation use cases.
//!
//! One handler per intent plus the engine that routes intents to them.
//! Handlers that call the generative backend work on a copy of the session
//! and commit it only after generation succeeds.

mod ask_question;
mod engine;
mod generation;
mod issue_prescription;
mod select_scenario;
mod submit_profile;

pub use ask_question::{AskQuestionCommand, AskQuestionHandler, AskQuestionResult};
pub use engine::ConsultationEngine;
pub use generation::GenerationPipeline;
pub use issue_prescription::{IssuePrescriptionHandler, IssuePrescriptionResult};
pub use select_scenario::{SelectScenarioCommand, SelectScenarioHandler};
pub use submit_profile::{SubmitProfileCommand, SubmitProfileHandler, SubmitProfileResult};
