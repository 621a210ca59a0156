//! Consultation domain module.
//!
//! Manages one guided consultation: intake, initial diagnosis, follow-up
//! dialogue and the final prescription report.

mod artifacts;
mod errors;
mod intent;
mod message;
mod profile;
mod report;
mod session;
mod stage;
mod view;

pub use artifacts::{DiagnosisArtifact, DiagnosisArtifacts, DiagnosisStage};
pub use errors::ConsultationError;
pub use intent::Intent;
pub use message::{ConversationMessage, Role};
pub use profile::{LocationType, ProfileDraft, SalesTier, StoreProfile};
pub use report::ReportDocument;
pub use session::Session;
pub use stage::ConsultationStage;
pub use view::ConsultationView;
