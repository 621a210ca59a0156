//! Consultation lifecycle stages.
//!
//! Defines the stages of a consultation and valid transitions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The lifecycle stage of a consultation.
///
/// - `Intake`: collecting the store profile, scenario may change
/// - `Consultation`: initial diagnosis issued, follow-up questions allowed
/// - `Report`: prescription issued, read-only until restart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationStage {
    /// Profile form is being filled in.
    #[default]
    Intake,

    /// Dialogue with the consultant.
    Consultation,

    /// Prescription issued.
    Report,
}

impl ConsultationStage {
    /// Returns true if the scenario and intake form may still change.
    pub fn accepts_intake(&self) -> bool {
        matches!(self, Self::Intake)
    }

    /// Returns true if follow-up questions are accepted.
    pub fn accepts_questions(&self) -> bool {
        matches!(self, Self::Consultation)
    }

    /// Returns true if the session may hold conversation messages.
    pub fn holds_messages(&self) -> bool {
        matches!(self, Self::Consultation | Self::Report)
    }
}

impl fmt::Display for ConsultationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsultationStage::Intake => f.write_str("intake"),
            ConsultationStage::Consultation => f.write_str("consultation"),
            ConsultationStage::Report => f.write_str("report"),
        }
    }
}

impl StateMachine for ConsultationStage {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ConsultationStage::*;
        matches!(
            (self, target),
            // Profile submitted and diagnosed
            (Intake, Consultation) |
            // Prescription issued
            (Consultation, Report) |
            // Restart from anywhere
            (Intake, Intake) |
            (Consultation, Intake) |
            (Report, Intake)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ConsultationStage::*;
        match self {
            Intake => vec![Intake, Consultation],
            Consultation => vec![Intake, Report],
            Report => vec![Intake],
        }
    }
}
