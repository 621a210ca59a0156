//! Plain-text prescription report.
//!
//! The report is the prescription artifact wrapped in a fixed header and
//! footer. Writing it somewhere is left to the caller.

use crate::domain::foundation::Timestamp;

use super::{ConsultationError, ConsultationStage, DiagnosisStage, Session, StoreProfile};

const RULE: &str = "==================================================";
const THIN_RULE: &str = "--------------------------------------------------";
const FOOTER: &str = "This prescription is generated from the information you provided.\n\
It is advisory only; check figures and local conditions before acting on it.";

/// Renderable report for a session in `Report`.
#[derive(Debug, Clone)]
pub struct ReportDocument<'a> {
    profile: &'a StoreProfile,
    scenario_title: &'a str,
    prescription: &'a str,
    issued_at: Timestamp,
}

impl<'a> ReportDocument<'a> {
    /// Builds the report for a finished session.
    ///
    /// # Errors
    ///
    /// - `InvalidAction` unless the session is in `Report`
    /// - `MissingArtifact` if the prescription is absent
    pub fn from_session(
        session: &'a Session,
        scenario_title: &'a str,
    ) -> Result<Self, ConsultationError> {
        if session.stage() != ConsultationStage::Report {
            return Err(ConsultationError::invalid_action("export_report", session.stage()));
        }
        let artifact = session
            .artifacts()
            .get(DiagnosisStage::Prescription)
            .ok_or(ConsultationError::MissingArtifact(DiagnosisStage::Prescription))?;
        let profile = session
            .profile()
            .ok_or_else(|| ConsultationError::invalid_action("export_report", session.stage()))?;

        Ok(Self {
            profile,
            scenario_title,
            prescription: artifact.content(),
            issued_at: *artifact.generated_at(),
        })
    }

    /// Renders the full report text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(RULE);
        out.push_str("\n  STORE PRESCRIPTION REPORT\n");
        out.push_str(RULE);
        out.push('\n');
        out.push_str(&format!("Store:    {}\n", self.profile.display_name()));
        out.push_str(&format!("Region:   {}\n", self.profile.region()));
        out.push_str(&format!("Category: {}\n", self.profile.category()));
        out.push_str(&format!("Scenario: {}\n", self.scenario_title));
        out.push_str(&format!("Issued:   {}\n", self.issued_at.date_label()));
        out.push_str(THIN_RULE);
        out.push_str("\n\n");
        out.push_str(self.prescription.trim());
        out.push_str("\n\n");
        out.push_str(THIN_RULE);
        out.push('\n');
        out.push_str(FOOTER);
        out.push('\n');
        out
    }

    /// Default file name for saving the report.
    pub fn file_name(&self) -> String {
        format!("prescription-{}.txt", self.issued_at.date_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::consultation::{LocationType, ProfileDraft, SalesTier};

    fn finished_session() -> Session {
        let profile = ProfileDraft::new()
            .with_store_name("Bean There")
            .with_region("district-X")
            .with_category("cafe")
            .with_location_type(LocationType::Residential)
            .with_sales_tier(SalesTier::Medium)
            .with_concern("revisit rate too low")
            .validate()
            .unwrap();
        let mut session = Session::new();
        session.attach_profile(profile).unwrap();
        session.begin_consultation("assessment").unwrap();
        session.issue_prescription("1. Launch a stamp card.").unwrap();
        session
    }

    #[test]
    fn renders_header_body_and_footer() {
        let session = finished_session();
        let text = ReportDocument::from_session(&session, "Revisit rate")
            .unwrap()
            .render();

        assert!(text.starts_with(RULE));
        assert!(text.contains("Store:    Bean There"));
        assert!(text.contains("Scenario: Revisit rate"));
        assert!(text.contains("1. Launch a stamp card."));
        assert!(text.trim_end().ends_with("before acting on it."));
    }

    #[test]
    fn rejected_before_report_stage() {
        let session = Session::new();
        let result = ReportDocument::from_session(&session, "x");
        assert!(matches!(result, Err(ConsultationError::InvalidAction { .. })));
    }

    #[test]
    fn file_name_carries_issue_date() {
        let session = finished_session();
        let doc = ReportDocument::from_session(&session, "x").unwrap();
        assert!(doc.file_name().starts_with("prescription-"));
        assert!(doc.file_name().ends_with(".txt"));
    }
}
