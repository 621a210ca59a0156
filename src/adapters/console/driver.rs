//! Console driver.
//!
//! Owns the session and the intake form being edited, turns console
//! commands into intents and formats the results as text.

use std::path::{Path, PathBuf};

use crate::application::consultation::ConsultationEngine;
use crate::domain::consultation::{
    ConsultationError, ConsultationStage, DiagnosisStage, Intent, ProfileDraft, Role, Session,
};
use crate::domain::foundation::{DomainError, ValidationError};
use crate::domain::knowledge::ScenarioId;
use crate::ports::{AIError, AIProvider, ReferenceSource};

use super::command::{CommandError, ConsoleCommand, HELP};

/// Errors shown to the user; none of them end the session.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Field(#[from] ValidationError),

    #[error(transparent)]
    Consultation(#[from] ConsultationError),

    #[error("failed to write report to {path}: {source}")]
    Export {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ConsoleError {
    /// One-line message for the transcript.
    pub fn user_message(&self) -> String {
        match self {
            ConsoleError::Consultation(err) => {
                let domain = DomainError::from(err);
                match err {
                    ConsultationError::Generation { cause } if cause.is_retryable() => {
                        format!("{} (temporary, try again)", domain.message)
                    }
                    _ => domain.message,
                }
            }
            other => other.to_string(),
        }
    }

    /// Backend failure behind this error, if any.
    pub fn generation_cause(&self) -> Option<&AIError> {
        match self {
            ConsoleError::Consultation(ConsultationError::Generation { cause }) => Some(cause),
            _ => None,
        }
    }
}

/// What the driver wants printed after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleReply {
    Text(String),
    Silent,
    Quit,
}

/// Line-oriented front-end over the consultation engine.
pub struct ConsoleDriver<P: ?Sized + AIProvider, S: ?Sized + ReferenceSource> {
    engine: ConsultationEngine<P, S>,
    session: Session,
    form: ProfileDraft,
}

impl<P, S> ConsoleDriver<P, S>
where
    P: ?Sized + AIProvider,
    S: ?Sized + ReferenceSource,
{
    pub fn new(engine: ConsultationEngine<P, S>) -> Self {
        Self {
            engine,
            session: Session::new(),
            form: ProfileDraft::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Values the owner typed with `/set`.
    pub fn form(&self) -> &ProfileDraft {
        &self.form
    }

    /// The form as it would be submitted: the owner's values over the
    /// selected scenario's defaults.
    pub fn intake_form(&self) -> ProfileDraft {
        self.session.draft().merged_with(&self.form)
    }

    /// Greeting shown once at startup.
    pub fn banner(&self) -> String {
        let kb = self.engine.knowledge();
        format!(
            "Store consultation (knowledge base v{}).\n\
             Pick a scenario with /scenario, fill the form with /set, then /submit.\n\
             Type /help for all commands.\n\n{}",
            kb.version(),
            self.scenario_list()
        )
    }

    /// Parses and runs one input line.
    pub async fn run_line(&mut self, line: &str) -> Result<ConsoleReply, ConsoleError> {
        let command = ConsoleCommand::parse(line)?;
        self.run(command).await
    }

    /// Runs one command.
    pub async fn run(&mut self, command: ConsoleCommand) -> Result<ConsoleReply, ConsoleError> {
        let reply = match command {
            ConsoleCommand::Empty => ConsoleReply::Silent,
            ConsoleCommand::Help => ConsoleReply::Text(HELP.to_string()),
            ConsoleCommand::Quit => ConsoleReply::Quit,
            ConsoleCommand::Scenarios => ConsoleReply::Text(self.scenario_list()),
            ConsoleCommand::View => ConsoleReply::Text(self.render_view()),
            ConsoleCommand::Scenario(id) => {
                let id = ScenarioId::new(id)?;
                self.engine
                    .handle(&mut self.session, Intent::SelectScenario(id))
                    .await?;
                ConsoleReply::Text(format!(
                    "Scenario: {}\n{}",
                    self.engine.scenario_title(&self.session),
                    render_form(&self.intake_form())
                ))
            }
            ConsoleCommand::Set { field, value } => {
                if !self.session.stage().accepts_intake() {
                    return Err(ConsultationError::invalid_action(
                        "edit_profile",
                        self.session.stage(),
                    )
                    .into());
                }
                self.form.set_field(&field, &value)?;
                ConsoleReply::Silent
            }
            ConsoleCommand::Submit => {
                self.engine
                    .handle(&mut self.session, Intent::SubmitProfile(self.form.clone()))
                    .await?;
                ConsoleReply::Text(self.last_reply())
            }
            ConsoleCommand::Ask(question) => {
                self.engine
                    .handle(&mut self.session, Intent::AskQuestion(question))
                    .await?;
                ConsoleReply::Text(self.last_reply())
            }
            ConsoleCommand::Prescribe => {
                self.engine
                    .handle(&mut self.session, Intent::IssuePrescription)
                    .await?;
                let report = self.engine.report(&self.session)?;
                ConsoleReply::Text(format!(
                    "{}\nSave it with /export [path], or /restart to begin again.",
                    report.render()
                ))
            }
            ConsoleCommand::Export(path) => {
                let written = self.export(path.as_deref()).await?;
                ConsoleReply::Text(format!("Report saved to {}", written.display()))
            }
            ConsoleCommand::Restart => {
                self.engine.handle(&mut self.session, Intent::Restart).await?;
                self.form = ProfileDraft::new();
                ConsoleReply::Text("Session cleared.".to_string())
            }
        };
        Ok(reply)
    }

    /// Writes the report and returns the path used.
    async fn export(&self, path: Option<&Path>) -> Result<PathBuf, ConsoleError> {
        let report = self.engine.report(&self.session)?;
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(report.file_name()));

        tokio::fs::write(&path, report.render())
            .await
            .map_err(|source| ConsoleError::Export {
                path: path.clone(),
                source,
            })?;
        tracing::info!(path = %path.display(), "report exported");
        Ok(path)
    }

    fn last_reply(&self) -> String {
        self.session
            .messages()
            .iter()
            .rev()
            .find(|m| m.role() == Role::Assistant)
            .map(|m| m.content().to_string())
            .unwrap_or_default()
    }

    fn scenario_list(&self) -> String {
        let kb = self.engine.knowledge();
        let selected = kb.resolve(self.session.scenario()).id.clone();
        let mut out = String::from("Scenarios:");
        for scenario in kb.scenarios() {
            let mark = if scenario.id == selected { '*' } else { ' ' };
            out.push_str(&format!("\n {mark} {:<28} {}", scenario.id.as_str(), scenario.title));
        }
        out
    }

    fn render_view(&self) -> String {
        let view = self.session.view();
        let mut out = format!(
            "Stage: {}\nScenario: {}",
            view.stage,
            self.engine.scenario_title(&self.session)
        );

        match view.stage {
            ConsultationStage::Intake => {
                out.push('\n');
                out.push_str(&render_form(&self.intake_form()));
            }
            _ => {
                for message in &view.messages {
                    out.push_str(&format!(
                        "\n\n[{}] {}:\n{}",
                        message.sequence(),
                        message.role().label(),
                        message.content()
                    ));
                }
                if view.artifact(DiagnosisStage::Prescription).is_some() {
                    out.push_str("\n\nPrescription issued. Use /export to save the report.");
                }
            }
        }
        out
    }
}

fn render_form(form: &ProfileDraft) -> String {
    let text = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    let rows = [
        ("store_name", text(&form.store_name)),
        ("region", text(&form.region)),
        ("sub_location", text(&form.sub_location)),
        ("category", text(&form.category)),
        (
            "location_type",
            form.location_type.map_or("-".to_string(), |v| v.to_string()),
        ),
        (
            "sales_tier",
            form.sales_tier.map_or("-".to_string(), |v| v.to_string()),
        ),
        ("concern", text(&form.concern)),
        ("demographic_tags", form.demographic_tags.join(", ")),
    ];

    let mut out = String::from("Intake form:");
    for (name, value) in rows {
        let required = if ProfileDraft::REQUIRED_FIELDS.contains(&name) { "*" } else { " " };
        out.push_str(&format!("\n  {required}{name:<17} {value}"));
    }
    out
}
