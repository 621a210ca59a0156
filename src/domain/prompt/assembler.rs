//! Prompt assembly.
//!
//! Every prompt sent to the generative backend is built here. The output is
//! a pure function of its inputs: same session, knowledge base, reference
//! document and config give the same text.

use crate::domain::consultation::{ConversationMessage, Session, StoreProfile};
use crate::domain::knowledge::{KnowledgeBase, KnowledgeBlock};

use super::reference::truncate_chars;
use super::{PromptTask, ReferenceDocument};

/// Appended to a history message that was shortened.
pub const ELLIPSIS_MARKER: &str = "…";

const NO_PROFILE: &str = "(no profile submitted)";
const NO_MESSAGES: &str = "(no messages yet)";

/// Size limits applied while assembling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblerConfig {
    /// Characters of reference document kept, counted from the head.
    pub max_reference_chars: usize,
    /// Number of most recent messages included for `prescribe`.
    pub recent_window: usize,
    /// Per-message character budget for the `prescribe` window.
    pub recent_message_chars: usize,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            max_reference_chars: 12_000,
            recent_window: 6,
            recent_message_chars: 600,
        }
    }
}

/// Builds prompts in a fixed section order:
///
/// 1. persona, domain facts and response rules of the scenario
/// 2. reference data (excerpt or marker)
/// 3. store profile
/// 4. conversation history (task dependent)
/// 5. task directive
#[derive(Debug, Clone, Default)]
pub struct PromptAssembler {
    config: AssemblerConfig,
}

impl PromptAssembler {
    pub fn new(config: AssemblerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    /// Assembles the prompt for `task`.
    ///
    /// The scenario block is resolved through the knowledge base, so an
    /// unknown or absent scenario id uses the default scenario.
    pub fn assemble(
        &self,
        task: PromptTask,
        session: &Session,
        knowledge: &KnowledgeBase,
        reference: &ReferenceDocument,
    ) -> String {
        let scenario = knowledge.resolve(session.scenario());

        let mut sections = vec![
            knowledge_section(&scenario.title, &scenario.knowledge),
            section("Reference data", reference.excerpt(self.config.max_reference_chars)),
            section("Store profile", profile_lines(session.profile())),
        ];

        match task {
            PromptTask::Diagnose => {}
            PromptTask::Answer => {
                sections.push(section("Conversation", transcript(session.messages(), None)));
            }
            PromptTask::Prescribe => {
                let messages = session.messages();
                let start = messages.len().saturating_sub(self.config.recent_window);
                sections.push(section(
                    "Recent conversation",
                    transcript(&messages[start..], Some(self.config.recent_message_chars)),
                ));
            }
        }

        sections.push(section("Task", task.directive().to_string()));
        sections.join("\n\n")
    }
}

fn section(title: &str, body: String) -> String {
    format!("## {title}\n{body}")
}

fn knowledge_section(title: &str, block: &KnowledgeBlock) -> String {
    let mut body = String::new();
    body.push_str(block.persona.trim());
    body.push_str(&format!("\nScenario: {title} (knowledge v{})", block.version));

    if !block.domain_facts.is_empty() {
        body.push_str("\n\nDomain facts:");
        for fact in &block.domain_facts {
            body.push_str(&format!("\n- {fact}"));
        }
    }
    if !block.response_rules.is_empty() {
        body.push_str("\n\nResponse rules:");
        for rule in &block.response_rules {
            body.push_str(&format!("\n- {rule}"));
        }
    }
    section("Consultant", body)
}

fn profile_lines(profile: Option<&StoreProfile>) -> String {
    match profile {
        Some(profile) => profile
            .labeled_fields()
            .into_iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect::<Vec<_>>()
            .join("\n"),
        None => NO_PROFILE.to_string(),
    }
}

fn transcript(messages: &[ConversationMessage], per_message: Option<usize>) -> String {
    if messages.is_empty() {
        return NO_MESSAGES.to_string();
    }

    messages
        .iter()
        .map(|msg| {
            let content = match per_message {
                Some(budget) => shorten(msg.content(), budget),
                None => msg.content().to_string(),
            };
            format!("{}: {}", msg.role().label(), content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn shorten(text: &str, budget: usize) -> String {
    match truncate_chars(text, budget) {
        (head, true) => format!("{head}{ELLIPSIS_MARKER}"),
        (head, false) => head.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::consultation::{LocationType, ProfileDraft, SalesTier};
    use crate::domain::knowledge::{builtin, ScenarioId};
    use crate::domain::prompt::{NO_REFERENCE_MARKER, TRUNCATION_MARKER};
    use proptest::prelude::*;

    fn consulting_session(questions: usize) -> Session {
        let profile = ProfileDraft::new()
            .with_region("district-X")
            .with_category("cafe")
            .with_location_type(LocationType::Residential)
            .with_sales_tier(SalesTier::Medium)
            .with_concern("revisit rate too low")
            .validate()
            .unwrap();

        let mut session = Session::new();
        session
            .select_scenario(
                ScenarioId::new("revisit-rate-improvement").unwrap(),
                &ProfileDraft::new(),
            )
            .unwrap();
        session.attach_profile(profile).unwrap();
        session.begin_consultation("Initial assessment").unwrap();
        for i in 0..questions {
            session.push_question(&format!("question {i}")).unwrap();
            session.push_reply(format!("reply {i}")).unwrap();
        }
        session
    }

    fn position(prompt: &str, needle: &str) -> usize {
        prompt
            .find(needle)
            .unwrap_or_else(|| panic!("missing {needle:?} in prompt"))
    }

    mod ordering {
        use super::*;

        #[test]
        fn sections_appear_in_fixed_order() {
            let session = consulting_session(1);
            let prompt = PromptAssembler::default().assemble(
                PromptTask::Answer,
                &session,
                builtin(),
                &ReferenceDocument::available("REFERENCE BODY"),
            );

            let persona = position(&prompt, "## Consultant");
            let reference = position(&prompt, "REFERENCE BODY");
            let profile = position(&prompt, "Region: district-X");
            let history = position(&prompt, "Owner: question 0");
            let directive = position(&prompt, PromptTask::Answer.directive());

            assert!(persona < reference);
            assert!(reference < profile);
            assert!(profile < history);
            assert!(history < directive);
            assert!(prompt.ends_with(PromptTask::Answer.directive()));
        }

        #[test]
        fn uses_selected_scenario_block() {
            let session = consulting_session(0);
            let prompt = PromptAssembler::default().assemble(
                PromptTask::Diagnose,
                &session,
                builtin(),
                &ReferenceDocument::unavailable("none"),
            );
            assert!(prompt.contains("Scenario: Improving the revisit rate"));
        }

        #[test]
        fn unknown_scenario_falls_back_to_default_block() {
            let mut session = Session::new();
            session
                .select_scenario(ScenarioId::new("not-a-scenario").unwrap(), &ProfileDraft::new())
                .unwrap();
            let prompt = PromptAssembler::default().assemble(
                PromptTask::Diagnose,
                &session,
                builtin(),
                &ReferenceDocument::unavailable("none"),
            );
            assert!(prompt.contains("Scenario: General store check-up"));
            assert!(prompt.contains(NO_PROFILE));
        }
    }

    mod history {
        use super::*;

        #[test]
        fn diagnose_has_no_history_section() {
            let session = consulting_session(2);
            let prompt = PromptAssembler::default().assemble(
                PromptTask::Diagnose,
                &session,
                builtin(),
                &ReferenceDocument::unavailable("none"),
            );
            assert!(!prompt.contains("## Conversation"));
            assert!(!prompt.contains("## Recent conversation"));
            assert!(!prompt.contains("question 0"));
        }

        #[test]
        fn answer_includes_full_transcript() {
            let session = consulting_session(5);
            let prompt = PromptAssembler::default().assemble(
                PromptTask::Answer,
                &session,
                builtin(),
                &ReferenceDocument::unavailable("none"),
            );
            assert!(prompt.contains("Consultant: Initial assessment"));
            assert!(prompt.contains("Owner: question 0"));
            assert!(prompt.contains("Consultant: reply 4"));
        }

        #[test]
        fn prescribe_keeps_only_recent_window() {
            let session = consulting_session(5);
            let assembler = PromptAssembler::new(AssemblerConfig {
                recent_window: 2,
                ..AssemblerConfig::default()
            });
            let prompt = assembler.assemble(
                PromptTask::Prescribe,
                &session,
                builtin(),
                &ReferenceDocument::unavailable("none"),
            );
            assert!(prompt.contains("## Recent conversation"));
            assert!(prompt.contains("Owner: question 4"));
            assert!(prompt.contains("Consultant: reply 4"));
            assert!(!prompt.contains("reply 3"));
            assert!(!prompt.contains("Initial assessment"));
        }

        #[test]
        fn prescribe_shortens_long_messages() {
            let mut session = consulting_session(0);
            session.push_question(&"x".repeat(50)).unwrap();
            session.push_reply("ok").unwrap();
            let assembler = PromptAssembler::new(AssemblerConfig {
                recent_message_chars: 10,
                ..AssemblerConfig::default()
            });
            let prompt = assembler.assemble(
                PromptTask::Prescribe,
                &session,
                builtin(),
                &ReferenceDocument::unavailable("none"),
            );
            assert!(prompt.contains(&format!("Owner: {}{ELLIPSIS_MARKER}", "x".repeat(10))));
            assert!(prompt.contains("Consultant: ok\n"));
        }
    }

    mod reference {
        use super::*;

        #[test]
        fn unavailable_reference_renders_marker() {
            let session = consulting_session(0);
            let prompt = PromptAssembler::default().assemble(
                PromptTask::Diagnose,
                &session,
                builtin(),
                &ReferenceDocument::unavailable("timeout"),
            );
            assert!(prompt.contains(NO_REFERENCE_MARKER));
            assert!(!prompt.contains("timeout"));
        }

        #[test]
        fn long_reference_is_truncated_with_marker() {
            let session = consulting_session(0);
            let assembler = PromptAssembler::new(AssemblerConfig {
                max_reference_chars: 8,
                ..AssemblerConfig::default()
            });
            let prompt = assembler.assemble(
                PromptTask::Diagnose,
                &session,
                builtin(),
                &ReferenceDocument::available("0123456789ABCDEF"),
            );
            assert!(prompt.contains(&format!("01234567\n{TRUNCATION_MARKER}")));
            assert!(!prompt.contains("89ABCDEF"));
        }
    }

    proptest! {
        #[test]
        fn assemble_is_deterministic(reference in "\\PC{0,300}", questions in 0usize..4) {
            let session = consulting_session(questions);
            let doc = ReferenceDocument::available(reference);
            let assembler = PromptAssembler::default();

            for task in [PromptTask::Diagnose, PromptTask::Answer, PromptTask::Prescribe] {
                let first = assembler.assemble(task, &session, builtin(), &doc);
                let second = assembler.assemble(task, &session, builtin(), &doc);
                prop_assert_eq!(first, second);
            }
        }
    }
}
