//! Generation tasks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What a prompt asks the model to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptTask {
    /// Initial diagnosis right after intake.
    Diagnose,
    /// Reply to the owner's latest question.
    Answer,
    /// Final structured prescription.
    Prescribe,
}

impl PromptTask {
    pub fn name(&self) -> &'static str {
        match self {
            PromptTask::Diagnose => "diagnose",
            PromptTask::Answer => "answer",
            PromptTask::Prescribe => "prescribe",
        }
    }

    /// Instruction placed at the very end of the prompt.
    pub fn directive(&self) -> &'static str {
        match self {
            PromptTask::Diagnose => {
                "Write the initial diagnosis for this store. Open with a one-line greeting \
to the owner, then cover: the most likely causes of the stated concern, the \
strengths the store can build on, and two or three questions whose answers \
would sharpen the diagnosis."
            }
            PromptTask::Answer => {
                "Answer the owner's last message in the conversation above. Stay \
consistent with the earlier diagnosis, be concrete, and keep the reply short \
enough to read on a phone."
            }
            PromptTask::Prescribe => {
                "Write the final prescription for this store as a report with these \
headings: Summary, Root causes, Action plan (numbered, each with a first \
step and a rough cost), What to measure, Thirty-day check-in. Use what was \
learned in the conversation."
            }
        }
    }
}

impl fmt::Display for PromptTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
