//! Conversation messages.
//!
//! Messages are immutable records of user/assistant exchanges. The order of
//! the list they live in is the dialogue context, so each carries a sequence
//! number assigned by the session on append.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Who sent a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Store owner input.
    User,
    /// Generated reply.
    Assistant,
}

impl Role {
    /// Speaker label used in transcripts.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "Owner",
            Role::Assistant => "Consultant",
        }
    }
}

/// An immutable message within a consultation.
///
/// # Invariants
///
/// - `sequence` starts at 1 and is unique within a session
/// - `created_at` is set at construction and never changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    role: Role,
    content: String,
    sequence: u32,
    created_at: Timestamp,
}

impl ConversationMessage {
    /// Creates a message with the given position in the dialogue.
    pub(crate) fn new(role: Role, content: impl Into<String>, sequence: u32) -> Self {
        Self {
            role,
            content: content.into(),
            sequence,
            created_at: Timestamp::now(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_message_keeps_role_content_and_sequence() {
        let msg = ConversationMessage::new(Role::User, "How do I get regulars back?", 2);
        assert_eq!(msg.role(), Role::User);
        assert_eq!(msg.content(), "How do I get regulars back?");
        assert_eq!(msg.sequence(), 2);
        assert!(msg.is_user());
    }

    #[test]
    fn role_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
    }

    #[test]
    fn role_labels_are_transcript_speakers() {
        assert_eq!(Role::User.label(), "Owner");
        assert_eq!(Role::Assistant.label(), "Consultant");
    }
}
