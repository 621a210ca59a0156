//! Reference documents as seen by the prompt assembler.

use serde::{Deserialize, Serialize};

/// Appended after a reference excerpt that was cut.
pub const TRUNCATION_MARKER: &str = "[... reference data truncated ...]";

/// Stands in for the reference section when nothing could be fetched.
pub const NO_REFERENCE_MARKER: &str = "[no reference data available]";

/// Result of looking up a scenario's reference document.
///
/// Unavailability is a value, not an error: the prompt is still assembled
/// with an explicit marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum ReferenceDocument {
    Available(String),
    Unavailable(String),
}

impl ReferenceDocument {
    pub fn available(text: impl Into<String>) -> Self {
        ReferenceDocument::Available(text.into())
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        ReferenceDocument::Unavailable(reason.into())
    }

    pub fn is_available(&self) -> bool {
        matches!(self, ReferenceDocument::Available(_))
    }

    /// Text of the prompt's reference section.
    ///
    /// Keeps at most `max_chars` characters from the head of the document and
    /// appends [`TRUNCATION_MARKER`] only when something was cut.
    /// Unavailable documents render as [`NO_REFERENCE_MARKER`].
    pub fn excerpt(&self, max_chars: usize) -> String {
        match self {
            ReferenceDocument::Available(text) => {
                let (head, truncated) = truncate_chars(text, max_chars);
                if truncated {
                    format!("{head}\n{TRUNCATION_MARKER}")
                } else {
                    head.to_string()
                }
            }
            ReferenceDocument::Unavailable(_) => NO_REFERENCE_MARKER.to_string(),
        }
    }
}

/// Returns the first `max_chars` characters of `text` and whether anything
/// was dropped. Never splits a character.
pub fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => (&text[..byte_idx], true),
        None => (text, false),
    }
}
