//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - generative backends (Gemini, OpenAI, mock)
//! - `reference` - reference document sources (HTTP, in-memory)
//! - `console` - line-oriented front-end driving the consultation engine

pub mod ai;
pub mod console;
pub mod reference;

pub use ai::{GeminiConfig, GeminiProvider, MockAIProvider, MockError, OpenAIConfig, OpenAIProvider};
pub use console::{ConsoleCommand, ConsoleDriver, ConsoleError, ConsoleReply};
pub use reference::{HttpReferenceSource, StaticReferenceSource};
