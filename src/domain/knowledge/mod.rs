//! Knowledge base - static, versioned domain text selected by scenario.

mod builtin;
mod knowledge_base;
mod scenario;

pub use builtin::{builtin, BUILTIN_VERSION, DEFAULT_SCENARIO};
pub use knowledge_base::{KnowledgeBase, KnowledgeError};
pub use scenario::{KnowledgeBlock, Scenario, ScenarioId};
