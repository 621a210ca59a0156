//! Prompt assembly for the generative backend.

mod assembler;
mod reference;
mod task;

pub use assembler::{AssemblerConfig, PromptAssembler, ELLIPSIS_MARKER};
pub use reference::{truncate_chars, ReferenceDocument, NO_REFERENCE_MARKER, TRUNCATION_MARKER};
pub use task::PromptTask;
