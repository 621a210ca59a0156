//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - generative backend
//! - `ReferenceSource` - fetch of scenario reference documents

mod ai_provider;
mod reference_source;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, GenerationOptions,
    ProviderInfo, RequestMetadata, TokenUsage,
};
pub use reference_source::{ReferenceFetchError, ReferenceSource};
