//! Application layer.
//!
//! Orchestrates the domain against the ports: the consultation engine and
//! its handlers, and the reference document cache they share.

pub mod consultation;
pub mod reference_cache;

pub use consultation::{ConsultationEngine, GenerationPipeline};
pub use reference_cache::{ReferenceCacheEntry, ReferenceDocumentCache, DEFAULT_REFERENCE_TTL};
