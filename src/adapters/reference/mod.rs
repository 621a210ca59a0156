//! Reference Source Adapters.
//!
//! - `HttpReferenceSource` - GET over HTTP(S)
//! - `StaticReferenceSource` - in-memory documents for tests and offline runs

mod http_source;
mod static_source;

pub use http_source::HttpReferenceSource;
pub use static_source::StaticReferenceSource;
