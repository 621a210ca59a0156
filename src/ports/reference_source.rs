//! Reference Source Port - Interface for fetching reference documents.
//!
//! A reference document is plain text published at a URL (area statistics,
//! industry notes). The cache in the application layer decides when to
//! fetch; implementations only perform the fetch.

use async_trait::async_trait;

/// Port for fetching reference documents.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    /// Fetches the document at `url` as text.
    async fn fetch(&self, url: &str) -> Result<String, ReferenceFetchError>;
}

/// Reference fetch errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceFetchError {
    /// Server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// Connection failed or timed out.
    #[error("network error: {0}")]
    Network(String),

    /// Body was not usable text.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// No document is known for the URL.
    #[error("not found: {0}")]
    NotFound(String),
}

impl ReferenceFetchError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn not_found(url: impl Into<String>) -> Self {
        Self::NotFound(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_names_url_and_code() {
        let err = ReferenceFetchError::Status {
            url: "https://example.org/a.txt".to_string(),
            status: 503,
        };
        assert_eq!(err.to_string(), "HTTP 503 from https://example.org/a.txt");
    }
}
