//! HTTP Reference Source Adapter
//!
//! Fetches reference documents with a plain GET.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::ports::{ReferenceFetchError, ReferenceSource};

/// Reference source backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpReferenceSource {
    client: Client,
}

impl HttpReferenceSource {
    /// Creates a source whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `Network` if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, ReferenceFetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ReferenceFetchError::network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ReferenceSource for HttpReferenceSource {
    async fn fetch(&self, url: &str) -> Result<String, ReferenceFetchError> {
        tracing::debug!(url, "fetching reference document");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ReferenceFetchError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReferenceFetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| ReferenceFetchError::InvalidBody(e.to_string()))?;

        if text.trim().is_empty() {
            return Err(ReferenceFetchError::InvalidBody("empty document".to_string()));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let source = HttpReferenceSource::new(Duration::from_secs(2)).unwrap();
        let err = source.fetch("http://127.0.0.1:9/reference.txt").await.unwrap_err();
        assert!(matches!(err, ReferenceFetchError::Network(_)));
    }

    #[tokio::test]
    async fn malformed_url_is_network_error() {
        let source = HttpReferenceSource::new(Duration::from_secs(2)).unwrap();
        let err = source.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, ReferenceFetchError::Network(_)));
    }
}
