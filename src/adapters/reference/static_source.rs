//! In-Memory Reference Source Adapter
//!
//! Serves reference documents from a map keyed by URL. Used in tests and
//! for running the console offline. Counts fetches so cache behavior can be
//! asserted.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{ReferenceFetchError, ReferenceSource};

/// In-memory reference source.
#[derive(Debug, Clone, Default)]
pub struct StaticReferenceSource {
    documents: Arc<RwLock<HashMap<String, Result<String, ReferenceFetchError>>>>,
    fetches: Arc<AtomicUsize>,
}

impl StaticReferenceSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `text` for `url`.
    pub fn with_document(self, url: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(url.into(), Ok(text.into()));
        self
    }

    /// Fails every fetch of `url` with `error`.
    pub fn with_failure(self, url: impl Into<String>, error: ReferenceFetchError) -> Self {
        self.insert(url.into(), Err(error));
        self
    }

    /// Replaces the document served for `url`.
    pub async fn set_document(&self, url: impl Into<String>, text: impl Into<String>) {
        self.documents.write().await.insert(url.into(), Ok(text.into()));
    }

    /// Makes `url` fail from now on.
    pub async fn set_failure(&self, url: impl Into<String>, error: ReferenceFetchError) {
        self.documents.write().await.insert(url.into(), Err(error));
    }

    /// Number of fetches served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    // Builders run before the source is shared, so the lock is uncontended.
    fn insert(&self, url: String, entry: Result<String, ReferenceFetchError>) {
        if let Ok(mut documents) = self.documents.try_write() {
            documents.insert(url, entry);
        }
    }
}

#[async_trait]
impl ReferenceSource for StaticReferenceSource {
    async fn fetch(&self, url: &str) -> Result<String, ReferenceFetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let documents = self.documents.read().await;
        documents
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(ReferenceFetchError::not_found(url)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_configured_document() {
        let source = StaticReferenceSource::new().with_document("mem://a", "area stats");
        assert_eq!(source.fetch("mem://a").await.unwrap(), "area stats");
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn unknown_url_is_not_found() {
        let source = StaticReferenceSource::new();
        let err = source.fetch("mem://missing").await.unwrap_err();
        assert_eq!(err, ReferenceFetchError::not_found("mem://missing"));
    }

    #[tokio::test]
    async fn configured_failure_is_returned() {
        let source = StaticReferenceSource::new()
            .with_failure("mem://a", ReferenceFetchError::network("reset"));
        assert!(matches!(
            source.fetch("mem://a").await,
            Err(ReferenceFetchError::Network(_))
        ));
    }

    #[tokio::test]
    async fn documents_can_change_after_sharing() {
        let source = StaticReferenceSource::new().with_document("mem://a", "v1");
        source.set_document("mem://a", "v2").await;
        assert_eq!(source.fetch("mem://a").await.unwrap(), "v2");
    }
}
