//! Reference document cache.
//!
//! Keeps the last successfully fetched reference document per scenario for a
//! fixed TTL. Fetch failures are logged and turned into
//! `ReferenceDocument::Unavailable`; they are never cached and never served
//! as stale content.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::domain::foundation::Timestamp;
use crate::domain::knowledge::{Scenario, ScenarioId};
use crate::domain::prompt::ReferenceDocument;
use crate::ports::ReferenceSource;

/// Default time a fetched document stays fresh.
pub const DEFAULT_REFERENCE_TTL: Duration = Duration::from_secs(3600);

/// One cached document. Immutable; replaced wholesale on refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceCacheEntry {
    key: ScenarioId,
    content: String,
    fetched_at: Timestamp,
}

impl ReferenceCacheEntry {
    pub fn new(key: ScenarioId, content: impl Into<String>, fetched_at: Timestamp) -> Self {
        Self {
            key,
            content: content.into(),
            fetched_at,
        }
    }

    pub fn key(&self) -> &ScenarioId {
        &self.key
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn fetched_at(&self) -> &Timestamp {
        &self.fetched_at
    }

    /// Fresh while `now - fetched_at < ttl`.
    pub fn is_fresh(&self, now: &Timestamp, ttl: Duration) -> bool {
        match now.duration_since(&self.fetched_at).to_std() {
            Ok(age) => age < ttl,
            // fetched_at is after `now`
            Err(_) => true,
        }
    }
}

/// TTL cache of reference documents keyed by scenario id.
///
/// Share it behind an `Arc`; concurrent refreshes of the same key both
/// fetch and the last writer wins.
pub struct ReferenceDocumentCache<S: ?Sized + ReferenceSource> {
    source: Arc<S>,
    ttl: Duration,
    entries: RwLock<HashMap<ScenarioId, Arc<ReferenceCacheEntry>>>,
}

impl<S: ?Sized + ReferenceSource> ReferenceDocumentCache<S> {
    pub fn new(source: Arc<S>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the reference document for a scenario as of now.
    pub async fn get(&self, scenario: &Scenario) -> ReferenceDocument {
        self.get_as_of(scenario, Timestamp::now()).await
    }

    /// Returns the reference document for a scenario as of `now`.
    ///
    /// - no URL: `Unavailable` without a fetch
    /// - fresh entry: served from the cache
    /// - miss or stale: one fetch; success replaces the entry, failure
    ///   yields `Unavailable`
    pub async fn get_as_of(&self, scenario: &Scenario, now: Timestamp) -> ReferenceDocument {
        let Some(url) = scenario
            .reference_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
        else {
            return ReferenceDocument::unavailable("scenario has no reference document");
        };

        if let Some(entry) = self.entries.read().await.get(&scenario.id) {
            if entry.is_fresh(&now, self.ttl) {
                tracing::debug!(scenario = %scenario.id, "reference cache hit");
                return ReferenceDocument::available(entry.content());
            }
        }

        tracing::debug!(scenario = %scenario.id, url, "reference cache miss");
        match self.source.fetch(url).await {
            Ok(content) => {
                let entry = Arc::new(ReferenceCacheEntry::new(scenario.id.clone(), content, now));
                let document = ReferenceDocument::available(entry.content());
                self.entries.write().await.insert(scenario.id.clone(), entry);
                document
            }
            Err(err) => {
                tracing::warn!(scenario = %scenario.id, url, error = %err, "reference fetch failed");
                ReferenceDocument::unavailable(err.to_string())
            }
        }
    }

    /// Returns the cached entry for a scenario, fresh or not.
    pub async fn entry(&self, id: &ScenarioId) -> Option<Arc<ReferenceCacheEntry>> {
        self.entries.read().await.get(id).cloned()
    }

    /// Drops the entry for a scenario. Returns true if one existed.
    pub async fn invalidate(&self, id: &ScenarioId) -> bool {
        self.entries.write().await.remove(id).is_some()
    }

    /// Number of cached entries, fresh or stale.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
