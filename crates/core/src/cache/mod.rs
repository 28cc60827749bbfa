//! In-memory result cache keyed by jurisdiction.
//!
//! Entries expire after a fixed time-to-live (one hour by default). Only
//! successful outcomes are stored, including "no data"; fetch errors pass
//! straight through so the next call retries.
//!
//! The map sits behind an async `RwLock` so concurrent sessions in a
//! multi-threaded host can share one cache. Concurrent misses for the same
//! jurisdiction each fetch; the last write wins.

pub mod entry;

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::Jurisdiction;
use crate::model::QueryResult;

pub use entry::CacheEntry;

/// Default time-to-live for cached results.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Time-bounded memoization of query results per jurisdiction.
#[derive(Debug)]
pub struct ResultCache {
    entries: RwLock<HashMap<Jurisdiction, CacheEntry>>,
    ttl: Duration,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultCache {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self { entries: RwLock::new(HashMap::new()), ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached result if one exists and has not expired.
    pub async fn get(&self, jurisdiction: Jurisdiction) -> Option<QueryResult> {
        let entries = self.entries.read().await;
        entries
            .get(&jurisdiction)
            .filter(|entry| entry.is_fresh(self.ttl, Instant::now()))
            .map(|entry| entry.result.clone())
    }

    /// Store a result with the current timestamp, replacing any prior entry.
    pub async fn put(&self, jurisdiction: Jurisdiction, result: QueryResult) {
        self.entries
            .write()
            .await
            .insert(jurisdiction, CacheEntry::new(result));
    }

    /// Return a fresh cached result, or run `fetch` and cache its `Ok` value.
    ///
    /// The boolean is `true` when the result came from the cache.
    pub async fn get_or_fetch<F, Fut, E>(&self, jurisdiction: Jurisdiction, fetch: F) -> Result<(QueryResult, bool), E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<QueryResult, E>>,
    {
        if let Some(result) = self.get(jurisdiction).await {
            tracing::debug!(jurisdiction = %jurisdiction, "result cache hit");
            return Ok((result, true));
        }

        tracing::debug!(jurisdiction = %jurisdiction, "result cache miss");
        let result = fetch().await?;
        self.put(jurisdiction, result.clone()).await;
        Ok((result, false))
    }

    /// Drop the entry for one jurisdiction. Returns whether one existed.
    pub async fn invalidate(&self, jurisdiction: Jurisdiction) -> bool {
        self.entries.write().await.remove(&jurisdiction).is_some()
    }

    /// Delete expired entries.
    ///
    /// Returns the number of deleted entries.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_fresh(self.ttl, now));
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
