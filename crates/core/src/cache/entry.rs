//! Cache entries and freshness checks.

use std::time::Duration;

use tokio::time::Instant;

use crate::model::QueryResult;

/// A stored query result and the monotonic instant it was fetched.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub result: QueryResult,
    pub fetched_at: Instant,
}

impl CacheEntry {
    pub fn new(result: QueryResult) -> Self {
        Self { result, fetched_at: Instant::now() }
    }

    /// Whether the entry is younger than `ttl` at `now`.
    pub fn is_fresh(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.fetched_at) < ttl
    }
}
