//! Query pipeline: result cache → registry fetch → coordinate normalization.
//!
//! [`QueryPipeline::query`] never fails. Every fetch error becomes a
//! [`Diagnostic`] next to an empty result, and "no data" is reported as an
//! advisory rather than an error. Nothing is retried.

use localpay_core::{AppConfig, Diagnostic, Jurisdiction, QueryOutcome, QueryResult, QueryStatus, ResultCache, normalize};

use crate::registry::{FetchOutcome, MerchantSource, RegistryClient, RegistryConfig, RegistryError};

/// Orchestrates one merchant lookup per call.
#[derive(Debug)]
pub struct QueryPipeline<S = RegistryClient> {
    source: S,
    cache: ResultCache,
}

impl QueryPipeline<RegistryClient> {
    /// Build a pipeline backed by the live registry.
    pub fn from_config(config: &AppConfig) -> Result<Self, RegistryError> {
        let client = RegistryClient::new(RegistryConfig::from(config))?;
        Ok(Self::with_cache(client, ResultCache::with_ttl(config.cache_ttl())))
    }
}

impl<S: MerchantSource> QueryPipeline<S> {
    /// Pipeline with a one-hour result cache.
    pub fn new(source: S) -> Self {
        Self::with_cache(source, ResultCache::new())
    }

    pub fn with_cache(source: S, cache: ResultCache) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Look up merchants for a jurisdiction, from cache when fresh.
    pub async fn query(&self, jurisdiction: Jurisdiction) -> QueryOutcome {
        match self.cache.get_or_fetch(jurisdiction, || self.fetch_fresh(jurisdiction)).await {
            Ok((result, cache_hit)) => Self::answered(result, cache_hit),
            Err(err) => Self::failed(jurisdiction, err),
        }
    }

    /// Fetch again regardless of the cache.
    ///
    /// The cached entry is replaced only when the fetch succeeds; a failed
    /// refresh leaves the previous result in place.
    pub async fn refresh(&self, jurisdiction: Jurisdiction) -> QueryOutcome {
        match self.fetch_fresh(jurisdiction).await {
            Ok(result) => {
                self.cache.put(jurisdiction, result.clone()).await;
                Self::answered(result, false)
            }
            Err(err) => Self::failed(jurisdiction, err),
        }
    }

    fn answered(result: QueryResult, cache_hit: bool) -> QueryOutcome {
        let diagnostic = match result.status {
            QueryStatus::NoData => Some(Diagnostic::no_data(result.jurisdiction)),
            QueryStatus::Populated | QueryStatus::Failed => None,
        };
        QueryOutcome { result, diagnostic, cache_hit }
    }

    fn failed(jurisdiction: Jurisdiction, err: RegistryError) -> QueryOutcome {
        tracing::warn!(jurisdiction = %jurisdiction, code = err.kind().code(), "merchant query failed: {}", err);
        QueryOutcome { result: QueryResult::failed(jurisdiction), diagnostic: Some(err.into()), cache_hit: false }
    }

    async fn fetch_fresh(&self, jurisdiction: Jurisdiction) -> Result<QueryResult, RegistryError> {
        match self.source.fetch(jurisdiction).await? {
            FetchOutcome::NoData => Ok(QueryResult::no_data(jurisdiction)),
            FetchOutcome::Rows(rows) => {
                let fetched = rows.len();
                let records = normalize(rows);
                if records.is_empty() {
                    tracing::warn!(jurisdiction = %jurisdiction, fetched, "no rows with usable coordinates");
                }
                Ok(QueryResult::from_records(jurisdiction, records))
            }
        }
    }
}
