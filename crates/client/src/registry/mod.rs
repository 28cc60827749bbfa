//! Gyeonggi merchant registry API client.
//!
//! Fetches the local-currency merchant listing (`RegionMnyFacltStus`) for one
//! jurisdiction.
//!
//! ### Specification
//!
//! - **Endpoint**: `https://openapi.gg.go.kr/RegionMnyFacltStus`
//! - **Authentication**: personal key in the `KEY` query parameter. A missing
//!   or placeholder key fails before any request is sent.
//! - **Paging**: a single page (`pIndex=1`, `pSize=1000`); no follow-up pages.
//! - **Retries**: none. Every error is returned to the caller on the first attempt.

pub mod error;
pub mod request;
pub mod response;

pub use error::RegistryError;
pub use request::{DATASET, PAGE_SIZE, RegistryRequest};
pub use response::{FetchOutcome, NO_DATA_CODE, parse_envelope};

use std::time::{Duration, Instant};

use async_trait::async_trait;
use localpay_core::{AppConfig, Jurisdiction, config::PLACEHOLDER_API_KEY};
use reqwest::header;
use url::Url;

/// Default base URL for the Gyeonggi open-data API.
pub const DEFAULT_BASE_URL: &str = "https://openapi.gg.go.kr";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "localpay/0.1";

/// Registry client configuration.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Personal API key (LOCALPAY_API_KEY).
    pub api_key: String,
    /// Base URL (default: https://openapi.gg.go.kr).
    pub base_url: String,
    /// Request timeout (default: 10s).
    pub timeout: Duration,
    /// User-agent string (default: localpay/0.x).
    pub user_agent: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl From<&AppConfig> for RegistryConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            api_key: config.api_key.clone().unwrap_or_default(),
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

impl RegistryConfig {
    /// The API key, if it is usable.
    pub fn credential(&self) -> Result<&str, RegistryError> {
        let key = self.api_key.trim();
        if key.is_empty() || key == PLACEHOLDER_API_KEY {
            return Err(RegistryError::MissingCredential);
        }
        Ok(key)
    }

    /// Full dataset URL, e.g. `https://openapi.gg.go.kr/RegionMnyFacltStus`.
    pub fn endpoint(&self) -> Result<Url, RegistryError> {
        let base = format!("{}/", self.base_url.trim_end_matches('/'));
        Url::parse(&base)
            .and_then(|base| base.join(DATASET))
            .map_err(|e| RegistryError::InvalidEndpoint(format!("{}: {e}", self.base_url)))
    }
}

/// Source of raw merchant rows for a jurisdiction.
///
/// [`RegistryClient`] is the production implementation; the query pipeline
/// only depends on this trait.
#[async_trait]
pub trait MerchantSource: Send + Sync {
    async fn fetch(&self, jurisdiction: Jurisdiction) -> Result<FetchOutcome, RegistryError>;
}

/// Merchant registry API client.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: reqwest::Client,
    config: RegistryConfig,
}

impl RegistryClient {
    /// Create a new registry client with the given configuration.
    ///
    /// The API key is not checked here; [`fetch`](MerchantSource::fetch)
    /// rejects a missing key without touching the network.
    pub fn new(config: RegistryConfig) -> Result<Self, RegistryError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { http, config })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }
}

#[async_trait]
impl MerchantSource for RegistryClient {
    async fn fetch(&self, jurisdiction: Jurisdiction) -> Result<FetchOutcome, RegistryError> {
        let api_key = self.config.credential()?;
        let url = self.config.endpoint()?;
        let req = RegistryRequest::new(api_key, jurisdiction);

        let start = Instant::now();
        tracing::debug!(jurisdiction = %jurisdiction, "querying merchant registry");

        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/json")
            .query(&req)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("merchant registry response status: {}", status);

        if !status.is_success() {
            return Err(RegistryError::Server { status: status.as_u16() });
        }

        let body = response.text().await?;
        let outcome = parse_envelope(DATASET, &body)?;

        tracing::debug!(
            "registry fetch for {} completed in {:?}, {} rows",
            jurisdiction,
            start.elapsed(),
            match &outcome {
                FetchOutcome::Rows(rows) => rows.len(),
                FetchOutcome::NoData => 0,
            }
        );

        Ok(outcome)
    }
}
