//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;
use url::Url;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `base_url` is not an absolute http(s) URL
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `cache_ttl_secs` is 0 or exceeds one day
    /// - `user_agent` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = Url::parse(self.base_url.trim()).ok();
        let usable = base
            .as_ref()
            .is_some_and(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty()));
        if !usable {
            return Err(ConfigError::Invalid {
                field: "base_url".into(),
                reason: "must be an absolute http(s) URL".into(),
            });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.cache_ttl_secs == 0 {
            return Err(ConfigError::Invalid { field: "cache_ttl_secs".into(), reason: "must be greater than 0".into() });
        }
        if self.cache_ttl_secs > 86_400 {
            return Err(ConfigError::Invalid {
                field: "cache_ttl_secs".into(),
                reason: "must not exceed one day (86400s)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.api_key.is_some() && self.require_api_key().is_err() {
            tracing::warn!("api_key is set but blank or still the placeholder; queries will fail until it is replaced");
        }

        Ok(())
    }
}
