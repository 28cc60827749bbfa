//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (LOCALPAY_*)
//! 2. TOML config file (if LOCALPAY_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Value shipped in sample configs in place of a real key.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_PERSONAL_API_KEY";

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (LOCALPAY_*)
/// 2. TOML config file (if LOCALPAY_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gyeonggi open-data API key.
    ///
    /// Set via LOCALPAY_API_KEY environment variable.
    /// Checked when a query runs, not at load time.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the open-data API.
    ///
    /// Set via LOCALPAY_BASE_URL environment variable.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via LOCALPAY_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via LOCALPAY_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Lifetime of cached query results in seconds.
    ///
    /// Set via LOCALPAY_CACHE_TTL_SECS environment variable.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

fn default_base_url() -> String {
    "https://openapi.gg.go.kr".into()
}

fn default_user_agent() -> String {
    "localpay/0.1".into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Cache time-to-live as Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `LOCALPAY_`
    /// 2. TOML file from `LOCALPAY_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("LOCALPAY_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("LOCALPAY_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Return the API key if it is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the key is unset, blank, or still the
    /// placeholder value.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
            .ok_or_else(|| ConfigError::Missing {
                field: "api_key".into(),
                hint: "Set LOCALPAY_API_KEY to a personal Gyeonggi open-data API key".into(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, "https://openapi.gg.go.kr");
        assert_eq!(config.user_agent, "localpay/0.1");
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.cache_ttl_secs, 3600);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_durations() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(10_000));
        assert_eq!(config.cache_ttl(), Duration::from_secs(3600));
    }

    #[test]
    fn test_require_api_key_missing() {
        let config = AppConfig::default();
        let result = config.require_api_key();
        assert!(matches!(result, Err(ConfigError::Missing { .. })));
    }

    #[test]
    fn test_require_api_key_blank_or_placeholder() {
        for key in ["", "   ", PLACEHOLDER_API_KEY] {
            let config = AppConfig { api_key: Some(key.into()), ..Default::default() };
            assert!(matches!(config.require_api_key(), Err(ConfigError::Missing { .. })), "{key:?} must be rejected");
        }
    }

    #[test]
    fn test_require_api_key_present() {
        let config = AppConfig { api_key: Some(" test-key ".into()), ..Default::default() };
        assert_eq!(config.require_api_key().unwrap(), "test-key");
    }

    #[test]
    fn test_load_from_env() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("LOCALPAY_API_KEY", "abc123");
            jail.set_env("LOCALPAY_TIMEOUT_MS", "2500");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.api_key.as_deref(), Some("abc123"));
            assert_eq!(config.timeout_ms, 2500);
            assert_eq!(config.cache_ttl_secs, 3600);
            Ok(())
        });
    }

    #[test]
    fn test_load_from_toml_file_env_wins() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("localpay.toml", "api_key = \"from-file\"\ncache_ttl_secs = 600\n")?;
            jail.set_env("LOCALPAY_CONFIG_FILE", "localpay.toml");
            jail.set_env("LOCALPAY_API_KEY", "from-env");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.api_key.as_deref(), Some("from-env"));
            assert_eq!(config.cache_ttl_secs, 600);
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("LOCALPAY_TIMEOUT_MS", "5");

            let result = AppConfig::load();
            assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
            Ok(())
        });
    }
}
