//! Connector configuration
//!
//! Holds the remote API coordinates, pagination and retry tuning, and the
//! fetch fallback policy. Loaded from the environment or built in code;
//! incomplete credentials are non-fatal and switch the client to mock mode.

use crate::types::{FallbackPolicy, OptionStringExt};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default page size for paginated fetches
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default cap on in-flight requests (process-wide)
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// Default ceiling on 429 retries per request
pub const DEFAULT_RATE_LIMIT_RETRIES: u32 = 5;

/// Default backoff when the remote omits a Retry-After header, in seconds
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 60;

/// Configuration for the CARG connector
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ConnectorConfig {
    /// Base URL of the CARG API (empty = mock mode)
    #[serde(default)]
    pub api_url: String,
    /// Static bearer token (empty = mock mode)
    #[serde(default)]
    pub api_token: String,
    /// Records requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Cap on simultaneous in-flight requests
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    /// Ceiling on 429 retries for a single request
    #[serde(default = "default_rate_limit_retries")]
    pub rate_limit_retries: u32,
    /// Backoff when Retry-After is absent, in seconds
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
    /// What to do on non-recoverable fetch errors
    #[serde(default)]
    pub fallback_policy: FallbackPolicy,
    /// Scheduled resync interval in minutes
    #[serde(default = "default_sync_interval")]
    pub sync_interval_minutes: u64,
    /// Register webhooks at startup
    #[serde(default)]
    pub enable_webhooks: bool,
    /// Public host the webhook should call back to
    #[serde(default)]
    pub app_host: Option<String>,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_concurrency() -> usize {
    DEFAULT_MAX_CONCURRENCY
}

fn default_rate_limit_retries() -> u32 {
    DEFAULT_RATE_LIMIT_RETRIES
}

fn default_retry_delay_secs() -> u64 {
    DEFAULT_RETRY_DELAY_SECS
}

fn default_sync_interval() -> u64 {
    60
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            api_token: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            rate_limit_retries: DEFAULT_RATE_LIMIT_RETRIES,
            retry_delay_secs: DEFAULT_RETRY_DELAY_SECS,
            fallback_policy: FallbackPolicy::default(),
            sync_interval_minutes: default_sync_interval(),
            enable_webhooks: false,
            app_host: None,
        }
    }
}

impl ConnectorConfig {
    /// Create a config with explicit API coordinates
    pub fn new(api_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_token: api_token.into(),
            ..Self::default()
        }
    }

    /// Read configuration from `CARG_*` environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("CARG_API_URL") {
            config.api_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(token) = std::env::var("CARG_API_TOKEN") {
            config.api_token = token;
        }
        if let Some(size) = env_parse::<u32>("CARG_PAGE_SIZE") {
            config.page_size = size;
        }
        if let Some(retries) = env_parse::<u32>("CARG_RATE_LIMIT_RETRIES") {
            config.rate_limit_retries = retries;
        }
        if let Some(host) = std::env::var("CARG_APP_HOST").ok().none_if_empty() {
            config.app_host = Some(host);
        }
        if std::env::var("CARG_ENABLE_WEBHOOKS").as_deref() == Ok("true") {
            config.enable_webhooks = true;
        }
        config
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    /// Set the fallback policy
    #[must_use]
    pub fn with_fallback_policy(mut self, policy: FallbackPolicy) -> Self {
        self.fallback_policy = policy;
        self
    }

    /// Set the 429 retry ceiling
    #[must_use]
    pub fn with_rate_limit_retries(mut self, retries: u32) -> Self {
        self.rate_limit_retries = retries;
        self
    }

    /// Set the fallback retry delay
    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay_secs = delay.as_secs();
        self
    }

    /// True when credentials are incomplete and fetches should serve fixtures
    pub fn is_mock_mode(&self) -> bool {
        self.api_url.is_empty() || self.api_token.is_empty()
    }

    /// Per-request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate tuning values
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.page_size == 0 {
            return Err(crate::error::Error::config("page_size must be positive"));
        }
        if self.max_concurrency == 0 {
            return Err(crate::error::Error::config(
                "max_concurrency must be positive",
            ));
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConnectorConfig::default();
        assert_eq!(config.page_size, 100);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_concurrency, 10);
        assert_eq!(config.rate_limit_retries, 5);
        assert_eq!(config.retry_delay_secs, 60);
        assert!(config.is_mock_mode());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = ConnectorConfig::new("https://carg.example.com/", "token123");
        assert_eq!(config.api_url, "https://carg.example.com");
        assert!(!config.is_mock_mode());
    }

    #[test]
    fn test_mock_mode_requires_both_fields() {
        assert!(ConnectorConfig::new("https://carg.example.com", "").is_mock_mode());
        assert!(ConnectorConfig::new("", "token").is_mock_mode());
        assert!(!ConnectorConfig::new("https://carg.example.com", "token").is_mock_mode());
    }

    #[test]
    fn test_validate_rejects_zero_tuning() {
        let config = ConnectorConfig::default().with_page_size(0);
        assert!(config.validate().is_err());

        let mut config = ConnectorConfig::default();
        config.max_concurrency = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder_setters() {
        let config = ConnectorConfig::default()
            .with_page_size(25)
            .with_rate_limit_retries(2)
            .with_retry_delay(Duration::from_secs(5))
            .with_fallback_policy(crate::types::FallbackPolicy::FailFast);
        assert_eq!(config.page_size, 25);
        assert_eq!(config.rate_limit_retries, 2);
        assert_eq!(config.retry_delay_secs, 5);
        assert_eq!(
            config.fallback_policy,
            crate::types::FallbackPolicy::FailFast
        );
    }
}
