//! Engine configuration.
//!
//! [`SearchConfig`] is read once at startup (from a JSON file or built in
//! code) and is immutable for the lifetime of the engine.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::content::MAX_CONTENT_CHARS;
use crate::retry::RetryPolicy;
use crate::{Result, SearchError};

/// Credentials and endpoint overrides for one provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// API key, for providers that need one.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Endpoint override.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Per-call timeout override in seconds.
    #[serde(default)]
    pub timeout: Option<u64>,
}

/// Configuration for the search engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Provider consulted first.
    pub preferred_provider: String,
    /// Providers consulted next, in this order.
    pub fallback_providers: Vec<String>,
    /// Default language code when the query has none.
    pub language: String,
    /// Default country code when the query has none.
    pub country: String,
    /// Extra aggregation cycles after the first one when every provider fails.
    pub max_retries: u32,
    /// Pause between aggregation cycles, in seconds.
    pub retry_delay_secs: u64,
    /// Retry policy for each individual provider call.
    pub provider_retry: RetryPolicy,
    /// Timeout for each page fetch during enrichment, in seconds.
    pub fetch_timeout_secs: u64,
    /// Maximum characters of fetched page text kept per result.
    pub max_content_chars: usize,
    /// Proxy URL applied to outgoing HTTP requests.
    pub proxy: Option<String>,
    /// Per-provider credentials and endpoints, keyed by provider name.
    pub providers: HashMap<String, ProviderSettings>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            preferred_provider: "duckduckgo".to_string(),
            fallback_providers: vec!["brave".to_string(), "wikipedia".to_string()],
            language: "en".to_string(),
            country: "us".to_string(),
            max_retries: 3,
            retry_delay_secs: 60,
            provider_retry: RetryPolicy::default(),
            fetch_timeout_secs: 10,
            max_content_chars: MAX_CONTENT_CHARS,
            proxy: None,
            providers: HashMap::new(),
        }
    }
}

impl SearchConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SearchError::Config(format!("invalid JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| SearchError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<()> {
        if self.provider_retry.max_attempts == 0 {
            return Err(SearchError::Config(
                "provider_retry.max_attempts must be greater than 0".into(),
            ));
        }
        if self.provider_retry.base_delay_ms > self.provider_retry.max_delay_ms {
            return Err(SearchError::Config(
                "provider_retry base delay must be <= max delay".into(),
            ));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(SearchError::Config(
                "fetch_timeout_secs must be greater than 0".into(),
            ));
        }
        if self.max_content_chars == 0 {
            return Err(SearchError::Config(
                "max_content_chars must be greater than 0".into(),
            ));
        }
        if self.language.trim().is_empty() || self.country.trim().is_empty() {
            return Err(SearchError::Config(
                "language and country must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Pause between aggregation cycles.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    /// Timeout for one page fetch.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Settings for a provider, matched case-insensitively.
    pub fn provider_settings(&self, name: &str) -> Option<&ProviderSettings> {
        self.providers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, settings)| settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = SearchConfig::default();
        assert_eq!(config.preferred_provider, "duckduckgo");
        assert_eq!(config.language, "en");
        assert_eq!(config.country, "us");
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay(), Duration::from_secs(60));
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
        assert_eq!(config.max_content_chars, 10_000);
        assert_eq!(config.provider_retry, RetryPolicy::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SearchConfig::from_json_str(
            r#"{"preferred_provider":"brave","max_retries":1,"providers":{"tavily":{"api_key":"tvly-123"}}}"#,
        )
        .unwrap();
        assert_eq!(config.preferred_provider, "brave");
        assert_eq!(config.max_retries, 1);
        assert_eq!(config.retry_delay_secs, 60);
        assert_eq!(
            config.provider_settings("Tavily").and_then(|s| s.api_key.as_deref()),
            Some("tvly-123")
        );
        assert!(config.provider_settings("brave").is_none());
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = SearchConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = SearchConfig::from_json_file("/nonexistent/websearch.json").unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }

    #[test]
    fn zero_attempts_rejected() {
        let config = SearchConfig {
            provider_retry: RetryPolicy {
                max_attempts: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("max_attempts"));
    }

    #[test]
    fn inverted_delays_rejected() {
        let config = SearchConfig {
            provider_retry: RetryPolicy {
                max_attempts: 3,
                base_delay_ms: 5_000,
                max_delay_ms: 100,
            },
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("delay"));
    }

    #[test]
    fn zero_fetch_timeout_rejected() {
        let config = SearchConfig {
            fetch_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("fetch_timeout_secs"));
    }

    #[test]
    fn empty_locale_rejected() {
        let config = SearchConfig {
            country: " ".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_retry_delay_is_valid() {
        let config = SearchConfig {
            retry_delay_secs: 0,
            max_retries: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
