//! Search provider trait and configuration.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{RawResultItem, Result, SearchParams};

/// Configuration for a search provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Registry name of the provider (e.g., "duckduckgo").
    pub name: String,
    /// Per-call timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Whether the provider takes part in searches.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_timeout() -> u64 {
    10
}

fn default_enabled() -> bool {
    true
}

impl ProviderConfig {
    /// Creates an enabled configuration with the default timeout.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the timeout in seconds.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = secs;
        self
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            timeout: default_timeout(),
            enabled: true,
        }
    }
}

/// Trait for implementing search providers.
///
/// A provider turns a query into an ordered list of raw items or fails.
/// The engine tolerates slow, failing, or empty providers, so
/// implementations should not retry on their own.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Returns the provider configuration.
    fn config(&self) -> &ProviderConfig;

    /// Performs a search. Items should carry 1-based native positions.
    async fn search(&self, query: &str, params: &SearchParams) -> Result<Vec<RawResultItem>>;

    /// Returns the provider name.
    fn name(&self) -> &str {
        &self.config().name
    }

    /// Returns the per-call timeout.
    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config().timeout)
    }

    /// Returns whether the provider is enabled.
    fn is_enabled(&self) -> bool {
        self.config().enabled
    }
}

/// Assigns 1-based positions in list order.
pub(crate) fn number_items(items: Vec<RawResultItem>) -> Vec<RawResultItem> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| item.with_position(i as u32 + 1))
        .collect()
}
