//! Content fetcher abstraction for retrieving readable page text.

use std::time::Duration;

use async_trait::async_trait;

use crate::Result;

/// Trait for fetching the readable text of a page.
///
/// Implementations are shared between concurrent queries and must not keep
/// per-query state. A failed fetch is reported as an error; the enricher
/// decides what that means for the result.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Fetches `url` and returns its extracted text, giving up after `timeout`.
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String>;
}
