//! Page content enrichment for ranked results.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::content::{truncate_chars, MAX_CONTENT_CHARS};
use crate::fetcher::ContentFetcher;
use crate::MergedResult;

/// Attaches fetched page text to results that have none.
#[derive(Clone)]
pub struct Enricher {
    fetcher: Arc<dyn ContentFetcher>,
    fetch_timeout: Duration,
    max_chars: usize,
}

impl Enricher {
    /// Creates an enricher using `fetcher` with a per-page timeout.
    pub fn new(fetcher: Arc<dyn ContentFetcher>, fetch_timeout: Duration) -> Self {
        Self {
            fetcher,
            fetch_timeout,
            max_chars: MAX_CONTENT_CHARS,
        }
    }

    /// Caps the characters of fetched text kept per result.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Fetches content for every result lacking it, concurrently.
    ///
    /// Results that already carry content are returned untouched and never
    /// fetched. A failed or timed-out fetch leaves the content unset. Order
    /// and positions are preserved.
    pub async fn enrich(&self, results: Vec<MergedResult>) -> Vec<MergedResult> {
        join_all(results.into_iter().map(|result| self.enrich_one(result))).await
    }

    async fn enrich_one(&self, mut result: MergedResult) -> MergedResult {
        if result.has_content() || result.url.is_empty() {
            return result;
        }

        // The outer deadline also bounds fetchers that ignore the hint.
        match timeout(self.fetch_timeout, self.fetcher.fetch(&result.url, self.fetch_timeout)).await {
            Ok(Ok(text)) if !text.is_empty() => {
                let text = truncate_chars(text, self.max_chars);
                debug!("Attached {} bytes of content to {}", text.len(), result.url);
                result.raw_content = Some(text);
            }
            Ok(Ok(_)) => debug!("Fetched empty content from {}", result.url),
            Ok(Err(e)) => warn!("Error fetching content from {}: {}", result.url, e),
            Err(_) => warn!("Timed out fetching content from {}", result.url),
        }
        result
    }
}

impl std::fmt::Debug for Enricher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enricher")
            .field("fetch_timeout", &self.fetch_timeout)
            .field("max_chars", &self.max_chars)
            .finish_non_exhaustive()
    }
}
