//! Concurrent provider fan-out and result collection.

use futures::future::join_all;
use tracing::{debug, warn};

use crate::retry::RetryPolicy;
use crate::{MergedResult, ProviderRegistry, RawResultItem, SearchParams};

/// Fans a query out to providers and collects their items in provider order.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    retry: RetryPolicy,
}

impl Aggregator {
    /// Creates an aggregator with the given per-provider retry policy.
    pub fn new(retry: RetryPolicy) -> Self {
        Self { retry }
    }

    /// Returns the per-provider retry policy.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Queries every provider in `order` concurrently.
    ///
    /// A provider that errors, times out on every attempt, or returns
    /// nothing contributes no items; the others are unaffected. The result
    /// is the concatenation of each contributing provider's items in `order`,
    /// whatever the completion order was. Items keep their native position
    /// and carry any provider-supplied page content.
    pub async fn collect(
        &self,
        registry: &ProviderRegistry,
        order: &[String],
        query: &str,
        params: &SearchParams,
    ) -> Vec<MergedResult> {
        let futures: Vec<_> = order
            .iter()
            .map(|name| async move {
                let Some(provider) = registry.get(name) else {
                    warn!("Provider {} is not registered", name);
                    return None;
                };
                let outcome = self
                    .retry
                    .run(name, provider.timeout(), || provider.search(query, params))
                    .await;
                match outcome {
                    Ok(items) if items.is_empty() => {
                        debug!("Provider {} returned no results", name);
                        None
                    }
                    Ok(items) => {
                        debug!("Provider {} returned {} results", name, items.len());
                        Some((name.as_str(), items))
                    }
                    Err(e) => {
                        warn!("Provider {} failed: {}", name, e);
                        None
                    }
                }
            })
            .collect();

        join_all(futures)
            .await
            .into_iter()
            .flatten()
            .flat_map(|(source, items)| {
                items
                    .into_iter()
                    .enumerate()
                    .map(move |(index, item)| tag_item(item, source, index))
            })
            .collect()
    }
}

/// Converts a provider item into a merge candidate, promoting any content
/// the provider supplied so enrichment can skip the fetch.
fn tag_item(item: RawResultItem, source: &str, index: usize) -> MergedResult {
    let position = match item.position {
        0 => index as u32 + 1,
        native => native,
    };
    let raw_content = item.promoted_content();
    let title = match item.title.trim() {
        "" => format!("Result {}", index + 1),
        _ => item.title,
    };
    let description = if item.description.trim().is_empty() {
        item.snippet
    } else {
        item.description
    };

    MergedResult {
        position,
        url: item.url,
        title,
        description,
        source: source.to_string(),
        raw_content,
    }
}
