//! Search orchestration: locale resolution, the retry loop, and enrichment.

use std::sync::Arc;
use std::time::Instant;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::enrich::Enricher;
use crate::fetcher::ContentFetcher;
use crate::order::provider_order;
use crate::rank::dedup_and_rank;
use crate::result::{SearchMetadata, SearchResponse};
use crate::{
    Aggregator, MergedResult, ProviderRegistry, Result, SearchConfig, SearchError, SearchOutcome,
    SearchParams, SearchQuery,
};

/// Result count used by [`WebSearch::search_text`].
pub const QUICK_RESULT_COUNT: usize = 5;

/// State of the outer retry loop.
enum RetryState {
    Attempting { attempt: u32 },
    Succeeded { results: Vec<MergedResult>, attempts: u32 },
    ExhaustedFailure { attempts: u32 },
}

/// Multi-provider search engine.
///
/// Holds the provider registry, the content fetcher, and the configuration,
/// all read-only, so one instance can serve concurrent queries.
pub struct WebSearch {
    registry: Arc<ProviderRegistry>,
    aggregator: Aggregator,
    enricher: Enricher,
    config: SearchConfig,
}

impl WebSearch {
    /// Creates an engine over `registry`, fetching page content with `fetcher`.
    pub fn new(registry: ProviderRegistry, fetcher: Arc<dyn ContentFetcher>, config: SearchConfig) -> Self {
        Self::with_shared_registry(Arc::new(registry), fetcher, config)
    }

    /// Creates an engine over a registry shared with other components.
    pub fn with_shared_registry(
        registry: Arc<ProviderRegistry>,
        fetcher: Arc<dyn ContentFetcher>,
        config: SearchConfig,
    ) -> Self {
        Self {
            aggregator: Aggregator::new(config.provider_retry.clone()),
            enricher: Enricher::new(fetcher, config.fetch_timeout()).with_max_chars(config.max_content_chars),
            registry,
            config,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Returns the provider registry.
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Returns the number of enabled providers.
    pub fn provider_count(&self) -> usize {
        self.registry.names().len()
    }

    /// Searches with the caller-friendly defaults: five results.
    pub async fn search_text(&self, text: &str, fetch_content: bool) -> SearchOutcome {
        let query = SearchQuery::new(text)
            .with_result_count(QUICK_RESULT_COUNT)
            .with_fetch_content(fetch_content);
        self.search(query).await
    }

    /// Performs a search across all providers, retrying whole cycles while
    /// every provider comes back empty.
    pub async fn search(&self, query: SearchQuery) -> SearchOutcome {
        self.search_with_cancel(query, &CancellationToken::new()).await
    }

    /// Like [`WebSearch::search`], but stops promptly once `cancel` fires,
    /// abandoning in-flight provider calls, fetches, and the retry pause.
    pub async fn search_with_cancel(&self, query: SearchQuery, cancel: &CancellationToken) -> SearchOutcome {
        if let Err(e) = self.check(&query) {
            error!("Rejected search for '{}': {}", query.text, e);
            return SearchOutcome::failure(&query.text, e.to_string(), 0);
        }

        let start = Instant::now();
        let (language, country) = self.resolve_locale(&query);
        let params = SearchParams::new(query.result_count, language, country);
        let max_retries = self.config.max_retries;

        let mut state = RetryState::Attempting { attempt: 1 };
        loop {
            state = match state {
                RetryState::Attempting { attempt } => {
                    let results = tokio::select! {
                        _ = cancel.cancelled() => return cancelled(&query, attempt),
                        results = self.run_cycle(&query, &params) => results,
                    };

                    if !results.is_empty() {
                        RetryState::Succeeded { results, attempts: attempt }
                    } else if attempt <= max_retries {
                        let delay = self.config.retry_delay();
                        warn!(
                            "All search providers failed. Waiting {:?} before retry {}/{}...",
                            delay, attempt, max_retries
                        );
                        tokio::select! {
                            _ = cancel.cancelled() => return cancelled(&query, attempt),
                            _ = sleep(delay) => {}
                        }
                        RetryState::Attempting { attempt: attempt + 1 }
                    } else {
                        RetryState::ExhaustedFailure { attempts: attempt }
                    }
                }
                RetryState::Succeeded { results, attempts } => {
                    info!(
                        "Search for '{}' returned {} results in {}ms after {} attempt(s)",
                        query.text,
                        results.len(),
                        start.elapsed().as_millis(),
                        attempts
                    );
                    return SearchOutcome::Success(SearchResponse {
                        query: query.text,
                        metadata: SearchMetadata {
                            total_results: results.len(),
                            language: params.language,
                            country: params.country,
                            attempts,
                        },
                        results,
                    });
                }
                RetryState::ExhaustedFailure { attempts } => {
                    error!("All search providers failed after {} retries. Giving up.", max_retries);
                    return SearchOutcome::failure(
                        query.text,
                        format!("All search providers failed after {max_retries} retries"),
                        attempts,
                    );
                }
            };
        }
    }

    /// One aggregation cycle: order, fan out, merge, and optionally enrich.
    async fn run_cycle(&self, query: &SearchQuery, params: &SearchParams) -> Vec<MergedResult> {
        let order = provider_order(
            &query.text,
            &self.registry.names(),
            &self.config.preferred_provider,
            &self.config.fallback_providers,
        );
        if order.is_empty() {
            warn!("No registered provider serves query '{}'", query.text);
        } else {
            debug!("Searching providers in order {:?}", order);
        }

        let collected = self
            .aggregator
            .collect(&self.registry, &order, &query.text, params)
            .await;
        let ranked = dedup_and_rank(collected, &order, query.result_count);

        if query.fetch_content && !ranked.is_empty() {
            self.enricher.enrich(ranked).await
        } else {
            ranked
        }
    }

    /// Rejects queries that no amount of retrying could answer.
    fn check(&self, query: &SearchQuery) -> Result<()> {
        self.config.validate()?;
        if self.registry.names().is_empty() {
            return Err(SearchError::NoProviders);
        }
        if query.text.trim().is_empty() {
            return Err(SearchError::InvalidQuery("Query cannot be empty".into()));
        }
        if query.result_count == 0 {
            return Err(SearchError::InvalidQuery("result_count must be greater than 0".into()));
        }
        Ok(())
    }

    /// Language and country for the query: explicit values, else the
    /// configured defaults; CJK text always searches as zh/cn.
    fn resolve_locale(&self, query: &SearchQuery) -> (String, String) {
        if query.contains_cjk() {
            return ("zh".to_string(), "cn".to_string());
        }
        let language = query.language.clone().unwrap_or_else(|| self.config.language.clone());
        let country = query.country.clone().unwrap_or_else(|| self.config.country.clone());
        (language, country)
    }
}

fn cancelled(query: &SearchQuery, attempts: u32) -> SearchOutcome {
    warn!("Search for '{}' cancelled", query.text);
    SearchOutcome::failure(&query.text, SearchError::Cancelled.to_string(), attempts)
}
