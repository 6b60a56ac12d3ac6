//! # websearch
//!
//! A multi-provider web search engine library.
//!
//! Queries are fanned out to every registered provider concurrently, and the
//! per-provider results are merged into one ranked, de-duplicated list:
//!
//! - Provider ordering with a curated order for Chinese-script queries
//! - Per-provider retry with exponential backoff
//! - URL-based de-duplication that preserves provider priority
//! - Optional page-content enrichment
//! - Whole-search retry while every provider comes back empty
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use websearch::{providers, HttpContentFetcher, SearchConfig, SearchQuery, WebSearch};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = SearchConfig::default();
//!     let registry = providers::build_registry(&config, None)?;
//!     let fetcher = Arc::new(HttpContentFetcher::new()?);
//!     let search = WebSearch::new(registry, fetcher, config);
//!
//!     let outcome = search.search(SearchQuery::new("rust programming")).await;
//!     for result in outcome.results() {
//!         println!("{}. {}: {}", result.position, result.title, result.url);
//!     }
//!     Ok(())
//! }
//! ```

mod aggregator;
mod config;
mod content;
mod enrich;
mod error;
mod fetcher;
mod fetcher_http;
mod order;
mod provider;
mod query;
mod rank;
mod registry;
mod result;
mod retry;
mod search;

pub mod providers;

pub use aggregator::Aggregator;
pub use config::{ProviderSettings, SearchConfig};
pub use content::{extract_text, MAX_CONTENT_CHARS};
pub use enrich::Enricher;
pub use error::{Result, SearchError};
pub use fetcher::ContentFetcher;
pub use fetcher_http::HttpContentFetcher;
pub use order::{provider_order, CJK_PROVIDER_ORDER};
pub use provider::{Provider, ProviderConfig};
pub use query::{contains_cjk, SearchParams, SearchQuery, DEFAULT_RESULT_COUNT};
pub use rank::{dedup_and_rank, normalize_url_key};
pub use registry::ProviderRegistry;
pub use result::{
    MergedResult, RawResultItem, SearchFailure, SearchMetadata, SearchOutcome, SearchResponse,
    EXTRA_MAIN_TEXT, EXTRA_MARKDOWN_TEXT,
};
pub use retry::RetryPolicy;
pub use search::{WebSearch, QUICK_RESULT_COUNT};
