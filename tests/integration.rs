//! Integration tests for search providers using real HTTP requests.
//!
//! These tests are marked with `#[ignore]` by default because they require
//! network access and may be slow or flaky.
//!
//! Run with: `cargo test --test integration -- --ignored`

use std::sync::Arc;
use std::time::Duration;

use websearch::{
    providers, ContentFetcher, HttpContentFetcher, Provider, RawResultItem, SearchConfig,
    SearchParams, SearchQuery, WebSearch,
};

/// Helper to run a provider test
async fn test_provider<P: Provider>(provider: P, query: &str, params: SearchParams) -> Vec<RawResultItem> {
    match provider.search(query, &params).await {
        Ok(results) => {
            println!(
                "Provider '{}' returned {} results for '{}'",
                provider.name(),
                results.len(),
                query
            );
            for result in results.iter().take(3) {
                println!("  {}. {} - {}", result.position, result.title, result.url);
            }
            results
        }
        Err(e) => {
            println!("Provider '{}' failed: {}", provider.name(), e);
            vec![]
        }
    }
}

fn client() -> reqwest::Client {
    providers::http_client(None).unwrap()
}

fn english() -> SearchParams {
    SearchParams::new(5, "en", "us")
}

fn chinese() -> SearchParams {
    SearchParams::new(5, "zh", "cn")
}

mod duckduckgo_tests {
    use super::*;
    use websearch::providers::DuckDuckGo;

    #[tokio::test]
    #[ignore]
    async fn test_duckduckgo_search() {
        let results = test_provider(DuckDuckGo::with_client(client()), "rust programming", english()).await;
        assert!(!results.is_empty(), "DuckDuckGo should return results");
        assert!(results.len() <= 5);
    }

    #[tokio::test]
    #[ignore]
    async fn test_duckduckgo_chinese_query() {
        let results = test_provider(DuckDuckGo::with_client(client()), "Rust 编程语言", chinese()).await;
        // May or may not return results for Chinese queries
        println!("Chinese query returned {} results", results.len());
    }
}

mod wikipedia_tests {
    use super::*;
    use websearch::providers::Wikipedia;

    #[tokio::test]
    #[ignore]
    async fn test_wikipedia_search() {
        let results = test_provider(Wikipedia::with_client(client()), "Rust programming language", english()).await;
        assert!(!results.is_empty(), "Wikipedia should return results");
        assert!(results.iter().all(|r| r.url.contains("en.wikipedia.org")));
    }

    #[tokio::test]
    #[ignore]
    async fn test_wikipedia_chinese() {
        let results = test_provider(Wikipedia::with_client(client()), "人工智能", chinese()).await;
        assert!(results.iter().all(|r| r.url.contains("zh.wikipedia.org")));
    }
}

mod brave_tests {
    use super::*;
    use websearch::providers::Brave;

    #[tokio::test]
    #[ignore]
    async fn test_brave_search() {
        let results = test_provider(Brave::with_client(client()), "rust programming", english()).await;
        // Brave may rate-limit automated traffic
        println!("Brave returned {} results", results.len());
    }
}

mod sogou_tests {
    use super::*;
    use websearch::providers::Sogou;

    #[tokio::test]
    #[ignore]
    async fn test_sogou_search() {
        let results = test_provider(Sogou::with_client(client()), "人工智能", chinese()).await;
        println!("Sogou returned {} results", results.len());
    }
}

mod tavily_tests {
    use super::*;
    use websearch::providers::{Tavily, TAVILY_API_KEY_ENV};

    #[tokio::test]
    #[ignore]
    async fn test_tavily_search() {
        let Ok(key) = std::env::var(TAVILY_API_KEY_ENV) else {
            println!("{} not set, skipping", TAVILY_API_KEY_ENV);
            return;
        };
        let results = test_provider(Tavily::with_client(client(), key), "rust programming", english()).await;
        assert!(!results.is_empty(), "Tavily should return results");
    }
}

mod fetcher_tests {
    use super::*;

    #[tokio::test]
    #[ignore]
    async fn test_http_fetcher_extracts_text() {
        let fetcher = HttpContentFetcher::new().unwrap();
        let text = fetcher
            .fetch("https://www.rust-lang.org/", Duration::from_secs(10))
            .await
            .unwrap();
        assert!(text.contains("Rust"));
        assert!(text.chars().count() <= websearch::MAX_CONTENT_CHARS);
    }
}

mod engine_tests {
    use super::*;

    fn live_engine() -> WebSearch {
        let config = SearchConfig {
            max_retries: 1,
            retry_delay_secs: 2,
            ..Default::default()
        };
        let registry = providers::build_registry(&config, None).unwrap();
        WebSearch::new(registry, Arc::new(HttpContentFetcher::new().unwrap()), config)
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_search() {
        let outcome = live_engine().search_text("rust programming language", false).await;
        println!("{}", outcome);
        assert!(outcome.is_success(), "at least one provider should answer");
        assert!(outcome.results().len() <= 5);
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_search_with_content() {
        let query = SearchQuery::new("tokio async runtime")
            .with_result_count(3)
            .with_fetch_content(true);
        let outcome = live_engine().search(query).await;
        println!("{}", outcome);
        let with_content = outcome.results().iter().filter(|r| r.has_content()).count();
        println!("{} of {} results carry content", with_content, outcome.results().len());
    }
}
