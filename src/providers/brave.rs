//! Brave search provider.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};

use super::apply_timeout;
use crate::provider::number_items;
use crate::{
    Provider, ProviderConfig, ProviderSettings, RawResultItem, Result, SearchError, SearchParams,
};

const ENDPOINT: &str = "https://search.brave.com/search";

/// Brave search via its HTML results page.
pub struct Brave {
    config: ProviderConfig,
    client: Client,
    endpoint: String,
}

impl Brave {
    /// Creates a new Brave provider on a shared client.
    pub fn with_client(client: Client) -> Self {
        Self {
            config: ProviderConfig::new("brave"),
            client,
            endpoint: ENDPOINT.to_string(),
        }
    }

    /// Applies per-provider settings.
    pub fn with_settings(mut self, settings: &ProviderSettings) -> Self {
        apply_timeout(&mut self.config, settings);
        if let Some(endpoint) = &settings.endpoint {
            self.endpoint = endpoint.clone();
        }
        self
    }
}

#[async_trait]
impl Provider for Brave {
    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn search(&self, query: &str, params: &SearchParams) -> Result<Vec<RawResultItem>> {
        let url = format!(
            "{}?q={}&source=web&country={}",
            self.endpoint,
            urlencoding::encode(query),
            params.country.to_lowercase()
        );

        let response = self.client.get(&url).send().await?;
        let html = response.text().await?;

        let mut items = parse_results(&html)?;
        items.truncate(params.result_count);
        Ok(number_items(items))
    }
}

fn parse_results(html: &str) -> Result<Vec<RawResultItem>> {
    let document = Html::parse_document(html);

    let result_selector = Selector::parse(r#"div.snippet[data-type="web"]"#)
        .map_err(|e| SearchError::Parse(format!("Failed to parse selector: {:?}", e)))?;
    let title_selector = Selector::parse(".search-snippet-title")
        .map_err(|e| SearchError::Parse(format!("Failed to parse selector: {:?}", e)))?;
    let desc_selector = Selector::parse(".generic-snippet .content, .snippet-description")
        .map_err(|e| SearchError::Parse(format!("Failed to parse selector: {:?}", e)))?;
    let url_selector = Selector::parse(r#"a[href^="http"]"#)
        .map_err(|e| SearchError::Parse(format!("Failed to parse selector: {:?}", e)))?;

    let mut results = Vec::new();

    for element in document.select(&result_selector) {
        let title = element
            .select(&title_selector)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        let url = element
            .select(&url_selector)
            .next()
            .and_then(|e| e.value().attr("href"))
            .unwrap_or_default()
            .to_string();

        let description = element
            .select(&desc_selector)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        if !title.is_empty() && url.starts_with("http") {
            results.push(RawResultItem::new(url, title, "").with_description(description));
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brave_config() {
        let provider = Brave::with_client(Client::new());
        assert_eq!(provider.name(), "brave");
        assert!(provider.is_enabled());
    }

    #[test]
    fn test_brave_parse_results_empty() {
        assert!(parse_results("<html><body></body></html>").unwrap().is_empty());
    }

    #[test]
    fn test_brave_parse_results_with_data() {
        let html = r#"
        <html><body>
        <div class="snippet" data-type="web">
            <a href="https://www.rust-lang.org/" class="search-snippet-title">Rust Programming Language</a>
            <div class="generic-snippet"><div class="content">A systems programming language focused on safety.</div></div>
        </div>
        <div class="snippet" data-type="web">
            <a href="https://doc.rust-lang.org/book/" class="search-snippet-title">The Rust Book</a>
            <div class="snippet-description">Official Rust programming guide.</div>
        </div>
        </body></html>
        "#;
        let results = parse_results(html).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Rust Programming Language");
        assert_eq!(results[0].url, "https://www.rust-lang.org/");
        assert_eq!(results[0].description, "A systems programming language focused on safety.");
        assert_eq!(results[1].url, "https://doc.rust-lang.org/book/");
        assert_eq!(results[1].description, "Official Rust programming guide.");
    }

    #[test]
    fn test_brave_parse_results_skips_non_web() {
        let html = r#"
        <html><body>
        <div class="snippet" data-type="video">
            <a href="https://example.com/video" class="search-snippet-title">A Video</a>
        </div>
        <div class="snippet" data-type="web">
            <a href="https://example.com/page" class="search-snippet-title">A Page</a>
        </div>
        </body></html>
        "#;
        let results = parse_results(html).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "A Page");
    }
}
