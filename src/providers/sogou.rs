//! Sogou search provider.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};

use super::apply_timeout;
use crate::provider::number_items;
use crate::{
    Provider, ProviderConfig, ProviderSettings, RawResultItem, Result, SearchError, SearchParams,
};

const BASE_URL: &str = "https://www.sogou.com";

/// Sogou search (搜狗), tuned for Chinese-language queries.
pub struct Sogou {
    config: ProviderConfig,
    client: Client,
}

impl Sogou {
    /// Creates a new Sogou provider on a shared client.
    pub fn with_client(client: Client) -> Self {
        Self {
            config: ProviderConfig::new("sogou"),
            client,
        }
    }

    /// Applies per-provider settings.
    pub fn with_settings(mut self, settings: &ProviderSettings) -> Self {
        apply_timeout(&mut self.config, settings);
        self
    }
}

#[async_trait]
impl Provider for Sogou {
    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn search(&self, query: &str, params: &SearchParams) -> Result<Vec<RawResultItem>> {
        let url = format!("{}/web?query={}", BASE_URL, urlencoding::encode(query));

        let response = self.client.get(&url).send().await?;
        let html = response.text().await?;

        let mut items = parse_results(&html)?;
        items.truncate(params.result_count);
        Ok(number_items(items))
    }
}

fn parse_results(html: &str) -> Result<Vec<RawResultItem>> {
    let document = Html::parse_document(html);

    let result_selector = Selector::parse("div.vrwrap, div.rb")
        .map_err(|e| SearchError::Parse(format!("Failed to parse selector: {:?}", e)))?;
    let title_selector = Selector::parse("h3 a, .vr-title a")
        .map_err(|e| SearchError::Parse(format!("Failed to parse selector: {:?}", e)))?;
    let snippet_selector = Selector::parse(".str-text, .str_info, .space-txt")
        .map_err(|e| SearchError::Parse(format!("Failed to parse selector: {:?}", e)))?;

    let mut results = Vec::new();

    for element in document.select(&result_selector) {
        let Some(title_elem) = element.select(&title_selector).next() else {
            continue;
        };
        let title = title_elem.text().collect::<String>().trim().to_string();
        let href = title_elem.value().attr("href").unwrap_or_default();

        // Sogou links through relative redirect paths.
        let url = if href.starts_with('/') {
            format!("{BASE_URL}{href}")
        } else {
            href.to_string()
        };

        let snippet = element
            .select(&snippet_selector)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        if !href.is_empty() && !title.is_empty() {
            results.push(RawResultItem::new(url, title, snippet));
        }
    }

    Ok(results)
}
