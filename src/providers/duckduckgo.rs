//! DuckDuckGo search provider.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};

use super::apply_timeout;
use crate::provider::number_items;
use crate::{
    Provider, ProviderConfig, ProviderSettings, RawResultItem, Result, SearchError, SearchParams,
};

const ENDPOINT: &str = "https://html.duckduckgo.com/html/";

/// DuckDuckGo search via its HTML endpoint.
pub struct DuckDuckGo {
    config: ProviderConfig,
    client: Client,
    endpoint: String,
}

impl DuckDuckGo {
    /// Creates a new DuckDuckGo provider on a shared client.
    pub fn with_client(client: Client) -> Self {
        Self {
            config: ProviderConfig::new("duckduckgo"),
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
impl Provider for DuckDuckGo {
    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn search(&self, query: &str, params: &SearchParams) -> Result<Vec<RawResultItem>> {
        let url = format!(
            "{}?q={}&kl={}",
            self.endpoint,
            urlencoding::encode(query),
            region(params)
        );

        let response = self.client.get(&url).send().await?;
        let html = response.text().await?;

        let mut items = parse_results(&html)?;
        items.truncate(params.result_count);
        Ok(number_items(items))
    }
}

/// DuckDuckGo region code, e.g. "us-en".
fn region(params: &SearchParams) -> String {
    format!("{}-{}", params.country.to_lowercase(), params.language.to_lowercase())
}

fn parse_results(html: &str) -> Result<Vec<RawResultItem>> {
    let document = Html::parse_document(html);
    let result_selector = Selector::parse(".result")
        .map_err(|e| SearchError::Parse(format!("Failed to parse selector: {:?}", e)))?;
    let title_selector = Selector::parse(".result__title a")
        .map_err(|e| SearchError::Parse(format!("Failed to parse selector: {:?}", e)))?;
    let snippet_selector = Selector::parse(".result__snippet")
        .map_err(|e| SearchError::Parse(format!("Failed to parse selector: {:?}", e)))?;

    let mut results = Vec::new();

    for element in document.select(&result_selector) {
        let Some(title_elem) = element.select(&title_selector).next() else {
            continue;
        };
        let title = title_elem.text().collect::<String>().trim().to_string();
        let href = title_elem.value().attr("href").unwrap_or_default();

        let url = if href.starts_with("//duckduckgo.com/l/") {
            extract_redirect_url(href).unwrap_or_else(|| href.to_string())
        } else {
            href.to_string()
        };

        let snippet = element
            .select(&snippet_selector)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        if !url.is_empty() && !title.is_empty() {
            results.push(RawResultItem::new(url, title, snippet));
        }
    }

    Ok(results)
}

fn extract_redirect_url(url: &str) -> Option<String> {
    let url = url.trim_start_matches("//duckduckgo.com/l/?uddg=");
    let decoded = urlencoding::decode(url).ok()?;
    let end = decoded.find('&').unwrap_or(decoded.len());
    Some(decoded[..end].to_string())
}
