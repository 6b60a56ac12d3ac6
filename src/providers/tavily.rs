//! Tavily search provider.
//!
//! Tavily returns the page body alongside each hit, so its items arrive with
//! content already attached and skip enrichment.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::apply_timeout;
use crate::provider::number_items;
use crate::result::EXTRA_MARKDOWN_TEXT;
use crate::{
    Provider, ProviderConfig, ProviderSettings, RawResultItem, Result, SearchError, SearchParams,
};

const ENDPOINT: &str = "https://api.tavily.com/search";

/// Maximum results per request the API accepts.
const MAX_RESULTS: usize = 20;

/// Tavily search API client.
pub struct Tavily {
    config: ProviderConfig,
    client: Client,
    api_key: String,
    endpoint: String,
}

impl Tavily {
    /// Creates a new Tavily provider on a shared client.
    pub fn with_client(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            config: ProviderConfig::new("tavily"),
            client,
            api_key: api_key.into(),
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

#[derive(Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
    max_results: usize,
    include_raw_content: &'a str,
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Deserialize)]
struct TavilyResult {
    #[serde(default)]
    title: String,
    url: String,
    #[serde(default)]
    content: String,
    raw_content: Option<String>,
    published_date: Option<String>,
}

#[async_trait]
impl Provider for Tavily {
    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn search(&self, query: &str, params: &SearchParams) -> Result<Vec<RawResultItem>> {
        let request = TavilyRequest {
            query,
            max_results: params.result_count.clamp(1, MAX_RESULTS),
            include_raw_content: "markdown",
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::HttpStatus {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }

        let body: TavilyResponse = response.json().await?;
        Ok(number_items(into_items(body)))
    }
}

fn into_items(response: TavilyResponse) -> Vec<RawResultItem> {
    response
        .results
        .into_iter()
        .map(|hit| {
            let mut item = RawResultItem::new(hit.url, hit.title, hit.content);
            if let Some(markdown) = hit.raw_content.filter(|text| !text.trim().is_empty()) {
                item = item.with_extra(EXTRA_MARKDOWN_TEXT, markdown);
            }
            if let Some(date) = hit.published_date {
                item = item.with_extra("published_time", date);
            }
            item
        })
        .collect()
}
