//! Wikipedia search provider using the MediaWiki API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::apply_timeout;
use crate::provider::number_items;
use crate::{Provider, ProviderConfig, ProviderSettings, RawResultItem, Result, SearchParams};

/// Largest page size the search API accepts for anonymous clients.
const MAX_LIMIT: usize = 50;

/// Wikipedia full-text search. The wiki language follows the query language.
pub struct Wikipedia {
    config: ProviderConfig,
    client: Client,
}

impl Wikipedia {
    /// Creates a new Wikipedia provider on a shared client.
    pub fn with_client(client: Client) -> Self {
        Self {
            config: ProviderConfig::new("wikipedia"),
            client,
        }
    }

    /// Applies per-provider settings.
    pub fn with_settings(mut self, settings: &ProviderSettings) -> Self {
        apply_timeout(&mut self.config, settings);
        self
    }
}

#[derive(Deserialize)]
struct WikiResponse {
    query: Option<WikiQuery>,
}

#[derive(Deserialize)]
struct WikiQuery {
    search: Vec<WikiSearchResult>,
}

#[derive(Deserialize)]
struct WikiSearchResult {
    title: String,
    snippet: String,
}

#[async_trait]
impl Provider for Wikipedia {
    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn search(&self, query: &str, params: &SearchParams) -> Result<Vec<RawResultItem>> {
        let language = wiki_language(&params.language);
        let url = format!(
            "https://{}.wikipedia.org/w/api.php?action=query&list=search&srsearch={}&format=json&srlimit={}",
            language,
            urlencoding::encode(query),
            params.result_count.clamp(1, MAX_LIMIT)
        );

        let response = self.client.get(&url).send().await?;
        let wiki_response: WikiResponse = response.json().await?;

        Ok(number_items(into_items(wiki_response, &language)))
    }
}

/// Primary language subtag, e.g. "zh" for "zh-CN".
fn wiki_language(language: &str) -> String {
    language
        .split(['-', '_'])
        .next()
        .filter(|tag| !tag.is_empty())
        .unwrap_or("en")
        .to_lowercase()
}

fn into_items(response: WikiResponse, language: &str) -> Vec<RawResultItem> {
    response
        .query
        .map(|q| {
            q.search
                .into_iter()
                .map(|item| {
                    let url = format!(
                        "https://{}.wikipedia.org/wiki/{}",
                        language,
                        item.title.replace(' ', "_")
                    );
                    let snippet = strip_html_tags(&item.snippet);
                    RawResultItem::new(url, item.title, snippet)
                })
                .collect()
        })
        .unwrap_or_default()
}

fn strip_html_tags(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wikipedia_config() {
        let provider = Wikipedia::with_client(Client::new());
        assert_eq!(provider.name(), "wikipedia");
        assert!(provider.is_enabled());
    }

    #[test]
    fn test_wiki_language() {
        assert_eq!(wiki_language("en"), "en");
        assert_eq!(wiki_language("zh-CN"), "zh");
        assert_eq!(wiki_language("pt_BR"), "pt");
        assert_eq!(wiki_language(""), "en");
    }

    #[test]
    fn test_strip_html_tags() {
        assert_eq!(
            strip_html_tags(r#"<span class="searchmatch">Rust</span> is a language"#),
            "Rust is a language"
        );
    }

    #[test]
    fn test_into_items() {
        let json = r#"{"query":{"search":[
            {"title":"Rust (programming language)","snippet":"<span>Rust</span> is fast","pageid":1},
            {"title":"Rust","snippet":"iron oxide","pageid":2}
        ]}}"#;
        let response: WikiResponse = serde_json::from_str(json).unwrap();
        let items = into_items(response, "en");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].url, "https://en.wikipedia.org/wiki/Rust_(programming_language)");
        assert_eq!(items[0].snippet, "Rust is fast");
        assert_eq!(items[1].title, "Rust");
    }

    #[test]
    fn test_into_items_without_query() {
        let response: WikiResponse = serde_json::from_str(r#"{"batchcomplete":""}"#).unwrap();
        assert!(into_items(response, "en").is_empty());
    }
}
