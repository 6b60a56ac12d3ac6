//! HTTP-based content fetcher using reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, Proxy};
use tracing::debug;

use crate::content::{extract_text, MAX_CONTENT_CHARS};
use crate::fetcher::ContentFetcher;
use crate::{Result, SearchError};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0 Safari/537.36";

/// A content fetcher that downloads pages over plain HTTP and extracts
/// their readable text.
pub struct HttpContentFetcher {
    client: Client,
    accept_language: &'static str,
    max_chars: usize,
}

impl HttpContentFetcher {
    /// Creates a fetcher for English-language pages.
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(Client::builder().build()?))
    }

    /// Creates a fetcher that routes requests through `proxy`
    /// (e.g., `http://127.0.0.1:8080` or `socks5://127.0.0.1:1080`).
    pub fn with_proxy(proxy: &str) -> Result<Self> {
        let client = Client::builder().proxy(Proxy::all(proxy)?).build()?;
        Ok(Self::with_client(client))
    }

    /// Creates a fetcher with a custom reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            accept_language: accept_language_for("en"),
            max_chars: MAX_CONTENT_CHARS,
        }
    }

    /// Sets the `Accept-Language` header from a language code.
    pub fn with_language(mut self, language: &str) -> Self {
        self.accept_language = accept_language_for(language);
        self
    }

    /// Sets the maximum number of characters kept per page.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    async fn download(&self, url: &str, timeout: Duration) -> Result<String> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .header(ACCEPT_LANGUAGE, self.accept_language)
            .timeout(timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl ContentFetcher for HttpContentFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String> {
        let html = self.download(url, timeout).await?;
        let text = extract_text(&html, self.max_chars)?;
        debug!("Fetched {} characters from {}", text.chars().count(), url);
        Ok(text)
    }
}

fn accept_language_for(language: &str) -> &'static str {
    if language.to_lowercase().starts_with("zh") {
        "zh-CN,zh;q=0.9"
    } else {
        "en-US,en;q=0.9"
    }
}
