//! Search query representation.

use serde::{Deserialize, Serialize};

/// Number of results the engine returns when the caller does not ask.
pub const DEFAULT_RESULT_COUNT: usize = 20;

/// A search query with all caller-supplied parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// The search terms.
    pub text: String,
    /// Language code (e.g., "en"). Falls back to the configured default.
    pub language: Option<String>,
    /// Country code (e.g., "us"). Falls back to the configured default.
    pub country: Option<String>,
    /// Maximum number of merged results to return.
    pub result_count: usize,
    /// Whether to fetch page content for results that lack it.
    pub fetch_content: bool,
}

impl SearchQuery {
    /// Creates a new search query with the given terms.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: None,
            country: None,
            result_count: DEFAULT_RESULT_COUNT,
            fetch_content: false,
        }
    }

    /// Sets the language code.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the country code.
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Sets the number of results to return.
    pub fn with_result_count(mut self, count: usize) -> Self {
        self.result_count = count;
        self
    }

    /// Requests page content enrichment.
    pub fn with_fetch_content(mut self, fetch: bool) -> Self {
        self.fetch_content = fetch;
        self
    }

    /// Returns true if the query text contains CJK unified ideographs.
    pub fn contains_cjk(&self) -> bool {
        contains_cjk(&self.text)
    }
}

/// Returns true if `text` contains a character in U+4E00..=U+9FFF.
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(|c| ('\u{4e00}'..='\u{9fff}').contains(&c))
}

/// Parameters handed to each provider for one call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub result_count: usize,
    pub language: String,
    pub country: String,
}

impl SearchParams {
    pub fn new(result_count: usize, language: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            result_count,
            language: language.into(),
            country: country.into(),
        }
    }
}
