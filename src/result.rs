//! Search result types.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Extra field carrying provider-rendered markdown of the page.
pub const EXTRA_MARKDOWN_TEXT: &str = "markdown_text";
/// Extra field carrying provider-extracted main text of the page.
pub const EXTRA_MAIN_TEXT: &str = "main_text";

/// Characters of page content shown in the text rendering of a result.
const CONTENT_PREVIEW_CHARS: usize = 1000;

/// A single item as returned by one provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResultItem {
    /// Result title.
    pub title: String,
    /// Result URL.
    pub url: String,
    /// Short snippet.
    pub snippet: String,
    /// Longer description, when the provider has one.
    pub description: String,
    /// 1-based position in the provider's own ranking.
    pub position: u32,
    /// Page content the provider already fetched.
    pub content: Option<String>,
    /// Provider-specific fields.
    #[serde(default)]
    pub extra: HashMap<String, String>,
}

impl RawResultItem {
    /// Creates a new raw item.
    pub fn new(url: impl Into<String>, title: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            snippet: snippet.into(),
            ..Default::default()
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the provider-native position.
    pub fn with_position(mut self, position: u32) -> Self {
        self.position = position;
        self
    }

    /// Sets pre-fetched page content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Adds a provider-specific extra field.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Page content carried by the item itself: markdown extra, then main
    /// text extra, then the `content` field. Blank values count as absent.
    pub fn promoted_content(&self) -> Option<String> {
        [
            self.extra.get(EXTRA_MARKDOWN_TEXT),
            self.extra.get(EXTRA_MAIN_TEXT),
            self.content.as_ref(),
        ]
        .into_iter()
        .flatten()
        .find(|text| !text.trim().is_empty())
        .cloned()
    }
}

/// A deduplicated, ranked result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedResult {
    /// 1-based rank in the merged list.
    pub position: u32,
    pub url: String,
    pub title: String,
    pub description: String,
    /// Name of the provider the result came from.
    pub source: String,
    /// Page text, from the provider or from enrichment.
    pub raw_content: Option<String>,
}

impl MergedResult {
    /// Whether the result already has page content.
    pub fn has_content(&self) -> bool {
        self.raw_content.as_deref().is_some_and(|c| !c.is_empty())
    }
}

impl fmt::Display for MergedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.url)
    }
}

/// Metadata about a successful search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMetadata {
    pub total_results: usize,
    pub language: String,
    pub country: String,
    /// Aggregation cycles run before results were found.
    pub attempts: u32,
}

/// A successful search: the query, a non-empty ranked list, and metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<MergedResult>,
    pub metadata: SearchMetadata,
}

/// A failed search with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFailure {
    pub query: String,
    pub reason: String,
    /// Aggregation cycles run; zero when the query was rejected up front.
    pub attempts: u32,
}

/// The value every caller receives: success or failure, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SearchOutcome {
    Success(SearchResponse),
    Failure(SearchFailure),
}

impl SearchOutcome {
    pub(crate) fn failure(query: impl Into<String>, reason: impl Into<String>, attempts: u32) -> Self {
        SearchOutcome::Failure(SearchFailure {
            query: query.into(),
            reason: reason.into(),
            attempts,
        })
    }

    /// Returns true for a success value.
    pub fn is_success(&self) -> bool {
        matches!(self, SearchOutcome::Success(_))
    }

    /// The query text this outcome answers.
    pub fn query(&self) -> &str {
        match self {
            SearchOutcome::Success(response) => &response.query,
            SearchOutcome::Failure(failure) => &failure.query,
        }
    }

    /// The ranked results; empty for a failure.
    pub fn results(&self) -> &[MergedResult] {
        match self {
            SearchOutcome::Success(response) => &response.results,
            SearchOutcome::Failure(_) => &[],
        }
    }

    /// The failure reason, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            SearchOutcome::Success(_) => None,
            SearchOutcome::Failure(failure) => Some(&failure.reason),
        }
    }

    /// Number of aggregation cycles that ran.
    pub fn attempts(&self) -> u32 {
        match self {
            SearchOutcome::Success(response) => response.metadata.attempts,
            SearchOutcome::Failure(failure) => failure.attempts,
        }
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = match self {
            SearchOutcome::Failure(failure) => return write!(f, "Error: {}", failure.reason),
            SearchOutcome::Success(response) => response,
        };

        write!(f, "Search results for '{}':", response.query)?;
        for (i, result) in response.results.iter().enumerate() {
            let title = match result.title.trim() {
                "" => "No title",
                title => title,
            };
            write!(f, "\n\n{}. {}", i + 1, title)?;
            write!(f, "\n   URL: {}", result.url)?;
            if !result.description.trim().is_empty() {
                write!(f, "\n   Description: {}", result.description)?;
            }
            if let Some(content) = result.raw_content.as_deref().filter(|c| !c.is_empty()) {
                write!(f, "\n   Content: {}", content_preview(content))?;
            }
        }

        let meta = &response.metadata;
        write!(
            f,
            "\n\nMetadata:\n- Total results: {}\n- Language: {}\n- Country: {}",
            meta.total_results, meta.language, meta.country
        )
    }
}

fn content_preview(content: &str) -> String {
    let head: String = content.chars().take(CONTENT_PREVIEW_CHARS).collect();
    let mut preview = head.replace('\n', " ").trim().to_string();
    if content.chars().count() > CONTENT_PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}
