//! Error types for the search library.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during search operations.
#[derive(Error, Debug)]
pub enum SearchError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// A provider call or page fetch exceeded its deadline.
    #[error("Search timeout exceeded")]
    Timeout,

    /// No providers registered or enabled.
    #[error("No search providers configured")]
    NoProviders,

    /// Invalid query.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// URL parsing error.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// The caller cancelled the operation.
    #[error("Search cancelled")]
    Cancelled,

    /// Generic error.
    #[error("{0}")]
    Other(String),
}

impl SearchError {
    /// Whether retrying cannot help (bad configuration or input).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SearchError::NoProviders | SearchError::InvalidQuery(_) | SearchError::Config(_)
        )
    }
}
