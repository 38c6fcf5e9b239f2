//! Error types for hnsearch
//!
//! One enum covers the whole crate: transport failures, responses that
//! arrived but could not be decoded, and local persistence problems.

use thiserror::Error;

/// Main error type for hnsearch operations
#[derive(Error, Debug)]
pub enum HnSearchError {
    #[error("request to '{0}' failed: {1}")]
    Http(String, reqwest::Error),

    #[error("search API answered with HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed search response: {0}")]
    MalformedResponse(String),

    #[error("invalid endpoint URL '{0}': {1}")]
    InvalidEndpoint(String, url::ParseError),

    #[error("failed to write preferences to '{0}': {1}")]
    PrefsWrite(String, std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for hnsearch operations
pub type Result<T> = std::result::Result<T, HnSearchError>;

impl HnSearchError {
    /// Whether the failure happened on the wire, as opposed to a response
    /// that arrived but could not be decoded.
    pub fn is_network(&self) -> bool {
        matches!(self, HnSearchError::Http(_, _) | HnSearchError::Status(_))
    }
}
