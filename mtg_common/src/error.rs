//! Error types for Scryfall lookups

use thiserror::Error;

/// Failure of a remote card lookup.
///
/// "No card matched" is not an error: lookups return `Ok(None)` for that.
#[derive(Debug, Error)]
pub enum LookupError {
    /// HTTP request failed (connection refused, DNS, TLS, ...)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),
    /// The request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,
    /// Scryfall answered with an unexpected status code
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    /// Response body was not a card list
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl LookupError {
    /// Decode failures are reported to the user like a missing card
    pub fn is_decode(&self) -> bool {
        matches!(self, LookupError::Decode(_))
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LookupError::Timeout
        } else {
            LookupError::Network(err)
        }
    }
}

/// Result alias for lookup operations
pub type LookupResult<T> = std::result::Result<T, LookupError>;
