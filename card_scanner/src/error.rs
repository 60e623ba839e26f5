use thiserror::Error;

/// Unified error type for scanner operations
#[derive(Debug, Error)]
pub enum ScannerError {
    /// Failed to build the HTTP client
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// CSV encoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The scanner task is no longer running
    #[error("Scanner has shut down")]
    Closed,
}

/// Result type alias for scanner operations
pub type ScannerResult<T> = Result<T, ScannerError>;
