//! Client error types

use thiserror::Error;

/// Errors from the backend boundary.
///
/// The core never depends on HTTP status text; any non-success response or
/// transport failure means "analysis/translation unavailable" and is
/// recovered locally, never retried automatically.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport or decoding failure from the HTTP client
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("backend unavailable (status {status})")]
    Unavailable {
        /// The HTTP status code returned
        status: u16,
    },
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
