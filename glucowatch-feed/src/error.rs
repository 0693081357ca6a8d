//! Error types for feed fetches.

use thiserror::Error;

/// Errors that can occur when fetching the latest feed entry.
///
/// None of these are fatal to the poller; the poll interval itself is the
/// retry mechanism.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The feed answered but returned no usable entry.
    #[error("feed returned no usable entry")]
    NoData,

    /// The response body was not the expected JSON shape.
    #[error("malformed feed response: {0}")]
    MalformedResponse(String),

    /// The feed rejected the request credentials.
    #[error("authorization failed")]
    Unauthorized,

    /// Network, DNS, TLS failure, an invalid base URL, or an unexpected
    /// HTTP status.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FeedError::MalformedResponse(err.to_string())
        } else {
            FeedError::ConnectionFailed(err.to_string())
        }
    }
}
