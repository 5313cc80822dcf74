//! Error types for meteo-client.
//!
//! The taxonomy mirrors how failures are presented to the dashboard:
//!
//! | Error | Surfaced as | Retry |
//! |-------|-------------|-------|
//! | [`Error::Timeout`] | generic error render | yes |
//! | [`Error::NetworkUnreachable`] | generic error render | yes |
//! | [`Error::HttpError`] | generic error render | 5xx only |
//! | [`Error::Cancelled`] | never (superseded request) | no |
//! | [`Error::InvalidUrl`] / [`Error::InvalidConfig`] | fatal at startup | no |
//!
//! A malformed response body is deliberately NOT an error: normalization
//! absorbs it into a reading with null fields (see `meteo_types::Reading`).
//! Average fetches never raise at all; they collapse every failure to `None`
//! at the client boundary.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when talking to the weather-station API.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The request exceeded the configured wait bound and was aborted.
    #[error("request timed out after {duration:?}")]
    Timeout {
        /// The timeout that elapsed.
        duration: Duration,
    },

    /// The server could not be reached at the transport level.
    #[error("network unreachable: {0}")]
    NetworkUnreachable(#[source] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP error: status {status}")]
    HttpError {
        /// The HTTP status code.
        status: u16,
    },

    /// The configured base URL is not usable.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid configuration provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The request was superseded by a newer one and cancelled.
    #[error("request cancelled")]
    Cancelled,
}

impl Error {
    /// Create a timeout error.
    pub fn timeout(duration: Duration) -> Self {
        Self::Timeout { duration }
    }

    /// Create an HTTP status error.
    pub fn http(status: u16) -> Self {
        Self::HttpError { status }
    }

    /// Create a configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

/// Result type alias using meteo-client's Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::timeout(Duration::from_secs(10));
        assert!(err.to_string().contains("10s"));

        let err = Error::http(503);
        assert!(err.to_string().contains("503"));

        let err = Error::InvalidUrl("localhost:8000".to_string());
        assert!(err.to_string().contains("localhost:8000"));

        assert_eq!(Error::Cancelled.to_string(), "request cancelled");
    }

    #[test]
    fn test_error_debug() {
        let err = Error::http(404);
        assert!(format!("{:?}", err).contains("HttpError"));
    }
}
