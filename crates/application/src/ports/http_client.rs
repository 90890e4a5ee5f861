//! HTTP Client port

use async_trait::async_trait;
use restcheck_domain::{RequestSpec, ResponseEnvelope};
use thiserror::Error;

/// Transport failures. No response was received.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpClientError {
    /// The request did not complete in time.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// Configured timeout.
        timeout_ms: u64,
    },

    /// The host name could not be resolved.
    #[error("DNS lookup failed for {host}: {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Underlying message.
        message: String,
    },

    /// The remote refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Remote host.
        host: String,
        /// Remote port.
        port: u16,
    },

    /// Any other connection failure.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Redirect limit exceeded.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit.
        max: usize,
    },

    /// The request URL is invalid.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request body could not be encoded.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

/// Port for executing HTTP requests.
///
/// This trait abstracts the HTTP client implementation, allowing
/// the application layer to be independent of specific HTTP libraries.
/// Implementations perform exactly one round trip per call: no retries,
/// no status interpretation.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Executes an HTTP request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails due to network issues,
    /// timeout, or other transport problems. Non-2xx statuses are not
    /// errors.
    async fn execute(&self, request: &RequestSpec) -> Result<ResponseEnvelope, HttpClientError>;
}
