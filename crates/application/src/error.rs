//! Application error types

use restcheck_domain::{DomainError, VerificationFailure};
use thiserror::Error;

use crate::ports::HttpClientError;

/// Application-level errors.
///
/// Anything that ends a scenario early ends up here: an unmet expectation,
/// a transport failure, or a body that could not be parsed.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred, including malformed bodies.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// An HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpClientError),

    /// An expectation was not met.
    #[error("verification failed: {0}")]
    Verification(#[from] VerificationFailure),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
