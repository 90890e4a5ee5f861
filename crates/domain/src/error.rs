//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided base URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A resource collection name is empty or contains forbidden characters.
    #[error("invalid resource name: {0}")]
    InvalidResourceName(String),

    /// A resource identifier cannot be used as a path segment.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A field path is empty or has an empty segment.
    #[error("invalid field path: {0}")]
    InvalidFieldPath(String),

    /// The response body could not be parsed as JSON.
    #[error("malformed response body: {0}")]
    MalformedBody(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
