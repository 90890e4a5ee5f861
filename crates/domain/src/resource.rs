//! Remote resource collections, identifiers and the service endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// A named remote collection such as `posts` or `users`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Resource(String);

impl Resource {
    /// Creates a resource from its collection name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidResourceName` if the name is empty or
    /// contains anything other than lowercase ASCII letters, digits, `-` or `_`.
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
        if valid {
            Ok(Self(name))
        } else {
            Err(DomainError::InvalidResourceName(name))
        }
    }

    /// The `posts` collection.
    #[must_use]
    pub fn posts() -> Self {
        Self("posts".to_string())
    }

    /// The `users` collection.
    #[must_use]
    pub fn users() -> Self {
        Self("users".to_string())
    }

    /// Returns the collection name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Resource {
    type Error = DomainError;

    fn try_from(value: String) -> DomainResult<Self> {
        Self::new(value)
    }
}

impl From<Resource> for String {
    fn from(resource: Resource) -> Self {
        resource.0
    }
}

/// Opaque key identifying one entity within a collection.
///
/// Uniqueness is the remote service's concern; nothing is enforced locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    /// Numeric identifier, e.g. `42`.
    Number(u64),
    /// String identifier, e.g. `"a1b2"`.
    Text(String),
}

impl ResourceId {
    /// Parses an identifier, preferring the numeric form.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIdentifier` if the value is blank or
    /// contains characters that would escape a single path segment.
    pub fn parse(value: &str) -> DomainResult<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.contains(['/', '?', '#', ' ']) {
            return Err(DomainError::InvalidIdentifier(value.to_string()));
        }
        Ok(trimmed
            .parse::<u64>()
            .map_or_else(|_| Self::Text(trimmed.to_string()), Self::Number))
    }

    /// Returns the identifier the way it appears inside a JSON record.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Number(n) => serde_json::Value::from(*n),
            Self::Text(s) => serde_json::Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ResourceId {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for ResourceId {
    fn from(value: u32) -> Self {
        Self::Number(u64::from(value))
    }
}

/// Fixed base endpoint every resource path is resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    base: Url,
}

impl ServiceEndpoint {
    /// Parses and validates the base URL.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` if the URL cannot be parsed or is
    /// not `http`/`https`.
    pub fn parse(base_url: &str) -> DomainResult<Self> {
        let base = Url::parse(base_url.trim())
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {base_url}")))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(DomainError::InvalidUrl(format!(
                "unsupported scheme '{}': {base_url}",
                base.scheme()
            )));
        }
        Ok(Self { base })
    }

    /// URL of the whole collection: `{base}/{resource}`.
    #[must_use]
    pub fn collection_url(&self, resource: &Resource) -> String {
        self.join(&[resource.name()])
    }

    /// URL of one entity: `{base}/{resource}/{id}`. Text identifiers are
    /// percent-encoded as a single path segment.
    #[must_use]
    pub fn item_url(&self, resource: &Resource, id: &ResourceId) -> String {
        self.join(&[resource.name(), &id.to_string()])
    }

    fn join(&self, segments: &[&str]) -> String {
        let mut url = self.base.clone();
        // Only fails for cannot-be-a-base URLs, which parse() rejects.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.into()
    }

    fn root(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }
}

impl fmt::Display for ServiceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.root())
    }
}
