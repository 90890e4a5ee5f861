//! Request specification type

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{HttpMethod, Payload};

/// One outbound HTTP call, fully resolved against the service endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// Unique identifier for this request
    pub id: Uuid,
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute target URL
    pub url: String,
    /// JSON body, present for create and update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Payload>,
}

impl RequestSpec {
    fn build(method: HttpMethod, url: impl Into<String>, body: Option<Payload>) -> Self {
        Self {
            id: Uuid::now_v7(),
            method,
            url: url.into(),
            body,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::build(HttpMethod::Get, url, None)
    }

    /// Creates a POST request with a JSON payload.
    #[must_use]
    pub fn post(url: impl Into<String>, payload: Payload) -> Self {
        Self::build(HttpMethod::Post, url, Some(payload))
    }

    /// Creates a PUT request with a JSON payload.
    #[must_use]
    pub fn put(url: impl Into<String>, payload: Payload) -> Self {
        Self::build(HttpMethod::Put, url, Some(payload))
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(url: impl Into<String>) -> Self {
        Self::build(HttpMethod::Delete, url, None)
    }
}
