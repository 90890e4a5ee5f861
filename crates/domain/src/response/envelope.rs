//! Response envelope type
//!
//! The raw outcome of one resource call: status, headers, body text and
//! timing. Nothing here interprets the body until `json()` is asked for.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// Status code plus body of one resource call. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// HTTP status code.
    pub status: u16,
    /// Response headers, names lowercased.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Response body as text.
    pub body: String,
    /// Round trip time.
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

impl ResponseEnvelope {
    /// Creates an envelope from raw response data.
    ///
    /// Invalid UTF-8 in the body is replaced rather than rejected; a body
    /// that is not JSON is only reported once `json()` is called.
    #[must_use]
    pub fn new(
        status: u16,
        headers: impl IntoIterator<Item = (String, String)>,
        body: &[u8],
        duration: Duration,
    ) -> Self {
        Self {
            status,
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.to_ascii_lowercase(), v))
                .collect(),
            body: String::from_utf8_lossy(body).into_owned(),
            duration,
        }
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedBody` if the body is not valid JSON.
    pub fn json(&self) -> DomainResult<Value> {
        serde_json::from_str(&self.body).map_err(|e| DomainError::MalformedBody(e.to_string()))
    }

    /// Returns a short preview of the body for failure messages.
    #[must_use]
    pub fn body_preview(&self) -> String {
        const LIMIT: usize = 100;
        if self.body.chars().count() > LIMIT {
            let head: String = self.body.chars().take(LIMIT).collect();
            format!("{head}...")
        } else {
            self.body.clone()
        }
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn envelope(status: u16, body: &str) -> ResponseEnvelope {
        ResponseEnvelope::new(
            status,
            vec![("Content-Type".to_string(), "application/json".to_string())],
            body.as_bytes(),
            Duration::from_millis(12),
        )
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = envelope(200, "{}");
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("CONTENT-TYPE"), Some("application/json"));
        assert_eq!(response.header("x-missing"), None);
    }

    #[test]
    fn test_json_parses_body() {
        let response = envelope(200, r#"[{"id": 1}]"#);
        assert_eq!(response.json().unwrap(), json!([{"id": 1}]));
    }

    #[test]
    fn test_malformed_body_is_an_error() {
        let response = envelope(200, "<html>oops</html>");
        assert!(matches!(response.json(), Err(DomainError::MalformedBody(_))));
    }

    #[test]
    fn test_body_preview_truncates() {
        let long = "x".repeat(150);
        let response = envelope(200, &long);
        assert_eq!(response.body_preview().len(), 103);
        assert_eq!(envelope(200, "short").body_preview(), "short");
    }
}
