//! Request payloads for create and update operations.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field name to value mapping sent as the JSON body of a create or update.
///
/// Field order is preserved as inserted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload {
    fields: Map<String, Value>,
}

impl Payload {
    /// Creates an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field (builder pattern).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a field, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Returns the value of a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the payload as a JSON object.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_payload_builder_keeps_order() {
        let payload = Payload::new()
            .with("title", "hello")
            .with("body", "world")
            .with("userId", 1);

        let names: Vec<_> = payload.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["title", "body", "userId"]);
        assert_eq!(payload.get("userId"), Some(&json!(1)));
        assert_eq!(payload.len(), 3);
    }

    #[test]
    fn test_payload_serializes_as_object() {
        let payload = Payload::new().with("title", "t");
        let text = serde_json::to_string(&payload).unwrap_or_default();
        assert_eq!(text, r#"{"title":"t"}"#);
    }

    #[test]
    fn test_insert_replaces() {
        let mut payload = Payload::new().with("title", "old");
        payload.insert("title", "new");
        assert_eq!(payload.to_value(), json!({"title": "new"}));
    }
}
