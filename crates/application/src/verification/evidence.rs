//! Evidence capture.

use restcheck_domain::EvidenceArtifact;
use serde::Serialize;

/// Serializes `data` as pretty-printed JSON and labels it.
///
/// Never fails: if `data` cannot be serialized the artifact holds a JSON
/// object describing the error instead. `data` is only borrowed.
pub fn capture_evidence<T>(data: &T, label: impl Into<String>) -> EvidenceArtifact
where
    T: Serialize + ?Sized,
{
    let label = label.into();
    let content = serde_json::to_string_pretty(data).unwrap_or_else(|error| {
        tracing::warn!(%label, %error, "evidence could not be serialized");
        let fallback = serde_json::json!({
            "error": format!("evidence could not be serialized: {error}"),
        });
        fallback.to_string()
    });
    EvidenceArtifact::json(label, content)
}
