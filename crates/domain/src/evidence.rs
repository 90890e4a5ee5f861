//! Evidence artifacts attached to scenario reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Media type of JSON evidence.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Serialized data captured for human inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceArtifact {
    /// Unique identifier.
    pub id: Uuid,
    /// Label shown in the report.
    pub label: String,
    /// Media type of `content`.
    pub media_type: String,
    /// Serialized data.
    pub content: String,
    /// When the artifact was captured.
    pub captured_at: DateTime<Utc>,
}

impl EvidenceArtifact {
    /// Creates a JSON artifact.
    #[must_use]
    pub fn json(label: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: crate::id::generate_id(),
            label: label.into(),
            media_type: JSON_MEDIA_TYPE.to_string(),
            content: content.into(),
            captured_at: Utc::now(),
        }
    }

    /// File-system friendly form of the label: lowercase, `-` separated.
    #[must_use]
    pub fn slug(&self) -> String {
        let mut slug = String::with_capacity(self.label.len());
        for c in self.label.chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c.to_ascii_lowercase());
            } else if !slug.ends_with('-') && !slug.is_empty() {
                slug.push('-');
            }
        }
        let slug = slug.trim_end_matches('-');
        if slug.is_empty() {
            "evidence".to_string()
        } else {
            slug.to_string()
        }
    }
}
