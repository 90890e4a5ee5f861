//! File-backed report sinks.

mod evidence_store;
mod failure_log;

pub use evidence_store::FileEvidenceStore;
pub use failure_log::FileFailureLog;

use restcheck_application::ports::SinkError;

use crate::serialization::SerializationError;

/// Error type for report file operations.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),
}

impl From<ReportError> for SinkError {
    fn from(error: ReportError) -> Self {
        match error {
            ReportError::Io(e) => Self::Io(e),
            ReportError::Serialization(e) => Self::Serialization(e.to_string()),
        }
    }
}
