//! Output ports for scenario failures and evidence.

use async_trait::async_trait;
use restcheck_domain::ScenarioOutcome;
use thiserror::Error;

/// Errors raised by a sink. Never fatal to a suite run.
#[derive(Debug, Error)]
pub enum SinkError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Receives every failed scenario.
#[async_trait]
pub trait FailureSink: Send + Sync {
    /// Records one failed scenario.
    ///
    /// # Errors
    /// Returns an error if the failure cannot be recorded.
    async fn record_failure(&self, outcome: &ScenarioOutcome) -> Result<(), SinkError>;
}

/// Receives the evidence of every finished scenario.
#[async_trait]
pub trait EvidenceSink: Send + Sync {
    /// Stores the attachments of one scenario.
    ///
    /// # Errors
    /// Returns an error if the evidence cannot be stored.
    async fn store(&self, outcome: &ScenarioOutcome) -> Result<(), SinkError>;
}
