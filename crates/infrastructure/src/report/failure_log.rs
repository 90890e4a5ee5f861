//! Append-only failure log.
//!
//! One line per failed scenario: `{identifier} - FAILED`. The file is
//! created on first use and never truncated.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use restcheck_application::ports::{FailureSink, SinkError};
use restcheck_domain::ScenarioOutcome;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use super::ReportError;

/// Failure sink writing to a plain text file.
#[derive(Debug, Clone)]
pub struct FileFailureLog {
    path: PathBuf,
}

impl FileFailureLog {
    /// Creates a log writing to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the log file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one line for `identifier`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or written.
    pub async fn append(&self, identifier: &str) -> Result<(), ReportError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format!("{identifier} - FAILED\n").as_bytes())
            .await?;
        file.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl FailureSink for FileFailureLog {
    async fn record_failure(&self, outcome: &ScenarioOutcome) -> Result<(), SinkError> {
        self.append(&outcome.identifier).await?;
        tracing::debug!(
            scenario = %outcome.identifier,
            path = %self.path.display(),
            "failure logged"
        );
        Ok(())
    }
}
