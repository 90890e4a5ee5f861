//! Evidence files on disk.
//!
//! Layout under the report directory:
//!
//! ```text
//! reports/
//! ├── summary.json
//! └── posts/
//!     └── get_all_posts/
//!         ├── outcome.json
//!         └── sample-posts.json
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use restcheck_application::ports::{EvidenceSink, SinkError};
use restcheck_domain::{ScenarioOutcome, SuiteSummary};
use tokio::fs;

use super::ReportError;
use crate::serialization::to_json_stable_bytes;

const OUTCOME_FILE: &str = "outcome.json";
const SUMMARY_FILE: &str = "summary.json";

/// Evidence sink writing one directory per scenario.
#[derive(Debug, Clone)]
pub struct FileEvidenceStore {
    root: PathBuf,
}

impl FileEvidenceStore {
    /// Creates a store rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the report directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of one scenario, e.g. `reports/posts/get_all_posts`.
    #[must_use]
    pub fn scenario_dir(&self, identifier: &str) -> PathBuf {
        identifier
            .split("::")
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |dir, segment| dir.join(segment))
    }

    /// Writes every attachment of `outcome` plus its outcome record.
    ///
    /// Returns the paths written, attachments first. Labels whose slugs
    /// collide get a numeric suffix (`post-7.json`, `post-7-2.json`).
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or file cannot be written.
    pub async fn write_outcome(&self, outcome: &ScenarioOutcome) -> Result<Vec<PathBuf>, ReportError> {
        let dir = self.scenario_dir(&outcome.identifier);
        fs::create_dir_all(&dir).await?;

        let mut taken = HashSet::from([OUTCOME_FILE.to_string()]);
        let mut written = Vec::new();
        for artifact in outcome.attachments() {
            let path = dir.join(unique_file_name(&artifact.slug(), &mut taken));
            let mut content = artifact.content.clone();
            if !content.ends_with('\n') {
                content.push('\n');
            }
            fs::write(&path, content).await?;
            written.push(path);
        }

        let path = dir.join(OUTCOME_FILE);
        fs::write(&path, to_json_stable_bytes(outcome)?).await?;
        written.push(path);
        Ok(written)
    }

    /// Writes the run summary to `summary.json` at the root.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn write_summary(&self, summary: &SuiteSummary) -> Result<PathBuf, ReportError> {
        fs::create_dir_all(&self.root).await?;
        let path = self.root.join(SUMMARY_FILE);
        fs::write(&path, to_json_stable_bytes(summary)?).await?;
        Ok(path)
    }
}

fn unique_file_name(slug: &str, taken: &mut HashSet<String>) -> String {
    let mut name = format!("{slug}.json");
    let mut suffix = 2;
    while !taken.insert(name.clone()) {
        name = format!("{slug}-{suffix}.json");
        suffix += 1;
    }
    name
}

#[async_trait]
impl EvidenceSink for FileEvidenceStore {
    async fn store(&self, outcome: &ScenarioOutcome) -> Result<(), SinkError> {
        let written = self.write_outcome(outcome).await?;
        tracing::debug!(scenario = %outcome.identifier, files = written.len(), "evidence stored");
        Ok(())
    }
}
