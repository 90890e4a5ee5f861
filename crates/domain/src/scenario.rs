//! Scenario metadata and outcome records.
//!
//! These are consumed by whatever renders reports; the verification core
//! never reads them back.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::evidence::EvidenceArtifact;
use crate::testing::CheckResult;

/// How much a failing scenario matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Blocks any further use.
    Blocker,
    /// Core functionality broken.
    Critical,
    /// Regular functionality.
    Normal,
    /// Cosmetic or structural detail.
    Minor,
    /// Negligible.
    Trivial,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Blocker => "blocker",
            Self::Critical => "critical",
            Self::Normal => "normal",
            Self::Minor => "minor",
            Self::Trivial => "trivial",
        };
        f.write_str(name)
    }
}

/// Descriptive record attached to each scenario definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioMetadata {
    /// Top-level grouping, e.g. "API Testing".
    pub epic: String,
    /// Feature under test, e.g. "Posts API".
    pub feature: String,
    /// User story, e.g. "Get all posts".
    pub story: String,
    /// Severity level.
    pub severity: Severity,
    /// Free-form markers such as `smoke` or `regression`.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ScenarioMetadata {
    /// Returns true if the scenario carries `tag`.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Status of a report step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Every check in the step passed (or it had none).
    Passed,
    /// At least one check failed.
    Failed,
}

/// One logical step of a scenario with what was checked and captured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Step title.
    pub title: String,
    /// Step status.
    pub status: StepStatus,
    /// Checks executed inside the step.
    #[serde(default)]
    pub checks: Vec<CheckResult>,
    /// Evidence captured inside the step.
    #[serde(default)]
    pub attachments: Vec<EvidenceArtifact>,
}

/// Final status of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioStatus {
    /// Every expectation held.
    Passed,
    /// An expectation failed or the call itself failed.
    Failed,
}

/// What running one scenario produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    /// Stable identifier, e.g. `posts::get_all_posts`.
    pub identifier: String,
    /// Scenario metadata.
    pub metadata: ScenarioMetadata,
    /// Final status.
    pub status: ScenarioStatus,
    /// Failure message, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
    /// Report steps in execution order.
    pub steps: Vec<StepRecord>,
    /// Execution time in milliseconds.
    pub duration_ms: u64,
}

impl ScenarioOutcome {
    /// Returns true if the scenario passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == ScenarioStatus::Passed
    }

    /// Iterates over every attachment of every step.
    pub fn attachments(&self) -> impl Iterator<Item = &EvidenceArtifact> {
        self.steps.iter().flat_map(|step| step.attachments.iter())
    }
}

/// Aggregate of one suite run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteSummary {
    /// Identifier of the run.
    pub run_id: Uuid,
    /// Outcomes in execution order.
    pub outcomes: Vec<ScenarioOutcome>,
    /// Number of scenarios run.
    pub total: usize,
    /// Number of passed scenarios.
    pub passed: usize,
    /// Number of failed scenarios.
    pub failed: usize,
    /// Wall time of the run in milliseconds.
    pub duration_ms: u64,
}

impl SuiteSummary {
    /// Builds a summary from outcomes.
    #[must_use]
    pub fn new(outcomes: Vec<ScenarioOutcome>, duration_ms: u64) -> Self {
        let total = outcomes.len();
        let passed = outcomes.iter().filter(|o| o.passed()).count();
        Self {
            run_id: crate::id::generate_id(),
            outcomes,
            total,
            passed,
            failed: total - passed,
            duration_ms,
        }
    }

    /// Returns true if no scenario failed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Iterates over failed outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &ScenarioOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }
}
