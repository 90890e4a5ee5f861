//! Scenario reports built from scoped steps.

use restcheck_domain::{
    CheckResult, EvidenceArtifact, StepRecord, StepStatus, Verdict, VerificationFailure,
};
use serde::Serialize;

use crate::verification::capture_evidence;

/// Ordered steps of one scenario run.
#[derive(Debug, Default)]
pub struct ScenarioReport {
    steps: Vec<StepRecord>,
}

impl ScenarioReport {
    /// Creates an empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Opens a step. It is appended to the report when the handle drops,
    /// including when the scenario bails out of it with `?`.
    pub fn step(&mut self, title: impl Into<String>) -> Step<'_> {
        let title = title.into();
        tracing::debug!(step = %title, "step started");
        Step {
            report: self,
            title,
            checks: Vec::new(),
            attachments: Vec::new(),
        }
    }

    /// Returns the closed steps.
    #[must_use]
    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// Consumes the report.
    #[must_use]
    pub fn into_steps(self) -> Vec<StepRecord> {
        self.steps
    }
}

/// Scoped handle for one logical step.
#[derive(Debug)]
pub struct Step<'a> {
    report: &'a mut ScenarioReport,
    title: String,
    checks: Vec<CheckResult>,
    attachments: Vec<EvidenceArtifact>,
}

impl Step<'_> {
    /// Records a check result and fails on an unmet expectation.
    ///
    /// # Errors
    /// Returns `VerificationFailure` if the check did not pass.
    pub fn check(&mut self, result: CheckResult) -> Result<(), VerificationFailure> {
        let outcome = VerificationFailure::from(&result);
        let passed = result.passed;
        self.checks.push(result);
        if passed { Ok(()) } else { Err(outcome) }
    }

    /// Records a check result without failing.
    pub fn record(&mut self, result: CheckResult) {
        self.checks.push(result);
    }

    /// Records every result of a verdict and fails on the first unmet one.
    ///
    /// # Errors
    /// Returns `VerificationFailure` for the first failed check.
    pub fn verdict(&mut self, verdict: Verdict) -> Result<(), VerificationFailure> {
        let first_failure = verdict.failures().next().map(VerificationFailure::from);
        self.checks.extend(verdict.results);
        first_failure.map_or(Ok(()), Err)
    }

    /// Captures `data` as evidence on this step.
    pub fn capture<T>(&mut self, data: &T, label: impl Into<String>)
    where
        T: Serialize + ?Sized,
    {
        self.attachments.push(capture_evidence(data, label));
    }
}

impl Drop for Step<'_> {
    fn drop(&mut self) {
        let status = if self.checks.iter().all(|c| c.passed) {
            StepStatus::Passed
        } else {
            StepStatus::Failed
        };
        self.report.steps.push(StepRecord {
            title: std::mem::take(&mut self.title),
            status,
            checks: std::mem::take(&mut self.checks),
            attachments: std::mem::take(&mut self.attachments),
        });
    }
}
