//! Verification checks and their results.
//!
//! A `Check` is one predicate over a response or record. Running it yields a
//! `CheckResult`; a batch of results is summarised as a `Verdict`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::expectation::{FieldPath, FieldSpec, StatusExpectation};

/// One verification predicate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Check {
    /// Check response status code.
    StatusCode {
        /// Expected status code or range.
        expected: StatusExpectation,
    },
    /// Check body parses as JSON.
    JsonBody,
    /// Check body is a single JSON object.
    Record,
    /// Check body is an ordered, non-empty sequence.
    Sequence,
    /// Check a record holds every listed field, recursively.
    FieldsPresent {
        /// Required fields.
        fields: Vec<FieldSpec>,
    },
    /// Check a field holds an exact value.
    FieldEquals {
        /// Path of the field.
        path: FieldPath,
        /// Expected value.
        expected: Value,
    },
}

impl Check {
    /// Get a human-readable description of this check.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::StatusCode { expected } => format!("Status code {}", expected.description()),
            Self::JsonBody => "Body is valid JSON".to_string(),
            Self::Record => "Body is a JSON object".to_string(),
            Self::Sequence => "Body is a non-empty sequence".to_string(),
            Self::FieldsPresent { fields } => {
                let names: Vec<_> = fields.iter().map(ToString::to_string).collect();
                format!("Fields present: {}", names.join(", "))
            }
            Self::FieldEquals { path, expected } => format!("Field '{path}' equals {expected}"),
        }
    }
}

/// Result of running a single check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckResult {
    /// The check that was run.
    pub check: Check,
    /// Whether the check passed.
    pub passed: bool,
    /// Actual value found (for display).
    pub actual: Option<String>,
    /// Error message if failed.
    pub error: Option<String>,
}

impl CheckResult {
    /// Create a passed result.
    #[must_use]
    pub const fn pass(check: Check) -> Self {
        Self {
            check,
            passed: true,
            actual: None,
            error: None,
        }
    }

    /// Create a passed result with actual value.
    #[must_use]
    pub fn pass_with_value(check: Check, actual: impl Into<String>) -> Self {
        Self {
            check,
            passed: true,
            actual: Some(actual.into()),
            error: None,
        }
    }

    /// Create a failed result.
    #[must_use]
    pub fn fail(check: Check, error: impl Into<String>) -> Self {
        Self {
            check,
            passed: false,
            actual: None,
            error: Some(error.into()),
        }
    }

    /// Create a failed result with actual value.
    #[must_use]
    pub fn fail_with_value(
        check: Check,
        actual: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            check,
            passed: false,
            actual: Some(actual.into()),
            error: Some(error.into()),
        }
    }
}

/// An unmet expectation. Always ends the scenario that produced it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct VerificationFailure {
    /// Description of the failed check.
    pub check: String,
    /// Message naming expected and actual values.
    pub message: String,
}

impl From<&CheckResult> for VerificationFailure {
    fn from(result: &CheckResult) -> Self {
        let check = result.check.description();
        let message = result
            .error
            .clone()
            .unwrap_or_else(|| format!("{check} failed"));
        Self { check, message }
    }
}

/// Results from running several checks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Verdict {
    /// Individual check results.
    pub results: Vec<CheckResult>,
    /// Total number of checks.
    pub total: usize,
    /// Number of passed checks.
    pub passed: usize,
    /// Number of failed checks.
    pub failed: usize,
}

impl Verdict {
    /// Create a verdict from individual results.
    #[must_use]
    pub fn new(results: Vec<CheckResult>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = total - passed;

        Self {
            results,
            total,
            passed,
            failed,
        }
    }

    /// Check if all checks passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Iterates over failed results.
    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| !r.passed)
    }
}
