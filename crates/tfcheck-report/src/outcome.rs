//! Workflow step outcomes as reported by the runner.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a named workflow step.
///
/// GitHub Actions reports step outcomes as strings (`success`, `failure`,
/// `cancelled`, `skipped`). Only `success` and `failure` carry meaning for
/// the reporters; everything else is passed through and merely logged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum StepOutcome {
    /// The step completed successfully.
    Success,

    /// The step ran and failed.
    Failure,

    /// Any other outcome value (e.g. `skipped`, `cancelled`).
    Other(String),
}

impl StepOutcome {
    /// Parse an outcome from the runner's outcome string.
    pub fn parse(value: &str) -> Self {
        match value {
            "success" => StepOutcome::Success,
            "failure" => StepOutcome::Failure,
            other => StepOutcome::Other(other.to_string()),
        }
    }

    /// Get the outcome as the runner's string form.
    pub fn as_str(&self) -> &str {
        match self {
            StepOutcome::Success => "success",
            StepOutcome::Failure => "failure",
            StepOutcome::Other(value) => value,
        }
    }

    /// Whether the step failed.
    pub fn is_failure(&self) -> bool {
        matches!(self, StepOutcome::Failure)
    }

    /// Whether the step succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, StepOutcome::Success)
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for StepOutcome {
    fn from(value: String) -> Self {
        StepOutcome::parse(&value)
    }
}

impl From<StepOutcome> for String {
    fn from(outcome: StepOutcome) -> Self {
        outcome.as_str().to_string()
    }
}
