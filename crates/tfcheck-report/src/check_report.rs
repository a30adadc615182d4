//! Combined status reporting for the `terraform validate` and
//! `terraform fmt` steps.

use crate::config::LogPaths;
use crate::error::{ReportError, Result};
use crate::host::CiHost;
use crate::outcome::StepOutcome;
use crate::report::{render_check_report, CheckFailure, ResourceLabels};
use std::path::Path;

/// Reporter for the outcomes of `terraform validate` and `terraform fmt`.
pub struct CheckReporter;

impl CheckReporter {
    /// Inspect both step outcomes, post one combined comment when either
    /// failed, then relay each step's status to the runner.
    ///
    /// The comment names whichever command(s) failed and carries one
    /// collapsible log section per failing command, validate first. Step
    /// status is relayed independently of comment posting: a validate
    /// failure marks the step failed, then the same rule is applied to
    /// fmt; non-success, non-failure outcomes are merely logged.
    pub async fn run(
        host: &dyn CiHost,
        paths: &LogPaths,
        labels: &ResourceLabels,
        validate: &StepOutcome,
        fmt: &StepOutcome,
    ) -> Result<()> {
        if let Some(failure) = CheckFailure::from_outcomes(validate, fmt) {
            let validate_log = if failure.includes_validate() {
                Some(read_log(&paths.validate)?)
            } else {
                None
            };
            let fmt_log = if failure.includes_fmt() {
                Some(read_log(&paths.fmt)?)
            } else {
                None
            };

            let message = render_check_report(
                labels,
                failure,
                validate_log.as_deref(),
                fmt_log.as_deref(),
            );
            host.post_comment(&message).await?;
        }

        // Relay step status regardless of whether a comment was posted.
        if validate.is_failure() {
            host.set_failed("terraform validate Failed. Stopping further processing.");
        } else if !validate.is_success() {
            host.info(&format!("terraform validate Step outcome was {validate}"));
        }

        if fmt.is_failure() {
            host.set_failed("terraform fmt Failed. Stopping further processing.");
        } else if !fmt.is_success() {
            host.info(&format!("terraform fmt Step outcome was {fmt}"));
        }

        Ok(())
    }
}

fn read_log(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| ReportError::LogRead {
        path: path.to_path_buf(),
        source,
    })
}
