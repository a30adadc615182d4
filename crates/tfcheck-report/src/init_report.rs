//! Status reporting for the `terraform init` step.

use crate::config::LogPaths;
use crate::error::{ReportError, Result};
use crate::host::CiHost;
use crate::outcome::StepOutcome;
use crate::report::{render_init_report, ResourceLabels};

/// Reporter for the outcome of `terraform init -backend=false`.
pub struct InitReporter;

impl InitReporter {
    /// Inspect the init step outcome and report accordingly.
    ///
    /// - `Success`: nothing to do.
    /// - `Failure`: read the captured init log, post the status comment,
    ///   and mark the step failed so downstream steps are halted.
    /// - Anything else (`skipped`, `cancelled`, ...): log the outcome and
    ///   take no further action.
    ///
    /// The log is required content for the comment, so an unreadable log
    /// aborts composition with [`ReportError::LogRead`].
    pub async fn run(
        host: &dyn CiHost,
        paths: &LogPaths,
        labels: &ResourceLabels,
        outcome: &StepOutcome,
    ) -> Result<()> {
        match outcome {
            StepOutcome::Success => Ok(()),
            StepOutcome::Failure => {
                let log = std::fs::read_to_string(&paths.init).map_err(|source| {
                    ReportError::LogRead {
                        path: paths.init.clone(),
                        source,
                    }
                })?;

                let message = render_init_report(labels, &log);
                host.post_comment(&message).await?;
                host.set_failed("terraform init Failed. Stopping further processing.");
                Ok(())
            }
            StepOutcome::Other(value) => {
                host.info(&format!("terraform init Step outcome was {value}"));
                Ok(())
            }
        }
    }
}
