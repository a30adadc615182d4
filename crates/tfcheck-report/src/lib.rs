//! tfcheck-report - Terraform check status reporting
//!
//! Provides the reporting steps of the `terraform-checks` workflow:
//! - Posts Markdown status comments on the pull request when
//!   `terraform init`, `terraform validate`, or `terraform fmt` fail
//! - Relays each step's outcome back to the workflow runner
//! - Reads and validates the pinned `.terraform-version` for a source tree

pub mod check_report;
pub mod config;
pub mod error;
pub mod fakes;
pub mod host;
pub mod init_report;
pub mod outcome;
pub mod report;
pub mod telemetry;
pub mod version;

// Re-export key types
pub use check_report::CheckReporter;
pub use config::LogPaths;
pub use error::{ReportError, Result};
pub use host::{ActionsHost, CiHost, RepoContext};
pub use init_report::InitReporter;
pub use outcome::StepOutcome;
pub use report::{CheckFailure, ResourceLabels, STATUS_MARKER};
pub use telemetry::init_tracing;
pub use version::VersionReader;
