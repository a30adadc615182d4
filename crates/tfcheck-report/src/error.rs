//! Error types for the reporting units.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while composing or delivering a status report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A required command log could not be read.
    #[error("failed to read command log {path}: {source}")]
    LogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The `.terraform-version` file is missing or unreadable.
    #[error("the .terraform-version file does not exist at {path}")]
    VersionFileMissing { path: PathBuf },

    /// The `.terraform-version` file holds a malformed version string.
    #[error("the .terraform-version file does not contain a valid value: {value}")]
    InvalidVersion { value: String },

    /// Posting the status comment to the pull request failed.
    #[error("failed to post status comment: {0}")]
    Comment(String),

    /// The runner environment is missing required context.
    #[error("invalid runner environment: {0}")]
    Environment(String),

    /// IO error outside log/version reads (e.g. writing step outputs).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ReportError {
    fn from(err: reqwest::Error) -> Self {
        ReportError::Comment(err.to_string())
    }
}

/// Result type for reporting operations.
pub type Result<T> = std::result::Result<T, ReportError>;
