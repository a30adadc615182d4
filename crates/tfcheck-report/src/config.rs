//! Log path configuration for the reporting units.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Filesystem locations of the captured Terraform command logs.
///
/// The workflow tees each command's output to a fixed path under `/tmp`;
/// those defaults are used unless a caller (or a test) redirects them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogPaths {
    /// Captured `terraform init` output.
    pub init: PathBuf,

    /// Captured `terraform validate` output.
    pub validate: PathBuf,

    /// Captured `terraform fmt` output.
    pub fmt: PathBuf,
}

impl Default for LogPaths {
    fn default() -> Self {
        LogPaths {
            init: PathBuf::from("/tmp/terraform.init.log"),
            validate: PathBuf::from("/tmp/terraform.validate.log"),
            fmt: PathBuf::from("/tmp/terraform.fmt.log"),
        }
    }
}

impl LogPaths {
    /// Redirect the init log path.
    pub fn with_init(mut self, path: PathBuf) -> Self {
        self.init = path;
        self
    }

    /// Redirect the validate log path.
    pub fn with_validate(mut self, path: PathBuf) -> Self {
        self.validate = path;
        self
    }

    /// Redirect the fmt log path.
    pub fn with_fmt(mut self, path: PathBuf) -> Self {
        self.fmt = path;
        self
    }
}
