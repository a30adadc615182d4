//! Terraform version discovery from `.terraform-version`.

use crate::error::{ReportError, Result};
use crate::host::CiHost;
use regex::Regex;
use std::path::Path;

/// Strict `MAJOR.MINOR.PATCH` pattern, anchored. ASCII digits only; the
/// regex crate's `\d` would also match other Unicode decimal digits.
const VERSION_PATTERN: &str = r"^[0-9]+\.[0-9]+\.[0-9]+$";

/// Reader for the pinned Terraform version of a source directory.
pub struct VersionReader;

impl VersionReader {
    /// Read `<src>/.terraform-version`, validate it, and expose it under
    /// the step output key `version`.
    ///
    /// A missing file or a value not matching `MAJOR.MINOR.PATCH` is a
    /// fatal error and no output is set. Idempotent for identical file
    /// content; the only side effects are log lines and the output write.
    pub fn run(host: &dyn CiHost, src: &Path) -> Result<String> {
        let version_file = src.join(".terraform-version");
        host.info(&format!(
            "Looking for Terraform version file at {}",
            version_file.display()
        ));

        let raw = std::fs::read_to_string(&version_file).map_err(|_| {
            ReportError::VersionFileMissing {
                path: version_file.clone(),
            }
        })?;
        let version = raw.trim();

        let pattern = Regex::new(VERSION_PATTERN).expect("version pattern is valid");
        if !pattern.is_match(version) {
            return Err(ReportError::InvalidVersion {
                value: version.to_string(),
            });
        }

        host.info(&format!("Terraform version set to v{version}"));
        host.set_output("version", version)?;
        Ok(version.to_string())
    }
}
