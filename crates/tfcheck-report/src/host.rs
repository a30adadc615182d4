//! Runner host capability and its GitHub Actions implementation.
//!
//! The reporting units never talk to GitHub or the runner directly; they
//! depend on the [`CiHost`] trait, which covers the four primitives the
//! workflow exposes: informational logging, fatal step failure, step
//! outputs, and posting a pull request comment. Tests substitute
//! [`crate::fakes::MemoryHost`].
//!
//! # Security considerations
//!
//! The GitHub token is read from the `GITHUB_TOKEN` environment variable
//! and passed only to `bearer_auth()`. It is never logged, serialized, or
//! included in error messages.

use crate::error::{ReportError, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info};

/// Capabilities the orchestrating workflow provides to a reporting unit.
#[async_trait]
pub trait CiHost: Send + Sync {
    /// Emit an informational log line.
    fn info(&self, message: &str);

    /// Mark the current step as failed with a short message.
    ///
    /// Does not abort the process; callers decide the exit code after the
    /// unit has run to completion.
    fn set_failed(&self, message: &str);

    /// Whether `set_failed` has been called during this invocation.
    fn failed(&self) -> bool;

    /// Expose a named output value to downstream steps.
    fn set_output(&self, key: &str, value: &str) -> Result<()>;

    /// Post a new comment on the current pull request.
    async fn post_comment(&self, body: &str) -> Result<()>;
}

/// Repository and pull request the current workflow run is acting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoContext {
    pub owner: String,
    pub repo: String,
    pub issue_number: u64,
}

impl RepoContext {
    /// Create a context from explicit values.
    pub fn new(owner: &str, repo: &str, issue_number: u64) -> Self {
        RepoContext {
            owner: owner.to_string(),
            repo: repo.to_string(),
            issue_number,
        }
    }

    /// Resolve the context from the runner environment.
    ///
    /// Reads `GITHUB_REPOSITORY` (`owner/repo`) and extracts the pull
    /// request number from `GITHUB_REF` (`refs/pull/<n>/merge`).
    pub fn from_env() -> Result<Self> {
        let repository = std::env::var("GITHUB_REPOSITORY")
            .map_err(|_| ReportError::Environment("GITHUB_REPOSITORY is not set".to_string()))?;
        let (owner, repo) = repository.split_once('/').ok_or_else(|| {
            ReportError::Environment(format!(
                "GITHUB_REPOSITORY is not in owner/repo form: {repository}"
            ))
        })?;

        let git_ref = std::env::var("GITHUB_REF")
            .map_err(|_| ReportError::Environment("GITHUB_REF is not set".to_string()))?;
        let issue_number = parse_pull_request_ref(&git_ref).ok_or_else(|| {
            ReportError::Environment(format!("GITHUB_REF is not a pull request ref: {git_ref}"))
        })?;

        Ok(RepoContext::new(owner, repo, issue_number))
    }
}

/// Extract the pull request number from a `refs/pull/<n>/...` ref.
fn parse_pull_request_ref(git_ref: &str) -> Option<u64> {
    git_ref
        .strip_prefix("refs/pull/")?
        .split('/')
        .next()?
        .parse()
        .ok()
}

/// The real GitHub Actions host.
///
/// The repository context is optional: steps that never post a comment
/// (the version reader) can run outside a pull request context, and the
/// missing context only becomes an error when a post is attempted.
pub struct ActionsHost {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
    context: Option<RepoContext>,
    output_path: Option<String>,
    has_failed: AtomicBool,
}

impl ActionsHost {
    /// Create a host for the given repository context.
    ///
    /// The API base URL comes from `GITHUB_API_URL` (GHES) and falls back
    /// to `https://api.github.com`; the token from `GITHUB_TOKEN`; the step
    /// output file from `GITHUB_OUTPUT`.
    pub fn new(context: Option<RepoContext>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("tfcheck/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(ActionsHost {
            client,
            api_url: std::env::var("GITHUB_API_URL")
                .unwrap_or_else(|_| "https://api.github.com".to_string()),
            token: std::env::var("GITHUB_TOKEN").ok(),
            context,
            output_path: std::env::var("GITHUB_OUTPUT").ok(),
            has_failed: AtomicBool::new(false),
        })
    }

    /// Resolve everything from the runner environment.
    pub fn from_env() -> Result<Self> {
        Self::new(RepoContext::from_env().ok())
    }
}

#[derive(Debug, Serialize)]
struct CreateComment {
    body: String,
}

#[async_trait]
impl CiHost for ActionsHost {
    fn info(&self, message: &str) {
        info!("{message}");
    }

    fn set_failed(&self, message: &str) {
        error!("{message}");
        // The ::error:: workflow command surfaces the message as a step
        // annotation in the run summary.
        println!("::error::{}", escape_command_data(message));
        self.has_failed.store(true, Ordering::SeqCst);
    }

    fn failed(&self) -> bool {
        self.has_failed.load(Ordering::SeqCst)
    }

    fn set_output(&self, key: &str, value: &str) -> Result<()> {
        let path = self.output_path.as_deref().ok_or_else(|| {
            ReportError::Environment("GITHUB_OUTPUT is not set".to_string())
        })?;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        writeln!(file, "{key}={value}")?;
        Ok(())
    }

    async fn post_comment(&self, body: &str) -> Result<()> {
        let context = self.context.as_ref().ok_or_else(|| {
            ReportError::Environment(
                "cannot post a comment: not running against a pull request".to_string(),
            )
        })?;
        let url = format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.api_url, context.owner, context.repo, context.issue_number
        );
        let mut request = self.client.post(&url);

        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .header("Accept", "application/vnd.github+json")
            .json(&CreateComment {
                body: body.to_string(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ReportError::Comment(format!(
                "GitHub returned {} for {}",
                response.status(),
                url
            )));
        }

        Ok(())
    }
}

/// Escape a message for use as workflow command data.
///
/// The runner requires `%`, `\r`, and `\n` to be percent-encoded.
fn escape_command_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
