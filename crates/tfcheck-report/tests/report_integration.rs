//! Integration tests for the reporting units with MemoryHost.

use std::io::Write;
use std::path::PathBuf;

use tfcheck_report::fakes::{HostEvent, MemoryHost};
use tfcheck_report::{
    CheckReporter, CiHost, InitReporter, LogPaths, ResourceLabels, StepOutcome, VersionReader,
    STATUS_MARKER,
};

fn labels() -> ResourceLabels {
    ResourceLabels::new("module", "terraform-aws-vpc")
}

fn write_log(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create log");
    write!(file, "{content}").expect("write log");
    path
}

/// Test: outcomes other than success/failure post no comment and do not
/// fail the step.
#[tokio::test]
async fn test_init_reporter_passes_through_other_outcomes() {
    for outcome in ["skipped", "cancelled", "unknown"] {
        let host = MemoryHost::new();
        let paths = LogPaths::default().with_init(PathBuf::from("/nonexistent/init.log"));

        InitReporter::run(&host, &paths, &labels(), &StepOutcome::parse(outcome))
            .await
            .expect("reporter failed");

        assert!(host.comments().is_empty(), "posted comment for {outcome}");
        assert!(!host.failed(), "failed step for {outcome}");
        assert_eq!(host.infos().len(), 1);
        assert!(host.infos()[0].contains(outcome));
    }
}

/// Test: a failed init embeds the log verbatim and terminates with the
/// hidden marker.
#[tokio::test]
async fn test_init_failure_comment_contract() {
    let log_content = "Error: Failed to query available provider packages\n\
                       Could not retrieve the list of available versions";
    let host = MemoryHost::new();
    let dir = tempfile::tempdir().expect("tempdir");
    let paths = LogPaths::default().with_init(write_log(&dir, "init.log", log_content));

    InitReporter::run(&host, &paths, &labels(), &StepOutcome::Failure)
        .await
        .expect("reporter failed");

    let comments = host.comments();
    assert_eq!(comments.len(), 1);
    let comment = &comments[0];

    assert!(comment.contains(log_content), "log not embedded verbatim");
    assert!(comment.contains("<details>"));
    assert!(comment.contains("<summary><code>terraform init</code> Log</summary>"));
    assert!(comment.ends_with("<!-- terraform-status-report -->"));
    assert!(host.failed());
}

/// Test: validate-only failure uses singular grammar and a single
/// hcl-fenced section.
#[tokio::test]
async fn test_validate_only_comment_contract() {
    let host = MemoryHost::new();
    let dir = tempfile::tempdir().expect("tempdir");
    let paths = LogPaths::default()
        .with_validate(write_log(&dir, "validate.log", "Error: Invalid resource type"));

    CheckReporter::run(
        &host,
        &paths,
        &labels(),
        &StepOutcome::Failure,
        &StepOutcome::Success,
    )
    .await
    .expect("reporter failed");

    let comments = host.comments();
    assert_eq!(comments.len(), 1);
    let comment = &comments[0];

    assert!(comment.contains("`terraform validate`"));
    assert!(!comment.contains("running [`terraform fmt`"));
    assert!(comment.contains("summary to see the results from this command:"));
    assert_eq!(comment.matches("<details>").count(), 1);
    assert!(comment.contains("```hcl\n"));
    assert!(!comment.contains("```diff\n"));
    assert!(comment.ends_with(STATUS_MARKER));
}

/// Test: both failures use plural grammar, "and" conjunction, and two
/// sections ordered hcl then diff.
#[tokio::test]
async fn test_both_failures_comment_contract() {
    let host = MemoryHost::new();
    let dir = tempfile::tempdir().expect("tempdir");
    let paths = LogPaths::default()
        .with_validate(write_log(&dir, "validate.log", "Error: Missing argument"))
        .with_fmt(write_log(&dir, "fmt.log", "-name=\"a\"\n+name = \"a\""));

    CheckReporter::run(
        &host,
        &paths,
        &labels(),
        &StepOutcome::Failure,
        &StepOutcome::Failure,
    )
    .await
    .expect("reporter failed");

    let comments = host.comments();
    assert_eq!(comments.len(), 1);
    let comment = &comments[0];

    assert!(comment.contains("[`terraform validate`][validate] and [`terraform fmt`][fmt]"));
    assert!(comment.contains("summaries to see the results from these commands:"));
    assert_eq!(comment.matches("<details>").count(), 2);

    let hcl = comment.find("```hcl").expect("hcl section missing");
    let diff = comment.find("```diff").expect("diff section missing");
    assert!(hcl < diff, "validate section must precede fmt section");

    assert!(comment.contains("Error: Missing argument"));
    assert!(comment.contains("+name = \"a\""));
    assert!(comment.ends_with(STATUS_MARKER));
}

/// Test: the comment is posted before the step is marked failed.
#[tokio::test]
async fn test_comment_precedes_failure_signal() {
    let host = MemoryHost::new();
    let dir = tempfile::tempdir().expect("tempdir");
    let paths =
        LogPaths::default().with_validate(write_log(&dir, "validate.log", "Error: oh no"));

    CheckReporter::run(
        &host,
        &paths,
        &labels(),
        &StepOutcome::Failure,
        &StepOutcome::Success,
    )
    .await
    .expect("reporter failed");

    let events = host.events();
    let comment_at = events
        .iter()
        .position(|event| matches!(event, HostEvent::Comment(_)))
        .expect("no comment posted");
    let failed_at = events
        .iter()
        .position(|event| matches!(event, HostEvent::Failed(_)))
        .expect("step not marked failed");
    assert!(
        comment_at < failed_at,
        "comment must be posted before the step is marked failed"
    );
}

/// Test: version reader happy path, malformed value, and missing file.
#[test]
fn test_version_reader_contract() {
    // "1.2.3\n" → output version = "1.2.3"
    let host = MemoryHost::new();
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join(".terraform-version"), "1.2.3\n").expect("write file");
    let version = VersionReader::run(&host, dir.path()).expect("reader failed");
    assert_eq!(version, "1.2.3");
    assert_eq!(host.output("version"), Some("1.2.3".to_string()));

    // "1.2" → format error, no output
    let host = MemoryHost::new();
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join(".terraform-version"), "1.2").expect("write file");
    assert!(VersionReader::run(&host, dir.path()).is_err());
    assert_eq!(host.output("version"), None);

    // missing file → not-found error, no output
    let host = MemoryHost::new();
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(VersionReader::run(&host, dir.path()).is_err());
    assert_eq!(host.output("version"), None);
}

/// Test: two identical runs produce identical results.
#[test]
fn test_version_reader_idempotence() {
    let host = MemoryHost::new();
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join(".terraform-version"), "1.7.5\n").expect("write file");

    let first = VersionReader::run(&host, dir.path()).expect("first run");
    let second = VersionReader::run(&host, dir.path()).expect("second run");
    assert_eq!(first, second);
    assert!(!host.failed());
}
