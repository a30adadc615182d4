//! Markdown status comment assembly.
//!
//! Comments follow a fixed contract so downstream tooling can find and
//! hide superseded reports: collapsible `<details>` sections per command
//! log, fenced code blocks tagged `text`/`hcl`/`diff` per log type, and
//! the hidden [`STATUS_MARKER`] terminating every comment.

use crate::outcome::StepOutcome;

/// Hidden HTML comment appended to every report.
///
/// Allows a re-run to locate (and hide) earlier report comments while the
/// history of all runs is retained on the pull request.
pub const STATUS_MARKER: &str = "<!-- terraform-status-report -->";

const INIT_LINK: &str = "[init]: https://www.terraform.io/cli/commands/init";
const FMT_LINK: &str = "[fmt]: https://www.terraform.io/cli/commands/fmt";
const VALIDATE_LINK: &str = "[validate]: https://www.terraform.io/cli/commands/validate";
const CHECKS_LINK: &str = "[checks]: https://github.com/n3tuk/workflows-reusable-terraform/blob/.github/workflows/terraform-checks.yaml";

/// Labels describing the Terraform resource under check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLabels {
    /// Resource kind, e.g. `module` or `configuration`.
    pub resource_type: String,

    /// Resource name, e.g. the module or workspace name.
    pub resource_name: String,
}

impl ResourceLabels {
    pub fn new(resource_type: &str, resource_name: &str) -> Self {
        ResourceLabels {
            resource_type: resource_type.to_string(),
            resource_name: resource_name.to_string(),
        }
    }
}

/// Which of the validate/fmt pair failed.
///
/// The report's grammar branches on this combination, so it is modelled
/// explicitly: each variant maps to a precomputed phrase set rather than
/// being spliced together from conditionals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckFailure {
    ValidateOnly,
    FmtOnly,
    Both,
}

impl CheckFailure {
    /// Classify a pair of step outcomes, or `None` when neither failed.
    pub fn from_outcomes(validate: &StepOutcome, fmt: &StepOutcome) -> Option<Self> {
        match (validate.is_failure(), fmt.is_failure()) {
            (true, true) => Some(CheckFailure::Both),
            (true, false) => Some(CheckFailure::ValidateOnly),
            (false, true) => Some(CheckFailure::FmtOnly),
            (false, false) => None,
        }
    }

    /// Whether the validate log section is included.
    pub fn includes_validate(&self) -> bool {
        matches!(self, CheckFailure::ValidateOnly | CheckFailure::Both)
    }

    /// Whether the fmt log section is included.
    pub fn includes_fmt(&self) -> bool {
        matches!(self, CheckFailure::FmtOnly | CheckFailure::Both)
    }

    /// The failed command(s), joined with "and" when both failed.
    fn commands_phrase(&self) -> &'static str {
        match self {
            CheckFailure::ValidateOnly => "[`terraform validate`][validate]",
            CheckFailure::FmtOnly => "[`terraform fmt`][fmt]",
            CheckFailure::Both => "[`terraform validate`][validate] and [`terraform fmt`][fmt]",
        }
    }

    /// Singular "summary" for one failure, plural for both.
    fn summary_noun(&self) -> &'static str {
        match self {
            CheckFailure::Both => "summaries",
            _ => "summary",
        }
    }

    /// Singular "this command" for one failure, plural for both.
    fn command_phrase(&self) -> &'static str {
        match self {
            CheckFailure::Both => "these commands",
            _ => "this command",
        }
    }
}

/// Render a collapsible log section with the given fence language tag.
fn details_section(summary: &str, fence: &str, log: &str) -> String {
    format!("<details>\n<summary>{summary}</summary>\n\n```{fence}\n{log}\n```\n</details>\n\n")
}

/// Render the status comment for a failed `terraform init` step.
///
/// The raw log is embedded verbatim in a `text`-fenced collapsible
/// section.
pub fn render_init_report(labels: &ResourceLabels, log: &str) -> String {
    let mut md = String::from("## Terraform Status Report\n\n");

    md.push_str(&format!(
        "GitHub Actions has run the [`terraform-checks`][checks] Workflow \
         against your pull request, but has **failed** to run [`terraform init \
         -backend=false`][init] against the {} **{}**. \
         Expand on the following summary to see the results from this command:\n\n",
        labels.resource_type, labels.resource_name
    ));

    md.push_str(&details_section(
        "<code>terraform init</code> Log",
        "text",
        log,
    ));

    md.push_str(INIT_LINK);
    md.push('\n');
    md.push_str(CHECKS_LINK);
    md.push_str("\n\n");
    md.push_str(STATUS_MARKER);
    md
}

/// Render the combined status comment for failed `terraform validate`
/// and/or `terraform fmt` steps.
///
/// One collapsible section is emitted per failing command, validate first
/// (`hcl`-fenced), then fmt (`diff`-fenced). The corresponding log must be
/// supplied for each included section.
pub fn render_check_report(
    labels: &ResourceLabels,
    failure: CheckFailure,
    validate_log: Option<&str>,
    fmt_log: Option<&str>,
) -> String {
    let mut md = String::from("### Terraform Status Report\n\n");

    md.push_str(&format!(
        "GitHub Actions has run the [`terraform-checks`][checks] Workflow \
         against your pull request, and, after a successful [`init`][init] step, \
         it has **failed** when running {} against the {} **{}**. \
         Expand on the following {} to see the results from {}:\n\n",
        failure.commands_phrase(),
        labels.resource_type,
        labels.resource_name,
        failure.summary_noun(),
        failure.command_phrase()
    ));

    if failure.includes_validate() {
        md.push_str(&details_section(
            "<code>terraform validate</code> Output",
            "hcl",
            validate_log.unwrap_or_default(),
        ));
    }

    if failure.includes_fmt() {
        md.push_str(&details_section(
            "<code>terraform fmt</code> Output",
            "diff",
            fmt_log.unwrap_or_default(),
        ));
    }

    md.push_str(INIT_LINK);
    md.push('\n');
    md.push_str(FMT_LINK);
    md.push('\n');
    md.push_str(VALIDATE_LINK);
    md.push('\n');
    md.push_str(CHECKS_LINK);
    md.push_str("\n\n");
    md.push_str(STATUS_MARKER);
    md
}
