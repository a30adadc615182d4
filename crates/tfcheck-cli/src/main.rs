//! tfcheck - Terraform check status reporting
//!
//! The `tfcheck` command runs as a step inside the `terraform-checks`
//! GitHub Actions workflow.
//!
//! ## Commands
//!
//! - `report-init`: report the `terraform init` step outcome on the PR
//! - `report-checks`: report the `terraform validate` / `terraform fmt`
//!   step outcomes on the PR
//! - `version`: read and validate the pinned `.terraform-version`

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

use tfcheck_report::{
    init_tracing, ActionsHost, CheckReporter, CiHost, InitReporter, LogPaths, ResourceLabels,
    StepOutcome, VersionReader,
};

#[derive(Parser)]
#[command(name = "tfcheck")]
#[command(author = "n3tuk")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terraform check status reporting for GitHub Actions", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report the outcome of the `terraform init` step
    ReportInit {
        /// Outcome of the init step (success, failure, skipped, ...)
        #[arg(long, env = "TFCHECK_INIT")]
        init: String,

        /// Resource type label (e.g. module, configuration)
        #[arg(long = "type", env = "TFCHECK_TYPE")]
        resource_type: String,

        /// Resource name label
        #[arg(long = "name", env = "TFCHECK_NAME")]
        resource_name: String,

        /// Override the captured init log path
        #[arg(long, env = "TFCHECK_INIT_LOG")]
        init_log: Option<PathBuf>,
    },

    /// Report the outcomes of the `terraform validate` and `terraform fmt` steps
    ReportChecks {
        /// Outcome of the validate step
        #[arg(long, env = "TFCHECK_VALIDATE")]
        validate: String,

        /// Outcome of the fmt step
        #[arg(long, env = "TFCHECK_FMT")]
        fmt: String,

        /// Resource type label (e.g. module, configuration)
        #[arg(long = "type", env = "TFCHECK_TYPE")]
        resource_type: String,

        /// Resource name label
        #[arg(long = "name", env = "TFCHECK_NAME")]
        resource_name: String,

        /// Override the captured validate log path
        #[arg(long, env = "TFCHECK_VALIDATE_LOG")]
        validate_log: Option<PathBuf>,

        /// Override the captured fmt log path
        #[arg(long, env = "TFCHECK_FMT_LOG")]
        fmt_log: Option<PathBuf>,
    },

    /// Read and validate the pinned Terraform version for a source tree
    Version {
        /// Source directory holding the .terraform-version file
        #[arg(long, env = "TFCHECK_SRC", default_value = ".")]
        src: PathBuf,
    },
}

fn log_paths(
    init: Option<PathBuf>,
    validate: Option<PathBuf>,
    fmt: Option<PathBuf>,
) -> LogPaths {
    let mut paths = LogPaths::default();
    if let Some(path) = init {
        paths = paths.with_init(path);
    }
    if let Some(path) = validate {
        paths = paths.with_validate(path);
    }
    if let Some(path) = fmt {
        paths = paths.with_fmt(path);
    }
    paths
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_tracing(cli.json, level);

    let host = ActionsHost::from_env().context("Failed to set up the runner host")?;

    let result = match cli.command {
        Commands::ReportInit {
            init,
            resource_type,
            resource_name,
            init_log,
        } => {
            let paths = log_paths(init_log, None, None);
            let labels = ResourceLabels::new(&resource_type, &resource_name);
            InitReporter::run(&host, &paths, &labels, &StepOutcome::parse(&init)).await
        }
        Commands::ReportChecks {
            validate,
            fmt,
            resource_type,
            resource_name,
            validate_log,
            fmt_log,
        } => {
            let paths = log_paths(None, validate_log, fmt_log);
            let labels = ResourceLabels::new(&resource_type, &resource_name);
            CheckReporter::run(
                &host,
                &paths,
                &labels,
                &StepOutcome::parse(&validate),
                &StepOutcome::parse(&fmt),
            )
            .await
        }
        Commands::Version { src } => VersionReader::run(&host, &src).map(|_| ()),
    };

    if let Err(err) = result {
        host.set_failed(&err.to_string());
    }

    // A reporter that marked the step failed (or an error above) decides
    // the process exit code.
    if host.failed() {
        std::process::exit(1);
    }

    Ok(())
}
