use clap::{Parser, Subcommand};
use std::path::PathBuf;

use gauntlet_core::config::{DEFAULT_ENVIRONMENT, DEFAULT_EXECUTOR, DEFAULT_REPORT_DIR, DEFAULT_RESULTS_DIR};

#[derive(Parser)]
#[command(
    name = "gauntlet",
    version,
    about = "QA pipeline for OpenFilter — one command to run the test suite and produce an Allure-style report with trend widgets"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full pipeline: tests, result collection, report, display
    Run(RunArgs),
    /// Build a report from an existing results directory (no test run)
    Report(ReportArgs),
    /// Diagnose the environment: report tooling, port, test collection
    Doctor(DoctorArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    /// Directory the runner writes per-test result artifacts into
    #[arg(long, default_value = DEFAULT_RESULTS_DIR)]
    pub results_dir: PathBuf,

    /// Directory the report is rooted at
    #[arg(long, default_value = DEFAULT_REPORT_DIR)]
    pub report_dir: PathBuf,

    /// Report server port (default: first free port probed from 64678)
    #[arg(long)]
    pub port: Option<u16>,

    /// Executor label shown in the report
    #[arg(long, default_value = DEFAULT_EXECUTOR)]
    pub executor: String,

    /// Environment label shown in the report
    #[arg(long, default_value = DEFAULT_ENVIRONMENT)]
    pub environment: String,

    /// Working directory the test runner is invoked in
    #[arg(long, default_value = ".")]
    pub runner_dir: PathBuf,

    /// Reuse existing result artifacts instead of invoking the runner
    #[arg(long)]
    pub skip_run: bool,

    /// Leave a report server running after the pipeline finishes
    #[arg(long, conflicts_with = "open")]
    pub serve: bool,

    /// Open the report in the platform's default viewer
    #[arg(long)]
    pub open: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ReportArgs {
    /// Existing results directory to report on
    #[arg(long, default_value = DEFAULT_RESULTS_DIR)]
    pub results_dir: PathBuf,

    /// Directory the report is rooted at
    #[arg(long, default_value = DEFAULT_REPORT_DIR)]
    pub report_dir: PathBuf,

    /// Report server port (default: first free port probed from 64678)
    #[arg(long)]
    pub port: Option<u16>,

    /// Executor label shown in the report
    #[arg(long, default_value = DEFAULT_EXECUTOR)]
    pub executor: String,

    /// Environment label shown in the report
    #[arg(long, default_value = DEFAULT_ENVIRONMENT)]
    pub environment: String,

    /// Leave a report server running after the report is built
    #[arg(long, conflicts_with = "open")]
    pub serve: bool,

    /// Open the report in the platform's default viewer
    #[arg(long)]
    pub open: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct DoctorArgs {
    /// Working directory the test runner is invoked in
    #[arg(long, default_value = ".")]
    pub runner_dir: PathBuf,
}
