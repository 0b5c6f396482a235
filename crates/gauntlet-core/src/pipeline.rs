//! Sequential pipeline driver.
//!
//! One invocation walks the stages in order; each stage either completes,
//! or degrades locally (missing generator, no display, empty results), or —
//! for output-write and runner-crash failures only — aborts the run.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use tracing::{info, warn};

use crate::collect::collect_results;
use crate::config::PipelineConfig;
use crate::errors::PipelineError;
use crate::model::{AggregateCounts, ReportArtifact};
use crate::report;
use crate::report::{console, display, trends, widgets};
use crate::runner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    RunningTests,
    Collecting,
    Synthesizing,
    FabricatingTrends,
    Displaying,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::RunningTests => "running-tests",
            Stage::Collecting => "collecting",
            Stage::Synthesizing => "synthesizing",
            Stage::FabricatingTrends => "fabricating-trends",
            Stage::Displaying => "displaying",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// What one completed run produced.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub counts: AggregateCounts,
    pub artifact: ReportArtifact,
}

pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run(&self) -> Result<PipelineOutcome, PipelineError> {
        let config = &self.config;
        console::print_banner();
        println!("Using port: {}", config.port);

        self.prepare_output_dirs()?;

        if config.skip_run {
            info!("skipping test execution, reusing {}", config.results_dir.display());
        } else {
            enter(Stage::RunningTests);
            runner::run_tests(config)?;
        }

        enter(Stage::Collecting);
        let counts = collect_results(&config.results_dir);
        if counts.total == 0 {
            warn!("{}", PipelineError::EmptyResults(config.results_dir.clone()));
        }
        println!(
            "Test Results: {} passed, {} failed, {} total",
            counts.passed, counts.failed, counts.total
        );

        enter(Stage::Synthesizing);
        let artifact = report::synthesize(&config.results_dir, &config.report_dir, counts, config)?;

        if artifact.is_rich() {
            enter(Stage::FabricatingTrends);
            widgets::customize_report(&config.report_dir, config)?;
            trends::write_trend_widgets(&config.report_dir, counts)?;
        } else {
            println!("Trend widgets unavailable (no report generator); fallback report only.");
        }

        enter(Stage::Displaying);
        display::display_report(&artifact, config);

        enter(Stage::Done);
        console::print_summary(counts, &artifact, config);
        Ok(PipelineOutcome { counts, artifact })
    }

    /// Clear stale outputs and seed the results directory.
    ///
    /// With `skip_run` the results directory is the input and is left
    /// untouched apart from (re)seeding the executor/environment files.
    fn prepare_output_dirs(&self) -> Result<(), PipelineError> {
        let config = &self.config;

        if !config.skip_run {
            remove_dir_if_present(&config.results_dir)?;
        }
        remove_dir_if_present(&config.report_dir)?;

        let history = config.results_dir.join("history");
        fs::create_dir_all(&history).map_err(|err| PipelineError::output_write(&history, err))?;

        widgets::seed_results_dir(&config.results_dir, config)
    }
}

fn enter(stage: Stage) {
    info!("stage: {stage}");
}

fn remove_dir_if_present(dir: &Path) -> Result<(), PipelineError> {
    match fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(PipelineError::output_write(dir, err)),
    }
}
