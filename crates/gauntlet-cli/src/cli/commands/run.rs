use gauntlet_core::config::{find_available_port, DisplayMode, PipelineConfig, DEFAULT_BASE_PORT};
use gauntlet_core::{Pipeline, PipelineError};

use crate::cli::args::RunArgs;
use crate::exit_codes;

pub(crate) fn run(args: RunArgs) -> anyhow::Result<i32> {
    let config = PipelineConfig {
        results_dir: args.results_dir,
        report_dir: args.report_dir,
        port: args.port.unwrap_or_else(|| find_available_port(DEFAULT_BASE_PORT)),
        executor: args.executor,
        environment: args.environment,
        runner_dir: args.runner_dir,
        skip_run: args.skip_run,
        display: display_mode(args.serve, args.open),
    };

    execute(Pipeline::new(config))
}

pub(crate) fn display_mode(serve: bool, open: bool) -> DisplayMode {
    if serve {
        DisplayMode::Serve
    } else if open {
        DisplayMode::Open
    } else {
        DisplayMode::PrintPath
    }
}

/// Shared pipeline execution and exit-code mapping for `run` and `report`.
pub(crate) fn execute(pipeline: Pipeline) -> anyhow::Result<i32> {
    match pipeline.run() {
        Ok(_outcome) => Ok(exit_codes::SUCCESS),
        Err(err @ PipelineError::RunnerCrashed { .. }) => {
            eprintln!("error: {err}");
            Ok(exit_codes::RUNNER_CRASHED)
        }
        Err(err @ PipelineError::OutputWrite { .. }) => {
            eprintln!("error: {err}");
            Ok(exit_codes::OUTPUT_WRITE_FAILED)
        }
        // Everything else is recovered inside the pipeline; reaching here is a bug.
        Err(err) => Err(err.into()),
    }
}
