use std::path::PathBuf;

use gauntlet_core::config::{find_available_port, PipelineConfig, DEFAULT_BASE_PORT};
use gauntlet_core::Pipeline;

use super::run::{display_mode, execute};
use crate::cli::args::ReportArgs;

/// `gauntlet report` is the pipeline minus the test run: collect whatever
/// the results directory already holds and build the report from it.
pub(crate) fn run(args: ReportArgs) -> anyhow::Result<i32> {
    let config = PipelineConfig {
        results_dir: args.results_dir,
        report_dir: args.report_dir,
        port: args.port.unwrap_or_else(|| find_available_port(DEFAULT_BASE_PORT)),
        executor: args.executor,
        environment: args.environment,
        runner_dir: PathBuf::from("."),
        skip_run: true,
        display: display_mode(args.serve, args.open),
    };

    execute(Pipeline::new(config))
}
