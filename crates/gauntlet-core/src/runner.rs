use std::path::Path;
use std::process::Command;

use tracing::info;

use crate::config::PipelineConfig;
use crate::errors::PipelineError;

/// pytest exit codes that still mean "the runner did its job": all tests
/// passed, some tests failed, or nothing was collected. Anything else
/// (interrupted, internal error, usage error) is a hard crash.
const RUNNER_OK_CODES: [i32; 3] = [0, 1, 5];

/// Invoke the external test runner against the configured working directory,
/// pointing its result artifacts at `config.results_dir`.
///
/// Failing tests are an expected outcome and do not fail the pipeline; only
/// a spawn failure or a crash-level exit code is reported upward.
pub fn run_tests(config: &PipelineConfig) -> Result<(), PipelineError> {
    info!("running test suite via {}", FRAMEWORK_INVOCATION);
    // The runner resolves --alluredir against its own working directory, so
    // hand it an absolute path (the pipeline created the directory already).
    let results_dir = config
        .results_dir
        .canonicalize()
        .unwrap_or_else(|_| config.results_dir.clone());
    let status = Command::new("python")
        .args(["-m", "pytest", ".", "--alluredir"])
        .arg(&results_dir)
        .args(["--tb=short", "-v"])
        .current_dir(&config.runner_dir)
        .status();

    match status {
        Ok(status) if status.code().is_some_and(|c| RUNNER_OK_CODES.contains(&c)) => Ok(()),
        Ok(status) => Err(PipelineError::RunnerCrashed {
            code: status.code(),
        }),
        Err(err) => {
            info!("could not spawn test runner: {err}");
            Err(PipelineError::RunnerCrashed { code: None })
        }
    }
}

const FRAMEWORK_INVOCATION: &str = "python -m pytest";

/// Ask the runner how many tests it can collect for `suite` without
/// executing any of them. Used by `gauntlet doctor`.
pub fn collect_only(runner_dir: &Path, suite: &str) -> Result<usize, PipelineError> {
    let output = Command::new("python")
        .args(["-m", "pytest", suite, "--collect-only", "-q"])
        .current_dir(runner_dir)
        .output()
        .map_err(|_| PipelineError::RunnerCrashed { code: None })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_collected_count(&stdout).ok_or(PipelineError::RunnerCrashed {
        code: output.status.code(),
    })
}

/// Pull the collected-test count out of a `--collect-only -q` tail summary.
///
/// Accepts both `128 tests collected in 0.52s` and the deselected form
/// `10/128 tests collected`; with deselection the total is what matters.
pub(crate) fn parse_collected_count(stdout: &str) -> Option<usize> {
    stdout
        .lines()
        .rev()
        .find(|line| line.contains("collected") && line.contains("test"))
        .and_then(|line| {
            let first = line.split_whitespace().next()?;
            match first.split_once('/') {
                Some((_, total)) => total.parse().ok(),
                None => first.parse().ok(),
            }
        })
}
