use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error taxonomy for the pipeline.
///
/// Recovery policy: everything is handled as close to its source as
/// possible. `MissingTool` degrades report generation, `MalformedRecord`
/// skips one record, `EmptyResults` reports zero counts — none of these
/// cross the driver boundary. Only `RunnerCrashed` and `OutputWrite`
/// surface to the caller and map to a non-zero exit.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// External report generator absent or its invocation failed.
    #[error("report tool unavailable: {0}")]
    MissingTool(String),

    /// One result artifact could not be parsed. Skipped, never fatal.
    #[error("malformed result record {path}: {reason}")]
    MalformedRecord { path: PathBuf, reason: String },

    /// Results directory missing or empty. Reported as zero counts.
    #[error("no test result records found in {0}")]
    EmptyResults(PathBuf),

    /// The invoked test runner itself crashed (not merely failing tests).
    #[error("test runner crashed (exit code {code:?})")]
    RunnerCrashed { code: Option<i32> },

    /// Cannot create or write the output location. Fatal.
    #[error("cannot write {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PipelineError {
    pub(crate) fn output_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::OutputWrite {
            path: path.into(),
            source,
        }
    }

    /// True for the conditions that abort the run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PipelineError::RunnerCrashed { .. } | PipelineError::OutputWrite { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_runner_and_output_errors_are_fatal() {
        assert!(!PipelineError::MissingTool("allure".into()).is_fatal());
        assert!(!PipelineError::EmptyResults("allure-results".into()).is_fatal());
        assert!(PipelineError::RunnerCrashed { code: Some(3) }.is_fatal());
        assert!(
            PipelineError::output_write("allure-report", io::Error::from(io::ErrorKind::Other))
                .is_fatal()
        );
    }
}
