use std::fs;
use std::path::Path;

use tracing::debug;

use crate::errors::PipelineError;
use crate::model::{AggregateCounts, TestResultRecord};

/// Suffix the runner gives per-test result artifacts.
const RESULT_SUFFIX: &str = "-result.json";

/// Tabulate every result record under `dir` into one set of counts.
///
/// Best-effort by contract: a missing or empty directory yields zero counts,
/// and records that fail to parse are dropped from the tally (logged at
/// debug level). Reads only; never writes.
pub fn collect_results(dir: &Path) -> AggregateCounts {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            debug!("results directory {} unreadable: {err}", dir.display());
            return AggregateCounts::default();
        }
    };

    entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(RESULT_SUFFIX))
        })
        .filter_map(|path| match parse_record(&path) {
            Ok(record) => Some(record),
            Err(err) => {
                debug!("skipping record: {err}");
                None
            }
        })
        .fold(AggregateCounts::default(), |counts, record| {
            counts.with(record.status)
        })
}

fn parse_record(path: &Path) -> Result<TestResultRecord, PipelineError> {
    let raw = fs::read_to_string(path).map_err(|err| PipelineError::MalformedRecord {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    serde_json::from_str(&raw).map_err(|err| PipelineError::MalformedRecord {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}
