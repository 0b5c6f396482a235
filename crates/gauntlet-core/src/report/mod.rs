pub mod allure;
pub mod console;
pub mod display;
pub mod fallback;
pub mod trends;
pub mod widgets;

use std::path::Path;

use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::errors::PipelineError;
use crate::model::{AggregateCounts, ReportArtifact};

/// Produce the run's report: walk the provider list in order and fall back
/// to the self-contained document when none succeeds.
///
/// A missing generator never propagates; the only error out of here is an
/// unwritable report location.
pub fn synthesize(
    results_dir: &Path,
    report_dir: &Path,
    counts: AggregateCounts,
    config: &PipelineConfig,
) -> Result<ReportArtifact, PipelineError> {
    for provider in allure::generator_candidates() {
        // attempt() logs the miss; an unavailable provider just means "next".
        if provider.attempt(results_dir, report_dir).is_ok() {
            info!("report generated by {}", provider.name());
            return Ok(ReportArtifact::Rich {
                tool: provider.name().to_string(),
            });
        }
    }

    warn!("no report generator available; synthesizing fallback document");
    fallback::write_report(report_dir, counts, config)?;
    Ok(ReportArtifact::Fallback)
}
