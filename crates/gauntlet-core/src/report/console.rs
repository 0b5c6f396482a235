//! Console summary printed at the end of every run.

use crate::config::PipelineConfig;
use crate::model::{AggregateCounts, ReportArtifact};

pub fn print_banner() {
    println!("OpenFilter QA Automation Pipeline");
    println!("==================================================");
}

pub fn print_summary(
    counts: AggregateCounts,
    artifact: &ReportArtifact,
    config: &PipelineConfig,
) {
    println!();
    println!("QA Pipeline Complete");
    println!("==================================================");
    println!("Test Results Summary:");
    println!("  Total Tests: {}", counts.total);
    println!("  Passed:      {}", counts.passed);
    println!("  Failed (Bug Discovery): {}", counts.failed);
    println!();
    match artifact {
        ReportArtifact::Rich { tool } => {
            println!("Report: {} (generated by {tool})", config.report_url());
            println!("  Trend widgets: available with historical data");
        }
        ReportArtifact::Fallback => {
            println!("Report: {}", config.report_index().display());
            println!("  Trend widgets unavailable (install the Allure CLI for full features)");
        }
    }
    println!("  Executor:    {}", config.executor);
    println!("  Environment: {}", config.environment);
}
