//! Self-contained HTML report, produced when no external generator is
//! available. Degraded (no trend widgets, no per-test drill-down) but it
//! must never fail given a writable report directory.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::config::{PipelineConfig, FRAMEWORK};
use crate::errors::PipelineError;
use crate::model::AggregateCounts;
use crate::report::widgets::{platform, runtime_version};

/// Write `<report>/index.html`. The document is staged in a temp file in the
/// same directory and renamed into place, so an interrupted or failed write
/// leaves no partial report behind.
pub fn write_report(
    report_dir: &Path,
    counts: AggregateCounts,
    config: &PipelineConfig,
) -> Result<PathBuf, PipelineError> {
    fs::create_dir_all(report_dir).map_err(|err| PipelineError::output_write(report_dir, err))?;

    let html = render(counts, config);
    let mut staged = NamedTempFile::new_in(report_dir)
        .map_err(|err| PipelineError::output_write(report_dir, err))?;
    staged
        .write_all(html.as_bytes())
        .map_err(|err| PipelineError::output_write(report_dir, err))?;

    let index = report_dir.join("index.html");
    staged
        .persist(&index)
        .map_err(|err| PipelineError::output_write(&index, err.error))?;
    Ok(index)
}

fn render(counts: AggregateCounts, config: &PipelineConfig) -> String {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>OpenFilter QA Report - {executor}</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 40px; background-color: #f5f5f5; }}
        .container {{ max-width: 1200px; margin: 0 auto; background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }}
        .header {{ text-align: center; border-bottom: 3px solid #2196F3; padding-bottom: 20px; margin-bottom: 30px; }}
        .header h1 {{ color: #2196F3; margin: 0; }}
        .header p {{ color: #666; margin: 5px 0; }}
        .metrics {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 20px; margin: 30px 0; }}
        .metric {{ color: white; padding: 20px; border-radius: 8px; text-align: center; }}
        .metric h3 {{ margin: 0 0 10px 0; font-size: 2em; }}
        .metric p {{ margin: 0; opacity: 0.9; }}
        .success {{ background: linear-gradient(135deg, #4CAF50 0%, #45a049 100%); }}
        .failed {{ background: linear-gradient(135deg, #f44336 0%, #da190b 100%); }}
        .total {{ background: linear-gradient(135deg, #2196F3 0%, #1976D2 100%); }}
        .info-grid {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 20px; margin: 30px 0; }}
        .info-card {{ background: #f9f9f9; padding: 20px; border-radius: 8px; border-left: 4px solid #2196F3; }}
        .info-card h3 {{ margin: 0 0 15px 0; color: #2196F3; }}
        .info-card ul {{ margin: 0; padding-left: 20px; }}
        .info-card li {{ margin: 5px 0; }}
        .footer {{ text-align: center; margin-top: 40px; padding-top: 20px; border-top: 1px solid #ddd; color: #666; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>OpenFilter QA Test Report</h1>
            <p><strong>Executor:</strong> {executor} | <strong>Environment:</strong> {environment}</p>
            <p><strong>Date:</strong> {timestamp}</p>
        </div>

        <div class="metrics">
            <div class="metric total">
                <h3>{total}</h3>
                <p>Total Tests</p>
            </div>
            <div class="metric success">
                <h3>{passed}</h3>
                <p>Passed</p>
            </div>
            <div class="metric failed">
                <h3>{failed}</h3>
                <p>Failed (Bug Discovery)</p>
            </div>
        </div>

        <div class="info-grid">
            <div class="info-card">
                <h3>Test Categories</h3>
                <ul>
                    <li>Unit Tests (Bug Discovery)</li>
                    <li>Integration Tests</li>
                    <li>End-to-End Tests</li>
                    <li>Performance Tests</li>
                    <li>Regression Tests</li>
                </ul>
            </div>

            <div class="info-card">
                <h3>Bug Discoveries</h3>
                <ul>
                    <li>S3 Pagination Bug</li>
                    <li>Video Memory Leak</li>
                    <li>Race Condition</li>
                </ul>
            </div>

            <div class="info-card">
                <h3>Success Rate</h3>
                <ul>
                    <li>Pass Rate: {pass_rate:.1}%</li>
                    <li>Bug Discovery: {failure_rate:.1}%</li>
                    <li>Test Coverage: Comprehensive</li>
                </ul>
            </div>

            <div class="info-card">
                <h3>Environment</h3>
                <ul>
                    <li>Environment: {environment}</li>
                    <li>Platform: {platform}</li>
                    <li>Python: {runtime}</li>
                    <li>Framework: {framework}</li>
                </ul>
            </div>
        </div>

        <div class="footer">
            <p><strong>Note:</strong> For full Allure reporting with trends and detailed analysis, install the Allure CLI and re-run the pipeline.</p>
        </div>
    </div>
</body>
</html>
"#,
        executor = config.executor,
        environment = config.environment,
        timestamp = timestamp,
        total = counts.total,
        passed = counts.passed,
        failed = counts.failed,
        pass_rate = counts.pass_rate(),
        failure_rate = counts.failure_rate(),
        platform = platform(),
        runtime = runtime_version(),
        framework = FRAMEWORK,
    )
}
