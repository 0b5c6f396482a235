//! Executor and environment descriptions, written both into the results
//! directory (for the external generator to pick up) and overwritten in the
//! generated report tree afterwards.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;

use serde::{Deserialize, Serialize};

use crate::config::{PipelineConfig, BUILD_NAME, BUILD_URL, FRAMEWORK};
use crate::errors::PipelineError;

/// Executor description, `executor.json` / `widgets/executors.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "buildOrder")]
    pub build_order: u32,
    #[serde(rename = "buildName")]
    pub build_name: String,
    #[serde(rename = "buildUrl")]
    pub build_url: String,
    #[serde(rename = "reportName")]
    pub report_name: String,
    #[serde(rename = "reportUrl")]
    pub report_url: String,
}

impl ExecutorInfo {
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            name: config.executor.clone(),
            kind: "github".to_string(),
            build_order: 1,
            build_name: BUILD_NAME.to_string(),
            build_url: BUILD_URL.to_string(),
            report_name: format!("QA Report - {}", config.executor),
            report_url: config.report_url(),
        }
    }
}

/// One row of the environment widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentEntry {
    pub values: Vec<String>,
    pub name: String,
}

fn entry(name: &str, value: impl Into<String>) -> EnvironmentEntry {
    EnvironmentEntry {
        values: vec![value.into()],
        name: name.to_string(),
    }
}

pub fn environment_entries(config: &PipelineConfig) -> Vec<EnvironmentEntry> {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    vec![
        entry("Environment", config.environment.clone()),
        entry("Framework", FRAMEWORK),
        entry("Platform", std::env::consts::OS),
        entry("Python.Version", runtime_version()),
        entry("Test.Type", "Comprehensive QA Suite"),
        entry("Project", "OpenFilter"),
        entry("Stage", "QA Validation"),
        entry("System.OS", platform()),
        entry(
            "Test.Categories",
            "Unit,Integration,E2E,Performance,Regression,Bug Discovery",
        ),
        entry("Executor", config.executor.clone()),
        entry("Report.Date", timestamp),
    ]
}

/// `os arch`, e.g. `linux x86_64`.
pub fn platform() -> String {
    format!("{} {}", std::env::consts::OS, std::env::consts::ARCH)
}

/// Version of the runner's interpreter, probed once per run. Falls back to
/// "unknown" when the interpreter is absent; the report stays degraded but
/// valid.
pub fn runtime_version() -> String {
    Command::new("python")
        .arg("--version")
        .output()
        .ok()
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().trim_start_matches("Python ").to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Seed the results directory with the executor description and the
/// `environment.properties` key=value file the generator embeds.
pub fn seed_results_dir(results_dir: &Path, config: &PipelineConfig) -> Result<(), PipelineError> {
    let executor_path = results_dir.join("executor.json");
    let executor = ExecutorInfo::from_config(config);
    let json = serde_json::to_string_pretty(&executor)
        .map_err(|err| PipelineError::output_write(&executor_path, err.into()))?;
    fs::write(&executor_path, json)
        .map_err(|err| PipelineError::output_write(&executor_path, err))?;

    let properties_path = results_dir.join("environment.properties");
    let platform = platform();
    let runtime = runtime_version();
    let mut out = Vec::new();
    for (key, value) in [
        ("environment", config.environment.as_str()),
        ("framework", FRAMEWORK),
        ("platform", platform.as_str()),
        ("python.version", runtime.as_str()),
        ("build.name", BUILD_NAME),
        ("build.url", BUILD_URL),
    ] {
        writeln!(out, "{key}={value}")
            .map_err(|err| PipelineError::output_write(&properties_path, err))?;
    }
    fs::write(&properties_path, out)
        .map_err(|err| PipelineError::output_write(&properties_path, err))
}

/// Overwrite the generated tree's executors and environment widgets with
/// this run's configuration. Rich path only; the fallback document embeds
/// the same data inline.
pub fn customize_report(report_dir: &Path, config: &PipelineConfig) -> Result<(), PipelineError> {
    let widgets = report_dir.join("widgets");
    fs::create_dir_all(&widgets).map_err(|err| PipelineError::output_write(&widgets, err))?;

    let executors_path = widgets.join("executors.json");
    let executors = vec![ExecutorInfo::from_config(config)];
    let json = serde_json::to_string(&executors)
        .map_err(|err| PipelineError::output_write(&executors_path, err.into()))?;
    fs::write(&executors_path, json)
        .map_err(|err| PipelineError::output_write(&executors_path, err))?;

    let environment_path = widgets.join("environment.json");
    let json = serde_json::to_string(&environment_entries(config))
        .map_err(|err| PipelineError::output_write(&environment_path, err.into()))?;
    fs::write(&environment_path, json)
        .map_err(|err| PipelineError::output_write(&environment_path, err))
}
