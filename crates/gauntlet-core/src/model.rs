use serde::{Deserialize, Serialize};

/// Status of a single executed test case, as emitted by the test runner.
///
/// Statuses the runner may add in future versions deserialize to `Unknown`
/// instead of failing the whole record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Passed,
    Failed,
    Broken,
    Skipped,
    #[serde(other)]
    Unknown,
}

impl TestStatus {
    /// Failed and broken both count as failures for reporting purposes.
    pub fn is_failure(self) -> bool {
        matches!(self, TestStatus::Failed | TestStatus::Broken)
    }
}

/// One `*-result.json` artifact describing a single executed test.
///
/// The on-disk format is owned by the runner; we read only the fields we
/// tabulate and ignore the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResultRecord {
    #[serde(default)]
    pub name: String,
    pub status: TestStatus,
}

/// Summary tally of one run, derived from the set of result records.
///
/// Invariant: `total >= passed + failed` (skipped/unknown records count
/// toward the total only).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateCounts {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl AggregateCounts {
    /// Fold step: the counts after tallying one more record.
    pub fn with(self, status: TestStatus) -> Self {
        Self {
            total: self.total + 1,
            passed: self.passed + usize::from(status == TestStatus::Passed),
            failed: self.failed + usize::from(status.is_failure()),
        }
    }

    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.passed as f64 / self.total as f64 * 100.0
        }
    }

    pub fn failure_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.failed as f64 / self.total as f64 * 100.0
        }
    }
}

/// The human-viewable output of one pipeline run.
///
/// Exactly one variant is produced per run; which one depends on whether an
/// external report generator was available at run time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportArtifact {
    /// Multi-file report tree produced by an external tool. Records which
    /// probed command succeeded.
    Rich { tool: String },
    /// Single self-contained HTML document synthesized by us.
    Fallback,
}

impl ReportArtifact {
    pub fn is_rich(&self) -> bool {
        matches!(self, ReportArtifact::Rich { .. })
    }
}

/// One historical data point for a trend widget.
///
/// `build_order` labels run recency: 1 is the current run, larger numbers
/// recede into history. The payload type is metric-specific.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint<T> {
    #[serde(rename = "buildOrder")]
    pub build_order: u32,
    #[serde(rename = "reportUrl")]
    pub report_url: String,
    #[serde(rename = "reportName")]
    pub report_name: String,
    pub data: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_lowercase_and_tolerates_unknown() {
        let s: TestStatus = serde_json::from_str("\"passed\"").unwrap();
        assert_eq!(s, TestStatus::Passed);
        let s: TestStatus = serde_json::from_str("\"broken\"").unwrap();
        assert_eq!(s, TestStatus::Broken);
        let s: TestStatus = serde_json::from_str("\"flaky\"").unwrap();
        assert_eq!(s, TestStatus::Unknown);
    }

    #[test]
    fn record_ignores_extra_fields() {
        let rec: TestResultRecord = serde_json::from_str(
            r#"{"name": "test_s3_pagination", "status": "failed", "uuid": "x", "steps": []}"#,
        )
        .unwrap();
        assert_eq!(rec.name, "test_s3_pagination");
        assert_eq!(rec.status, TestStatus::Failed);
    }

    #[test]
    fn counts_fold_keeps_invariant() {
        let statuses = [
            TestStatus::Passed,
            TestStatus::Failed,
            TestStatus::Broken,
            TestStatus::Skipped,
            TestStatus::Unknown,
        ];
        let counts = statuses
            .into_iter()
            .fold(AggregateCounts::default(), AggregateCounts::with);
        assert_eq!(counts.total, 5);
        assert_eq!(counts.passed, 1);
        assert_eq!(counts.failed, 2);
        assert!(counts.total >= counts.passed + counts.failed);
    }

    #[test]
    fn rates_guard_division_by_zero() {
        let empty = AggregateCounts::default();
        assert_eq!(empty.pass_rate(), 0.0);
        assert_eq!(empty.failure_rate(), 0.0);
    }

    #[test]
    fn trend_point_uses_camel_case_keys() {
        let point = TrendPoint {
            build_order: 1,
            report_url: ".".to_string(),
            report_name: "Current".to_string(),
            data: serde_json::json!({"duration": 11350}),
        };
        let v = serde_json::to_value(&point).unwrap();
        assert!(v.get("buildOrder").is_some());
        assert!(v.get("reportUrl").is_some());
        assert!(v.get("reportName").is_some());
        assert!(v.get("build_order").is_none());
    }
}
