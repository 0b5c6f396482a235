//! End-to-end exit-code and fallback-report contract for the `gauntlet`
//! binary. PATH is emptied so no external tool (allure, python, opener) can
//! be found: every run exercises the degraded paths deterministically.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn write_results(dir: &Path, passed: usize, failed: usize) {
    fs::create_dir_all(dir).unwrap();
    for i in 0..passed {
        fs::write(
            dir.join(format!("pass_{i}-result.json")),
            format!(r#"{{"name": "pass_{i}", "status": "passed"}}"#),
        )
        .unwrap();
    }
    for i in 0..failed {
        fs::write(
            dir.join(format!("fail_{i}-result.json")),
            format!(r#"{{"name": "fail_{i}", "status": "failed"}}"#),
        )
        .unwrap();
    }
}

fn gauntlet() -> Command {
    let mut cmd = Command::cargo_bin("gauntlet").unwrap();
    cmd.env("PATH", "");
    cmd
}

#[test]
fn skip_run_without_allure_produces_fallback_report_and_exits_zero() {
    let root = tempfile::tempdir().unwrap();
    let results = root.path().join("allure-results");
    let report = root.path().join("allure-report");
    write_results(&results, 26, 9);

    gauntlet()
        .args(["run", "--skip-run", "--port", "64999"])
        .arg("--results-dir")
        .arg(&results)
        .arg("--report-dir")
        .arg(&report)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("26 passed")
                .and(predicate::str::contains("9 failed"))
                .and(predicate::str::contains("35 total"))
                .and(predicate::str::contains("Trend widgets unavailable")),
        );

    let html = fs::read_to_string(report.join("index.html")).unwrap();
    assert!(html.contains("<h3>35</h3>"));
    assert!(html.contains("<h3>26</h3>"));
    assert!(html.contains("<h3>9</h3>"));

    // The results directory was seeded for the (absent) generator too.
    assert!(results.join("executor.json").exists());
    assert!(results.join("environment.properties").exists());
}

#[test]
fn report_command_on_empty_results_reports_zero_counts() {
    let root = tempfile::tempdir().unwrap();
    let results = root.path().join("allure-results");
    let report = root.path().join("allure-report");
    fs::create_dir_all(&results).unwrap();

    gauntlet()
        .args(["report", "--port", "64999"])
        .arg("--results-dir")
        .arg(&results)
        .arg("--report-dir")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 passed, 0 failed, 0 total"));

    assert!(report.join("index.html").exists());
}

#[test]
fn unwritable_report_dir_exits_one_with_no_partial_report() {
    let root = tempfile::tempdir().unwrap();
    let results = root.path().join("allure-results");
    write_results(&results, 1, 0);

    // A file where a directory is needed: create fails for any user.
    let blocker = root.path().join("blocker");
    fs::write(&blocker, "x").unwrap();
    let report = blocker.join("allure-report");

    gauntlet()
        .args(["run", "--skip-run", "--port", "64999"])
        .arg("--results-dir")
        .arg(&results)
        .arg("--report-dir")
        .arg(&report)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot write"));

    assert!(!report.join("index.html").exists());
}

#[test]
fn absent_test_runner_is_a_hard_crash_exit_two() {
    let root = tempfile::tempdir().unwrap();
    let results = root.path().join("allure-results");
    let report = root.path().join("allure-report");

    gauntlet()
        .args(["run", "--port", "64999"])
        .arg("--results-dir")
        .arg(&results)
        .arg("--report-dir")
        .arg(&report)
        .arg("--runner-dir")
        .arg(root.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("test runner crashed"));
}

#[test]
fn failing_tests_still_exit_zero() {
    // Only the tally matters for the exit code: a run that is all failures
    // is a successful pipeline invocation.
    let root = tempfile::tempdir().unwrap();
    let results = root.path().join("allure-results");
    let report = root.path().join("allure-report");
    write_results(&results, 0, 5);

    gauntlet()
        .args(["run", "--skip-run", "--port", "64999"])
        .arg("--results-dir")
        .arg(&results)
        .arg("--report-dir")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 passed, 5 failed, 5 total"));
}
