use std::process::Command;

use gauntlet_core::config::{find_available_port, DEFAULT_BASE_PORT};
use gauntlet_core::report::allure::allure_commands;
use gauntlet_core::report::widgets::{platform, runtime_version};
use gauntlet_core::runner;

use crate::cli::args::DoctorArgs;

/// Suites the runner is expected to collect tests from.
const SUITES: [&str; 4] = ["unit", "integration", "end_to_end", "performance"];

pub fn run(args: DoctorArgs) -> anyhow::Result<i32> {
    println!("gauntlet doctor");
    println!("Platform: {}", platform());
    println!("Runner:   python {} (pytest)", runtime_version());

    // Report tooling: which of the known allure commands answers.
    let generator = allure_commands().into_iter().find(|cmd| {
        Command::new(cmd)
            .arg("--version")
            .output()
            .is_ok_and(|out| out.status.success())
    });
    match &generator {
        Some(cmd) => println!("Report generator: {} (rich reports + trend widgets)", cmd.display()),
        None => println!("Report generator: not found (fallback HTML report only)"),
    }

    let port = find_available_port(DEFAULT_BASE_PORT);
    println!("Report port: {port}");

    // Collection check per suite, the dry-run half of the pipeline.
    println!();
    println!("Test collection:");
    let mut ok = true;
    for suite in SUITES {
        match runner::collect_only(&args.runner_dir, suite) {
            Ok(count) => println!("  [PASS] {suite}: {count} tests collected"),
            Err(err) => {
                ok = false;
                println!("  [FAIL] {suite}: {err}");
            }
        }
    }

    if ok {
        println!();
        println!("Environment ready.");
        Ok(0)
    } else {
        println!();
        println!("Test collection failed; fix the runner environment before running the pipeline.");
        Ok(1)
    }
}
