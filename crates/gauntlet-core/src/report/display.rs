//! Final stage: put the report in front of the user.
//!
//! Every branch degrades toward printing the path; this stage can never
//! fail the pipeline.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::config::{DisplayMode, PipelineConfig};
use crate::model::ReportArtifact;
use crate::report::allure::{allure_commands, AllureCli};

pub fn display_report(artifact: &ReportArtifact, config: &PipelineConfig) {
    let index = config.report_index();
    match config.display {
        DisplayMode::Serve if artifact.is_rich() => {
            if serve(config) {
                println!("Report server running at {}", config.report_url());
                println!("(the server keeps running after the pipeline exits)");
            } else {
                println!("Could not start a report server; opening the local file instead.");
                open_or_print(&index);
            }
        }
        // Serving the single-document fallback adds nothing over opening it.
        DisplayMode::Serve | DisplayMode::Open => open_or_print(&index),
        DisplayMode::PrintPath => print_path(&index),
    }
}

fn serve(config: &PipelineConfig) -> bool {
    for command in allure_commands() {
        match AllureCli::new(&command).serve(&config.report_dir, config.port) {
            // The child is deliberately not awaited.
            Ok(_child) => return true,
            Err(err) => debug!("{} open failed: {err}", command.display()),
        }
    }
    false
}

fn open_or_print(index: &Path) {
    for opener in ["xdg-open", "open"] {
        let spawned = Command::new(opener)
            .arg(index)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        if spawned.is_ok() {
            println!("Report opened: {}", index.display());
            return;
        }
    }
    print_path(index);
}

fn print_path(index: &Path) {
    println!("Report generated at: {}", index.display());
}
