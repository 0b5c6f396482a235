//! External report generator probing.
//!
//! The generator is an optional collaborator: we hold an ordered list of
//! capability providers, try each one's `attempt` in turn, and record which
//! one produced the report. No provider succeeding is a degradation, not a
//! failure.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use tracing::debug;

use crate::errors::PipelineError;

/// A candidate producer of the rich report tree.
pub trait ReportGenerator {
    /// Label recorded in the produced artifact.
    fn name(&self) -> &str;

    /// Try to generate the report tree from `results_dir` into `report_dir`.
    /// `Err(MissingTool)` means "unavailable, try the next provider".
    fn attempt(&self, results_dir: &Path, report_dir: &Path) -> Result<(), PipelineError>;
}

/// The Allure CLI under one of its known command names.
pub struct AllureCli {
    command: PathBuf,
}

impl AllureCli {
    pub fn new(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Start `allure open` on the generated tree as a detached child. The
    /// server outlives the pipeline; termination is the user's interrupt.
    pub fn serve(&self, report_dir: &Path, port: u16) -> std::io::Result<Child> {
        Command::new(&self.command)
            .arg("open")
            .arg(report_dir)
            .args(["--port", &port.to_string()])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
    }
}

impl ReportGenerator for AllureCli {
    fn name(&self) -> &str {
        self.command.to_str().unwrap_or("allure")
    }

    fn attempt(&self, results_dir: &Path, report_dir: &Path) -> Result<(), PipelineError> {
        let output = Command::new(&self.command)
            .arg("generate")
            .arg(results_dir)
            .arg("--clean")
            .arg("-o")
            .arg(report_dir)
            .output();

        match output {
            Ok(out) if out.status.success() => Ok(()),
            Ok(out) => {
                debug!(
                    "{} generate exited with {:?}",
                    self.name(),
                    out.status.code()
                );
                Err(PipelineError::MissingTool(self.name().to_string()))
            }
            Err(err) => {
                debug!("{} not invocable: {err}", self.name());
                Err(PipelineError::MissingTool(self.name().to_string()))
            }
        }
    }
}

/// Command names probed for the Allure CLI, in order. The scoop path covers
/// per-user Windows installs that are not on PATH.
pub fn allure_commands() -> Vec<PathBuf> {
    let mut commands = vec![
        PathBuf::from("allure"),
        PathBuf::from("allure.bat"),
        PathBuf::from("allure.cmd"),
    ];
    if let Some(home) = dirs::home_dir() {
        commands.push(home.join("scoop/apps/allure/current/bin/allure.bat"));
    }
    commands
}

/// Ordered provider list the synthesizer walks.
pub fn generator_candidates() -> Vec<Box<dyn ReportGenerator>> {
    allure_commands()
        .into_iter()
        .map(|command| Box::new(AllureCli::new(command)) as Box<dyn ReportGenerator>)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_order_starts_with_bare_command() {
        let commands = allure_commands();
        assert!(commands.len() >= 3);
        assert_eq!(commands[0], PathBuf::from("allure"));
        assert_eq!(commands[1], PathBuf::from("allure.bat"));
        assert_eq!(commands[2], PathBuf::from("allure.cmd"));
    }

    #[test]
    fn absent_command_reports_missing_tool() {
        let provider = AllureCli::new("definitely-not-a-real-allure-binary");
        let dir = tempfile::tempdir().unwrap();
        let err = provider.attempt(dir.path(), &dir.path().join("out")).unwrap_err();
        assert!(matches!(err, PipelineError::MissingTool(_)));
    }
}
