use std::net::TcpListener;
use std::path::PathBuf;

pub const DEFAULT_RESULTS_DIR: &str = "allure-results";
pub const DEFAULT_REPORT_DIR: &str = "allure-report";
/// Base of the port range probed for the report server.
pub const DEFAULT_BASE_PORT: u16 = 64678;
pub const DEFAULT_EXECUTOR: &str = "QA Engineer";
pub const DEFAULT_ENVIRONMENT: &str = "Stage";
pub const BUILD_NAME: &str = "OpenFilter QA Test Suite";
pub const BUILD_URL: &str = "https://github.com/plainsight/openfilter";
pub const FRAMEWORK: &str = "pytest";

/// What to do with the finished report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Print the report location and exit.
    #[default]
    PrintPath,
    /// Open the report in the platform's default viewer.
    Open,
    /// Leave a report-hosting server running after the pipeline finishes.
    Serve,
}

/// Immutable configuration for one pipeline invocation.
///
/// Constructed once by the caller and passed into the driver; nothing reads
/// configuration from the process environment after this point.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory the runner writes per-test result artifacts into.
    pub results_dir: PathBuf,
    /// Directory the report tree (or fallback document) is rooted at.
    pub report_dir: PathBuf,
    /// Port for the report server and the advertised report URL.
    pub port: u16,
    /// Executor label shown in the report.
    pub executor: String,
    /// Environment label shown in the report.
    pub environment: String,
    /// Working directory the test runner is invoked in.
    pub runner_dir: PathBuf,
    /// Reuse existing result artifacts instead of invoking the runner.
    pub skip_run: bool,
    pub display: DisplayMode,
}

impl PipelineConfig {
    pub fn report_url(&self) -> String {
        format!("http://localhost:{}/index.html", self.port)
    }

    pub fn report_index(&self) -> PathBuf {
        self.report_dir.join("index.html")
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
            port: find_available_port(DEFAULT_BASE_PORT),
            executor: DEFAULT_EXECUTOR.to_string(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
            runner_dir: PathBuf::from("."),
            skip_run: false,
            display: DisplayMode::default(),
        }
    }
}

/// First bindable port in `[base, base + 100)`, falling back to `base` when
/// the whole range is taken.
pub fn find_available_port(base: u16) -> u16 {
    (base..base.saturating_add(100))
        .find(|port| TcpListener::bind(("127.0.0.1", *port)).is_ok())
        .unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_url_embeds_port() {
        let config = PipelineConfig {
            port: 64678,
            ..PipelineConfig::default()
        };
        assert_eq!(config.report_url(), "http://localhost:64678/index.html");
    }

    #[test]
    fn find_available_port_skips_bound_port() {
        // Hold the base port so the probe has to move past it.
        let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
        let base = listener.local_addr().unwrap().port();
        let found = find_available_port(base);
        assert_ne!(found, base);
        assert!(found > base && found < base.saturating_add(100));
    }
}
