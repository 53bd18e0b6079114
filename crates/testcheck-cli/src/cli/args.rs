use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use testcheck_core::{CheckConfig, RootPrefix, DEFAULT_EXTENSION};

/// Check name used by `render` when none is given.
pub const DEFAULT_CHECK_NAME: &str = "Test results";

#[derive(Parser)]
#[command(
    name = "testcheck",
    version,
    about = "Aggregate test reports into a size-bounded GitHub check run"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Aggregate reports and publish them as a check run
    Publish(PublishArgs),
    /// Aggregate reports and write the check output as JSON without publishing
    Render(RenderArgs),
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Directory holding the test report files
    #[arg(long, env = "INPUT_ARTIFACTS")]
    pub artifacts: Option<PathBuf>,

    /// Name of the check run
    #[arg(long, env = "INPUT_CHECK_NAME")]
    pub check_name: Option<String>,

    /// Report file extension
    #[arg(long, default_value = DEFAULT_EXTENSION, env = "INPUT_EXTENSION")]
    pub extension: String,

    /// Absolute build-root prefix stripped from reported file paths
    #[arg(long, env = "GITHUB_WORKSPACE")]
    pub root_prefix: Option<String>,

    /// Report a neutral result (and exit 0) even when tests failed
    #[arg(long, env = "INPUT_IGNORE_FAILURES")]
    pub ignore_failures: bool,

    /// Also write the assembled check output (JSON) to this file
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl ReportArgs {
    pub fn check_config(&self, default_name: Option<&str>) -> CheckConfig {
        let check_name = self
            .check_name
            .clone()
            .or_else(|| default_name.map(String::from))
            .unwrap_or_default();
        CheckConfig::new(self.artifacts.clone().unwrap_or_default(), check_name)
            .with_extension(&self.extension)
            .with_root_prefix(
                self.root_prefix
                    .as_deref()
                    .map(RootPrefix::new)
                    .unwrap_or_default(),
            )
    }
}

#[derive(Args, Debug, Clone)]
pub struct PublishArgs {
    #[command(flatten)]
    pub report: ReportArgs,

    /// Token for the Checks API
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Repository (owner/repo) to publish to
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// REST API base URL
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub report: ReportArgs,
}
