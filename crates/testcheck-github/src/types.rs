//! Check Runs API request and response types.

use serde::{Deserialize, Serialize};
use testcheck_core::CheckOutput;

/// Status sent with every check run; results are only published once known.
pub const STATUS_COMPLETED: &str = "completed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Conclusion {
    Success,
    Failure,
    Neutral,
}

impl Conclusion {
    /// Conclusion for a run with `failed` failing tests.
    pub fn for_failures(failed: u64, ignore_failures: bool) -> Self {
        if ignore_failures {
            Self::Neutral
        } else if failed > 0 {
            Self::Failure
        } else {
            Self::Success
        }
    }
}

/// Body of `POST /repos/{owner}/{repo}/check-runs`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCheckRun<'a> {
    pub name: &'a str,
    pub head_sha: &'a str,
    pub status: &'static str,
    pub conclusion: Conclusion,
    pub output: &'a CheckOutput,
}

/// Subset of the check run returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckRunResponse {
    pub id: u64,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// Result of a publish call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    pub check_run_id: u64,
    pub html_url: Option<String>,
    pub head_sha: String,
    pub status: &'static str,
    pub conclusion: Conclusion,
    /// Failed tests in the published run; the caller's exit signal.
    pub failed: u64,
}
