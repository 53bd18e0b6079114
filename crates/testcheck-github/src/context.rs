//! GitHub Actions environment.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{PublishError, PublishResult};

const DEFAULT_API_URL: &str = "https://api.github.com";

/// Where and for which commit the check run is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubContext {
    /// REST API base URL.
    pub api_url: String,

    /// `owner/repo`.
    pub repository: String,

    /// Commit that triggered the workflow.
    pub sha: Option<String>,

    /// Webhook event payload written by the runner.
    pub event_path: Option<PathBuf>,
}

impl Default for GithubContext {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            repository: String::new(),
            sha: None,
            event_path: None,
        }
    }
}

impl GithubContext {
    /// Create context from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `GITHUB_API_URL` | REST API base URL (default: `https://api.github.com`) |
    /// | `GITHUB_REPOSITORY` | `owner/repo` |
    /// | `GITHUB_SHA` | Commit that triggered the workflow |
    /// | `GITHUB_EVENT_PATH` | Path of the event payload |
    pub fn from_env() -> Self {
        Self {
            api_url: non_empty_var("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into()),
            repository: non_empty_var("GITHUB_REPOSITORY").unwrap_or_default(),
            sha: non_empty_var("GITHUB_SHA"),
            event_path: non_empty_var("GITHUB_EVENT_PATH").map(PathBuf::from),
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = repository.into();
        self
    }

    pub fn with_sha(mut self, sha: impl Into<String>) -> Self {
        self.sha = Some(sha.into());
        self
    }

    pub fn with_event_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.event_path = Some(path.into());
        self
    }

    /// Split `owner/repo`.
    pub fn owner_repo(&self) -> PublishResult<(&str, &str)> {
        match self.repository.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok((owner, repo))
            }
            _ => Err(PublishError::Context {
                message: format!(
                    "repository must be 'owner/repo', got '{}'",
                    self.repository
                ),
            }),
        }
    }

    /// Commit to attach the check run to: the pull request head when the
    /// event payload has one, the workflow commit otherwise.
    pub async fn head_sha(&self) -> PublishResult<String> {
        if let Some(path) = &self.event_path {
            if let Some(sha) = pull_request_head_sha(path).await {
                debug!(sha = %sha, "using pull request head commit");
                return Ok(sha);
            }
        }
        self.sha.clone().ok_or_else(|| PublishError::Context {
            message: "no pull request head and GITHUB_SHA is not set".to_string(),
        })
    }
}

#[derive(Deserialize)]
struct EventPayload {
    pull_request: Option<PullRequest>,
}

#[derive(Deserialize)]
struct PullRequest {
    head: Head,
}

#[derive(Deserialize)]
struct Head {
    sha: String,
}

async fn pull_request_head_sha(path: &Path) -> Option<String> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "event payload not readable");
            return None;
        }
    };
    match serde_json::from_str::<EventPayload>(&content) {
        Ok(event) => event
            .pull_request
            .map(|pr| pr.head.sha)
            .filter(|sha| !sha.is_empty()),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring malformed event payload");
            None
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
