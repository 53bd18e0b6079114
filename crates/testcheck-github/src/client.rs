//! HTTP client for the Check Runs API.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use tracing::{debug, info};

use testcheck_core::CheckOutput;

use crate::context::GithubContext;
use crate::error::{PublishError, PublishResult};
use crate::types::{CheckRunResponse, Conclusion, CreateCheckRun, PublishOutcome, STATUS_COMPLETED};

/// User agent for API requests.
pub const USER_AGENT_VALUE: &str = concat!("testcheck/", env!("CARGO_PKG_VERSION"));

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Publishes check runs for one repository.
#[derive(Debug, Clone)]
pub struct CheckPublisher {
    client: reqwest::Client,
    base_url: String,
    token: String,
    context: GithubContext,
    ignore_failures: bool,
}

impl CheckPublisher {
    pub fn new(context: GithubContext, token: impl Into<String>) -> PublishResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        default_headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(default_headers)
            .build()
            .map_err(|e| PublishError::Network {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        // Normalize base URL (remove trailing slash)
        let base_url = context.api_url.trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            token: token.into(),
            context,
            ignore_failures: false,
        })
    }

    /// Report a neutral conclusion even when tests failed.
    pub fn with_ignore_failures(mut self, ignore_failures: bool) -> Self {
        self.ignore_failures = ignore_failures;
        self
    }

    /// Create a completed check run carrying `output`.
    ///
    /// `failed` is the failed-test count of the summary the output was built
    /// from; it decides the conclusion and is handed back in the outcome.
    pub async fn publish(
        &self,
        check_name: &str,
        output: &CheckOutput,
        failed: u64,
    ) -> PublishResult<PublishOutcome> {
        let (owner, repo) = self.context.owner_repo()?;
        let head_sha = self.context.head_sha().await?;
        let conclusion = Conclusion::for_failures(failed, self.ignore_failures);

        let url = format!("{}/repos/{}/{}/check-runs", self.base_url, owner, repo);
        debug!(
            url = %url,
            head_sha = %head_sha,
            annotations = output.annotations.len(),
            "creating check run"
        );

        let body = CreateCheckRun {
            name: check_name,
            head_sha: &head_sha,
            status: STATUS_COMPLETED,
            conclusion,
            output,
        };

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        match status.as_u16() {
            200..=299 => {}
            401 | 403 => {
                let message = response.text().await.unwrap_or_else(|_| status.to_string());
                return Err(PublishError::Unauthorized { message });
            }
            code => {
                let message = response.text().await.unwrap_or_else(|_| status.to_string());
                return Err(PublishError::Http {
                    status: code,
                    message,
                });
            }
        }

        let created: CheckRunResponse =
            response
                .json()
                .await
                .map_err(|e| PublishError::InvalidResponse {
                    message: format!("failed to parse check run response: {}", e),
                })?;

        info!(
            check_run_id = created.id,
            conclusion = ?conclusion,
            failed,
            "check run created"
        );

        Ok(PublishOutcome {
            check_run_id: created.id,
            html_url: created.html_url,
            head_sha,
            status: STATUS_COMPLETED,
            conclusion,
            failed,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let ctx = GithubContext::default().with_api_url("https://ghe.example/api/v3/");
        let publisher = CheckPublisher::new(ctx, "t").unwrap();
        assert_eq!(publisher.base_url(), "https://ghe.example/api/v3");
    }
}
