//! GitHub check-run publisher.
//!
//! Sends an assembled [`testcheck_core::CheckOutput`] to the Check Runs API as
//! a completed check run. There is no retry: any failure is returned to the
//! caller as a [`PublishError`].
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `GITHUB_API_URL` | REST API base URL (default: `https://api.github.com`) |
//! | `GITHUB_REPOSITORY` | `owner/repo` the check run belongs to |
//! | `GITHUB_SHA` | Fallback commit when the event has no pull request |
//! | `GITHUB_EVENT_PATH` | Event payload used to find the pull request head |

pub mod client;
pub mod context;
pub mod error;
pub mod types;

pub use client::{CheckPublisher, USER_AGENT_VALUE};
pub use context::GithubContext;
pub use error::{PublishError, PublishResult};
pub use types::{CheckRunResponse, Conclusion, CreateCheckRun, PublishOutcome, STATUS_COMPLETED};
