//! Assembly of the size-bounded check output.
//!
//! The check API rejects outputs over 65 535 characters. Detail text is
//! degraded in at most two steps until the payload fits:
//!
//! | State | Detail text |
//! |-------|-------------|
//! | [`OutputState::Full`] | every test |
//! | [`OutputState::FailuresOnly`] | failed tests only |
//! | [`OutputState::Truncated`] | [`TRUNCATION_NOTICE`] |
//!
//! Title, summary and annotations are never degraded.

use serde::{Deserialize, Serialize};

use crate::model::{Annotation, CheckOutput, RunResult, RunSummary};
use crate::render::{render, RenderOptions, Template};

/// Size budget for the assembled output, kept below the API's hard limit.
pub const OUTPUT_SIZE_CEILING: usize = 65_000;

/// Detail text used once even the failures-only report does not fit.
pub const TRUNCATION_NOTICE: &str = "The detailed test report is too large to display here. \
Open the workflow run logs to see the full results.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputState {
    Full,
    FailuresOnly,
    Truncated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledOutput {
    pub output: CheckOutput,
    pub state: OutputState,
}

/// Title line for a summary.
pub fn build_title(summary: &RunSummary) -> String {
    if summary.total == 0 {
        return "No test results found".to_string();
    }
    format!(
        "{} failed, {} passed, {} skipped of {} tests",
        summary.failed, summary.passed, summary.skipped, summary.total
    )
}

/// Build the check output for `runs`, degrading the detail text until the
/// size proxy is under [`OUTPUT_SIZE_CEILING`]. Never fails.
pub fn assemble(
    summary: &RunSummary,
    runs: &[RunResult],
    annotations: Vec<Annotation>,
    options: &RenderOptions,
) -> AssembledOutput {
    let full = options.clone().with_only_failures(false);
    let mut output = CheckOutput {
        title: build_title(summary),
        summary: render(Template::Summary, runs, &full),
        text: render(Template::Details, runs, &full),
        annotations,
    };
    let mut state = OutputState::Full;

    if output.size() >= OUTPUT_SIZE_CEILING {
        tracing::warn!(
            size = output.size(),
            ceiling = OUTPUT_SIZE_CEILING,
            "check output too large; rendering failures only"
        );
        let failures = options.clone().with_only_failures(true);
        output.text = render(Template::Details, runs, &failures);
        state = OutputState::FailuresOnly;
    }

    if output.size() >= OUTPUT_SIZE_CEILING {
        tracing::warn!(
            size = output.size(),
            ceiling = OUTPUT_SIZE_CEILING,
            "failures-only report still too large; replacing details with notice"
        );
        output.text = TRUNCATION_NOTICE.to_string();
        state = OutputState::Truncated;
    }

    AssembledOutput { output, state }
}
