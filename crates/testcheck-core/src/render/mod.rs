//! Markdown rendering of parsed runs.
//!
//! Two templates share one mechanism: [`Template::Summary`] is a compact table
//! with one row per run, [`Template::Details`] lists every suite and test.
//! Rendering is a pure function of `(runs, options)`; nothing is registered or
//! cached between calls.

mod markdown;

use std::fmt::Write as _;

use crate::model::{RunResult, Suite, Test, TestStatus};
use crate::paths::RootPrefix;
use markdown::{escape_table_cell, escape_text, format_duration, indent};

/// Margin applied to multi-line blocks such as stack traces.
pub const INDENT: usize = 4;

/// Content column of a `- ` list item; blocks nested under a test start here.
const LIST_CONTENT_COLUMN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Summary,
    Details,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit only failed tests and sections whose failure count is non-zero.
    pub only_failures: bool,
    pub root_prefix: RootPrefix,
}

impl RenderOptions {
    pub fn new(root_prefix: RootPrefix) -> Self {
        Self {
            only_failures: false,
            root_prefix,
        }
    }

    pub fn with_only_failures(mut self, only_failures: bool) -> Self {
        self.only_failures = only_failures;
        self
    }
}

pub fn render(template: Template, runs: &[RunResult], options: &RenderOptions) -> String {
    match template {
        Template::Summary => render_summary(runs, options),
        Template::Details => render_details(runs, options),
    }
}

fn render_summary(runs: &[RunResult], options: &RenderOptions) -> String {
    let rows: Vec<&RunResult> = runs
        .iter()
        .filter(|r| !options.only_failures || r.failed > 0)
        .collect();

    if rows.is_empty() {
        return if runs.is_empty() {
            "_No test results found._\n".to_string()
        } else if options.only_failures {
            "_No failed tests._\n".to_string()
        } else {
            "_No test runs._\n".to_string()
        };
    }

    let mut md = String::new();
    md.push_str("| Report | Outcome | Passed | Failed | Skipped | Duration |\n");
    md.push_str("|--------|---------|-------:|-------:|--------:|---------:|\n");
    for run in rows {
        let _ = writeln!(
            md,
            "| {} | {} | {} | {} | {} | {} |",
            escape_table_cell(&options.root_prefix.normalize(&run.source_label)),
            run_outcome(run),
            run.passed,
            run.failed,
            run.skipped,
            format_duration(run.duration_ms),
        );
    }
    md
}

fn run_outcome(run: &RunResult) -> &'static str {
    if run.failed > 0 {
        ":x: Failed"
    } else if run.total == 0 || run.skipped == run.total {
        ":heavy_minus_sign: Skipped"
    } else {
        ":white_check_mark: Passed"
    }
}

fn render_details(runs: &[RunResult], options: &RenderOptions) -> String {
    let mut md = String::new();
    for run in runs {
        if options.only_failures && run.failed == 0 {
            continue;
        }
        if !md.is_empty() {
            md.push('\n');
        }
        let _ = writeln!(
            md,
            "## {}\n",
            escape_text(&options.root_prefix.normalize(&run.source_label))
        );
        let _ = writeln!(
            md,
            "**{} tests** · {} passed · {} failed · {} skipped · {}",
            run.total,
            run.passed,
            run.failed,
            run.skipped,
            format_duration(run.duration_ms)
        );

        for suite in &run.suites {
            if options.only_failures && !suite.has_failures() {
                continue;
            }
            render_suite(&mut md, suite, options);
        }
    }

    if md.is_empty() {
        md.push_str(if options.only_failures {
            "_No failed tests._\n"
        } else {
            "_No test results found._\n"
        });
    }
    md
}

fn render_suite(md: &mut String, suite: &Suite, options: &RenderOptions) {
    let name = if suite.name.is_empty() {
        "(unnamed suite)"
    } else {
        suite.name.as_str()
    };
    let _ = writeln!(md, "\n### {}\n", escape_text(name));

    for test in &suite.tests {
        if options.only_failures && !test.status.is_failed() {
            continue;
        }
        render_test(md, test, &options.root_prefix);
    }
}

fn render_test(md: &mut String, test: &Test, prefix: &RootPrefix) {
    let icon = match test.status {
        TestStatus::Passed => ":white_check_mark:",
        TestStatus::Failed => ":x:",
        TestStatus::Skipped => ":heavy_minus_sign:",
    };
    let _ = write!(
        md,
        "- {icon} {} ({})",
        escape_text(&test.name),
        format_duration(test.duration_ms)
    );
    if let Some(loc) = &test.location {
        let path = prefix.normalize(&loc.path);
        match loc.line {
            Some(line) => {
                let _ = write!(md, " `{path}:{line}`");
            }
            None => {
                let _ = write!(md, " `{path}`");
            }
        }
    }
    md.push('\n');

    if let Some(failure) = &test.failure {
        for block in [Some(failure.message.as_str()), failure.stack_trace.as_deref()]
            .into_iter()
            .flatten()
            .filter(|b| !b.trim().is_empty())
        {
            md.push('\n');
            md.push_str(&indent(
                &prefix.normalize_in_text(block),
                LIST_CONTENT_COLUMN + INDENT,
            ));
            md.push('\n');
        }
        md.push('\n');
    }
}
