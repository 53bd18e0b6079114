//! Inline annotations for failing tests.

use crate::model::{Annotation, AnnotationLevel, RunSummary, SummaryTest};
use crate::paths::RootPrefix;

/// Upper bound on annotations per check run, fixed by the check API.
pub const MAX_ANNOTATIONS: usize = 50;

const DEFAULT_MESSAGE: &str = "Test failed";

/// Annotations for the failing tests of `summary`, in summary order, capped at
/// [`MAX_ANNOTATIONS`].
///
/// Tests without a usable source path (none reported, or nothing left after
/// stripping the root prefix) are attached to line 1 of their run's source
/// label; a path without a line is attached to line 1 of that path.
pub fn extract(summary: &RunSummary, prefix: &RootPrefix) -> Vec<Annotation> {
    let failing = summary.failing_tests().count();
    if failing > MAX_ANNOTATIONS {
        tracing::info!(
            failing,
            kept = MAX_ANNOTATIONS,
            "annotation limit reached; dropping later failures"
        );
    }

    summary
        .failing_tests()
        .take(MAX_ANNOTATIONS)
        .map(|entry| annotation_for(entry, prefix))
        .collect()
}

fn annotation_for(entry: &SummaryTest, prefix: &RootPrefix) -> Annotation {
    let test = &entry.test;
    let located = test
        .location
        .as_ref()
        .map(|loc| (prefix.normalize(&loc.path), loc.line.unwrap_or(1).max(1)))
        .filter(|(path, _)| !path.is_empty());
    let (path, line) = located.unwrap_or_else(|| (fallback_path(entry, prefix), 1));

    let message = test
        .failure
        .as_ref()
        .map(|f| f.message.trim())
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_MESSAGE)
        .to_string();

    let raw_details = test
        .failure
        .as_ref()
        .and_then(|f| f.stack_trace.as_deref())
        .map(str::trim_end)
        .filter(|s| !s.is_empty())
        .map(String::from);

    let title = if entry.suite.is_empty() {
        test.name.clone()
    } else {
        format!("{} › {}", entry.suite, test.name)
    };

    Annotation {
        path,
        start_line: line,
        end_line: line,
        annotation_level: AnnotationLevel::Failure,
        message,
        title,
        raw_details,
    }
}

/// The run's source label, unstripped if stripping would leave nothing.
fn fallback_path(entry: &SummaryTest, prefix: &RootPrefix) -> String {
    let label = prefix.normalize(&entry.source_label);
    if label.is_empty() {
        entry.source_label.replace('\\', "/")
    } else {
        label
    }
}
