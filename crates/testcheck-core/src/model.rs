//! Structured test-run data shared by every stage of the pipeline.
//!
//! A [`RunResult`] is what the parser produces for one report file. The
//! aggregator folds any number of them into a [`RunSummary`], which is the only
//! mutable value in an invocation.

use serde::{Deserialize, Serialize};

/// Outcome of a single test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
}

impl TestStatus {
    pub fn is_failed(self) -> bool {
        matches!(self, TestStatus::Failed)
    }
}

/// Failure detail attached to a failed test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
}

/// Source position a test was declared at, as reported by the test runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Test {
    pub name: String,
    pub status: TestStatus,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<Failure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

impl Test {
    pub fn passed(name: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Passed,
            duration_ms,
            failure: None,
            location: None,
        }
    }

    pub fn skipped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Skipped,
            duration_ms: 0,
            failure: None,
            location: None,
        }
    }

    pub fn failed(name: impl Into<String>, duration_ms: u64, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Failed,
            duration_ms,
            failure: Some(Failure {
                message: message.into(),
                stack_trace: None,
            }),
            location: None,
        }
    }

    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        let stack_trace = Some(stack_trace.into());
        match self.failure.as_mut() {
            Some(failure) => failure.stack_trace = stack_trace,
            None => {
                self.failure = Some(Failure {
                    message: String::new(),
                    stack_trace,
                })
            }
        }
        self
    }

    pub fn with_location(mut self, path: impl Into<String>, line: Option<u32>) -> Self {
        self.location = Some(SourceLocation {
            path: path.into(),
            line,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suite {
    pub name: String,
    #[serde(default)]
    pub tests: Vec<Test>,
}

impl Suite {
    pub fn new(name: impl Into<String>, tests: Vec<Test>) -> Self {
        Self {
            name: name.into(),
            tests,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.tests.iter().any(|t| t.status.is_failed())
    }
}

/// One parsed report file.
///
/// `total == passed + skipped + failed` is guaranteed by the parser; nothing
/// downstream re-checks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    /// Where the run came from, usually the report file path.
    #[serde(default)]
    pub source_label: String,
    pub total: u64,
    pub passed: u64,
    pub skipped: u64,
    pub failed: u64,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub suites: Vec<Suite>,
}

impl RunResult {
    /// Build a run whose counters are derived from its suites.
    pub fn from_suites(source_label: impl Into<String>, suites: Vec<Suite>) -> Self {
        let mut run = Self {
            source_label: source_label.into(),
            total: 0,
            passed: 0,
            skipped: 0,
            failed: 0,
            duration_ms: 0,
            suites,
        };
        // Wrapping like RunSummary::fold; only durations can realistically overflow.
        for test in run.suites.iter().flat_map(|s| s.tests.iter()) {
            run.total += 1;
            run.duration_ms = run.duration_ms.wrapping_add(test.duration_ms);
            match test.status {
                TestStatus::Passed => run.passed += 1,
                TestStatus::Failed => run.failed += 1,
                TestStatus::Skipped => run.skipped += 1,
            }
        }
        run
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Counter invariant the parser is expected to uphold.
    pub fn is_consistent(&self) -> bool {
        self.passed
            .checked_add(self.skipped)
            .and_then(|n| n.checked_add(self.failed))
            == Some(self.total)
    }

    pub fn tests(&self) -> impl Iterator<Item = &Test> {
        self.suites.iter().flat_map(|s| s.tests.iter())
    }
}

/// A test as seen by the summary: the test plus where it was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryTest {
    pub source_label: String,
    pub suite: String,
    pub test: Test,
}

/// Accumulated view over every run of one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub check_name: String,
    pub total: u64,
    pub passed: u64,
    pub skipped: u64,
    pub failed: u64,
    pub duration_ms: u64,
    /// Tests in run order, then suite order, then test order.
    pub tests: Vec<SummaryTest>,
}

impl RunSummary {
    pub fn new(check_name: impl Into<String>) -> Self {
        Self {
            check_name: check_name.into(),
            ..Self::default()
        }
    }

    pub fn failing_tests(&self) -> impl Iterator<Item = &SummaryTest> {
        self.tests.iter().filter(|t| t.test.status.is_failed())
    }
}

/// Severity of an inline annotation, as understood by the check API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationLevel {
    Notice,
    Warning,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub path: String,
    pub start_line: u32,
    pub end_line: u32,
    pub annotation_level: AnnotationLevel,
    pub message: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_details: Option<String>,
}

/// Payload accepted by the check API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutput {
    pub title: String,
    pub summary: String,
    pub text: String,
    pub annotations: Vec<Annotation>,
}

impl CheckOutput {
    /// Size proxy compared against the output ceiling.
    pub fn size(&self) -> usize {
        self.title.len() + self.summary.len() + self.text.len() + self.annotations.len()
    }
}
