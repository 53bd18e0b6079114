//! Report parser seam.
//!
//! Format-specific parsing lives behind [`ReportParser`]. The only parser
//! shipped here reads this crate's own serialized [`RunResult`].

use std::path::Path;

use async_trait::async_trait;

use crate::error::{CheckError, CheckResult};
use crate::model::RunResult;

/// Turns one report file into a [`RunResult`].
///
/// Implementations must uphold `total == passed + skipped + failed`.
#[async_trait]
pub trait ReportParser: Send + Sync {
    async fn parse(&self, path: &Path) -> CheckResult<RunResult>;
}

/// Parses `RunResult` JSON documents.
///
/// A missing or empty `source_label` is filled in with the file path.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRunParser;

impl JsonRunParser {
    pub fn parse_str(&self, path: &Path, content: &str) -> CheckResult<RunResult> {
        let mut run: RunResult =
            serde_json::from_str(content).map_err(|e| CheckError::parse(path, e.to_string()))?;

        if run.source_label.trim().is_empty() {
            run.source_label = path.display().to_string();
        }

        if !run.is_consistent() {
            return Err(CheckError::parse(
                path,
                format!(
                    "counters do not add up: total={} passed={} skipped={} failed={}",
                    run.total, run.passed, run.skipped, run.failed
                ),
            ));
        }
        Ok(run)
    }
}

#[async_trait]
impl ReportParser for JsonRunParser {
    async fn parse(&self, path: &Path) -> CheckResult<RunResult> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CheckError::io(path, e))?;
        self.parse_str(path, &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TestStatus;

    const VALID: &str = r#"{
        "total": 2, "passed": 1, "skipped": 0, "failed": 1, "duration_ms": 30,
        "suites": [{
            "name": "Math",
            "tests": [
                {"name": "adds", "status": "passed", "duration_ms": 10},
                {"name": "divides", "status": "failed", "duration_ms": 20,
                 "failure": {"message": "division by zero"},
                 "location": {"path": "src/math.rs", "line": 7}}
            ]
        }]
    }"#;

    #[test]
    fn parses_and_labels_with_path() {
        let run = JsonRunParser
            .parse_str(Path::new("out/a.json"), VALID)
            .unwrap();
        assert_eq!(run.source_label, "out/a.json");
        assert_eq!(run.failed, 1);
        let failed = run.tests().find(|t| t.status == TestStatus::Failed).unwrap();
        assert_eq!(failed.location.as_ref().unwrap().line, Some(7));
    }

    #[test]
    fn explicit_label_is_kept() {
        let content = r#"{"source_label": "unit", "total": 0, "passed": 0, "skipped": 0, "failed": 0}"#;
        let run = JsonRunParser
            .parse_str(Path::new("out/a.json"), content)
            .unwrap();
        assert_eq!(run.source_label, "unit");
        assert!(run.suites.is_empty());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = JsonRunParser
            .parse_str(Path::new("bad.json"), "{not json")
            .unwrap_err();
        assert!(matches!(err, CheckError::Parse { .. }));
    }

    #[test]
    fn inconsistent_counters_are_rejected() {
        let content = r#"{"total": 3, "passed": 1, "skipped": 0, "failed": 1}"#;
        let err = JsonRunParser
            .parse_str(Path::new("bad.json"), content)
            .unwrap_err();
        assert!(err.to_string().contains("counters do not add up"));
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let err = JsonRunParser
            .parse(Path::new("/definitely/not/here.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::Io { .. }));
    }
}
