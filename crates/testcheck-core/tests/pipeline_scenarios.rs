//! End-to-end scenarios over real report files in a temporary artifact dir.

use std::path::Path;
use std::sync::Arc;

use testcheck_core::{
    prepare, CheckConfig, CheckError, JsonRunParser, OutputState, RootPrefix, RunResult, Suite,
    Test, MAX_ANNOTATIONS, OUTPUT_SIZE_CEILING, TRUNCATION_NOTICE,
};

fn write_run(dir: &Path, file: &str, run: &RunResult) {
    let json = serde_json::to_string_pretty(run).expect("serialize run");
    std::fs::write(dir.join(file), json).expect("write run");
}

fn failing_run(label: &str, failures: usize) -> RunResult {
    let tests = (0..failures)
        .map(|i| {
            Test::failed(format!("{label}-{i}"), 2, format!("assertion {i} failed"))
                .with_location(format!("/ws/repo/src/{label}.rs"), Some(i as u32 + 1))
        })
        .collect();
    RunResult::from_suites(label, vec![Suite::new("suite", tests)])
}

#[tokio::test]
async fn single_run_with_one_failure() {
    let dir = tempfile::tempdir().unwrap();
    let run = RunResult::from_suites(
        "unit",
        vec![Suite::new(
            "Calc",
            vec![
                Test::passed("adds", 1),
                Test::skipped("later"),
                Test::failed("T1", 3, "expected 4").with_location("/ws/repo/src/calc.rs", Some(9)),
            ],
        )],
    );
    write_run(dir.path(), "unit.json", &run);

    let config = CheckConfig::new(dir.path(), "Tests").with_root_prefix(RootPrefix::new("/ws/repo"));
    let prepared = prepare(&config, Arc::new(JsonRunParser)).await.unwrap();

    assert_eq!(prepared.summary.total, 3);
    assert_eq!(prepared.summary.failed, 1);
    assert_eq!(prepared.failed(), 1);
    assert_eq!(prepared.state, OutputState::Full);
    assert_eq!(prepared.output.annotations.len(), 1);
    assert_eq!(prepared.output.annotations[0].path, "src/calc.rs");
    assert_eq!(prepared.output.annotations[0].start_line, 9);
    assert_eq!(
        prepared.output.title,
        "1 failed, 1 passed, 1 skipped of 3 tests"
    );
}

#[tokio::test]
async fn two_runs_of_sixty_failures_cap_annotations() {
    let dir = tempfile::tempdir().unwrap();
    write_run(dir.path(), "a.json", &failing_run("a", 60));
    write_run(dir.path(), "b.json", &failing_run("b", 60));

    let config = CheckConfig::new(dir.path(), "Tests");
    let prepared = prepare(&config, Arc::new(JsonRunParser)).await.unwrap();

    assert_eq!(prepared.failed(), 120);
    assert_eq!(prepared.output.annotations.len(), MAX_ANNOTATIONS);
    // Runs are folded in source-label order, so run "a" fills the budget.
    assert!(prepared
        .output
        .annotations
        .iter()
        .all(|a| a.path.ends_with("src/a.rs")));
}

#[tokio::test]
async fn oversized_report_degrades() {
    let dir = tempfile::tempdir().unwrap();
    let mut tests: Vec<Test> = (0..3_000)
        .map(|i| Test::passed(format!("passingCase{i:05}WithPadding"), 1))
        .collect();
    tests.push(Test::failed("lonelyFailure", 1, "nope"));
    let run = RunResult::from_suites("big", vec![Suite::new("suite", tests)]);
    write_run(dir.path(), "big.json", &run);

    let config = CheckConfig::new(dir.path(), "Tests");
    let prepared = prepare(&config, Arc::new(JsonRunParser)).await.unwrap();

    assert_ne!(prepared.state, OutputState::Full);
    let size = prepared.output.size();
    assert!(size < OUTPUT_SIZE_CEILING || prepared.output.text == TRUNCATION_NOTICE);
    assert!(prepared.output.text.contains("lonelyFailure"));
}

#[tokio::test]
async fn empty_artifact_dir_is_an_empty_check() {
    let dir = tempfile::tempdir().unwrap();
    let config = CheckConfig::new(dir.path(), "Tests");
    let prepared = prepare(&config, Arc::new(JsonRunParser)).await.unwrap();

    assert_eq!(prepared.summary.total, 0);
    assert_eq!(prepared.failed(), 0);
    assert!(prepared.output.annotations.is_empty());
    assert_eq!(prepared.output.title, "No test results found");
}

#[tokio::test]
async fn malformed_report_aborts_invocation() {
    let dir = tempfile::tempdir().unwrap();
    write_run(dir.path(), "good.json", &failing_run("good", 1));
    std::fs::write(dir.path().join("broken.json"), "{\"total\": ").unwrap();

    let config = CheckConfig::new(dir.path(), "Tests");
    let err = prepare(&config, Arc::new(JsonRunParser)).await.unwrap_err();
    match err {
        CheckError::Parse { path, .. } => assert!(path.ends_with("broken.json")),
        other => panic!("expected parse error, got {other}"),
    }
}

#[tokio::test]
async fn missing_artifact_dir_fails_before_parsing() {
    let config = CheckConfig::new("/no/such/artifacts", "");
    let err = prepare(&config, Arc::new(JsonRunParser)).await.unwrap_err();
    match err {
        CheckError::Configuration { missing } => {
            assert_eq!(missing.len(), 2);
            assert!(missing[1].contains("check name"));
        }
        other => panic!("expected configuration error, got {other}"),
    }
}

#[tokio::test]
async fn other_extensions_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    write_run(dir.path(), "a.json", &failing_run("a", 1));
    std::fs::write(dir.path().join("log.txt"), "not a report").unwrap();

    let config = CheckConfig::new(dir.path(), "Tests");
    let prepared = prepare(&config, Arc::new(JsonRunParser)).await.unwrap();
    assert_eq!(prepared.runs.len(), 1);
}

#[tokio::test]
async fn reports_sharing_a_label_keep_file_order() {
    let dir = tempfile::tempdir().unwrap();
    for file in ["b.json", "a.json"] {
        let stem = file.trim_end_matches(".json");
        let run = RunResult::from_suites(
            "unit",
            vec![Suite::new("s", vec![Test::failed(format!("fails-{stem}"), 1, "x")])],
        );
        write_run(dir.path(), file, &run);
    }

    let config = CheckConfig::new(dir.path(), "Tests");
    for _ in 0..5 {
        let prepared = prepare(&config, Arc::new(JsonRunParser)).await.unwrap();
        let titles: Vec<_> = prepared
            .output
            .annotations
            .iter()
            .map(|a| a.title.as_str())
            .collect();
        assert_eq!(titles, ["s › fails-a", "s › fails-b"]);
    }
}
