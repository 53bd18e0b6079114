//! Folding parsed runs into one [`RunSummary`].

use crate::model::{RunResult, RunSummary, SummaryTest};

impl RunSummary {
    /// Add one run's counters and tests. Counters are plain sums that wrap on
    /// overflow instead of clamping or panicking; the run's own invariants are
    /// trusted.
    pub fn fold(&mut self, run: &RunResult) {
        self.total = self.total.wrapping_add(run.total);
        self.passed = self.passed.wrapping_add(run.passed);
        self.skipped = self.skipped.wrapping_add(run.skipped);
        self.failed = self.failed.wrapping_add(run.failed);
        self.duration_ms = self.duration_ms.wrapping_add(run.duration_ms);

        for suite in &run.suites {
            self.tests.extend(suite.tests.iter().map(|test| SummaryTest {
                source_label: run.source_label.clone(),
                suite: suite.name.clone(),
                test: test.clone(),
            }));
        }
    }
}

/// Combine `runs`, in the given order, into a fresh summary.
pub fn combine(check_name: &str, runs: &[RunResult]) -> RunSummary {
    let mut summary = RunSummary::new(check_name);
    for run in runs {
        summary.fold(run);
    }
    tracing::debug!(
        check = check_name,
        runs = runs.len(),
        total = summary.total,
        failed = summary.failed,
        "combined test runs"
    );
    summary
}

/// Order runs by source label so output does not depend on directory listing
/// or task completion order. Stable: runs sharing a label keep their order.
pub fn sort_runs(runs: &mut [RunResult]) {
    runs.sort_by(|a, b| a.source_label.cmp(&b.source_label));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Suite, Test};
    use proptest::prelude::*;

    fn run(label: &str, tests: Vec<Test>) -> RunResult {
        RunResult::from_suites(label, vec![Suite::new(format!("{label}-suite"), tests)])
    }

    #[test]
    fn empty_input_yields_zeroes() {
        let summary = combine("tests", &[]);
        assert_eq!(summary.check_name, "tests");
        assert_eq!(summary.total, 0);
        assert_eq!(summary.passed, 0);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.duration_ms, 0);
        assert!(summary.tests.is_empty());
    }

    #[test]
    fn tests_are_flattened_in_run_suite_test_order() {
        let first = RunResult::from_suites(
            "b.json",
            vec![
                Suite::new("s1", vec![Test::passed("t1", 1), Test::passed("t2", 1)]),
                Suite::new("s2", vec![Test::failed("t3", 1, "x")]),
            ],
        );
        let second = run("a.json", vec![Test::skipped("t4")]);

        let summary = combine("tests", &[first, second]);
        let names: Vec<_> = summary.tests.iter().map(|t| t.test.name.as_str()).collect();
        assert_eq!(names, ["t1", "t2", "t3", "t4"]);
        assert_eq!(summary.tests[2].suite, "s2");
        assert_eq!(summary.tests[3].source_label, "a.json");
    }

    #[test]
    fn counters_are_trusted_not_recomputed() {
        let mut r = run("a.json", vec![Test::passed("t", 1)]);
        r.total = 10;
        r.passed = 10;
        let summary = combine("tests", &[r]);
        assert_eq!(summary.total, 10);
        assert_eq!(summary.passed, 10);
        assert_eq!(summary.tests.len(), 1);
    }

    #[test]
    fn inputs_are_not_mutated() {
        let runs = vec![run("a.json", vec![Test::failed("t", 3, "x")])];
        let before = runs.clone();
        let _ = combine("tests", &runs);
        assert_eq!(runs, before);
    }

    #[test]
    fn sort_runs_orders_by_label() {
        let mut runs = vec![run("c", vec![]), run("a", vec![]), run("b", vec![])];
        sort_runs(&mut runs);
        let labels: Vec<_> = runs.iter().map(|r| r.source_label.as_str()).collect();
        assert_eq!(labels, ["a", "b", "c"]);
    }

    #[test]
    fn sort_runs_keeps_order_of_shared_labels() {
        let mut runs = vec![
            run("b", vec![Test::passed("first", 1)]),
            run("a", vec![]),
            run("b", vec![Test::passed("second", 1)]),
        ];
        sort_runs(&mut runs);
        let names: Vec<_> = runs
            .iter()
            .map(|r| r.tests().next().map_or("", |t| t.name.as_str()))
            .collect();
        assert_eq!(names, ["", "first", "second"]);
    }

    #[test]
    fn overflowing_counters_wrap() {
        let mut big = run("a", vec![]);
        big.total = u64::MAX;
        big.passed = u64::MAX;
        big.duration_ms = u64::MAX;
        let one = run("b", vec![Test::passed("t", 2)]);

        let summary = combine("tests", &[big, one]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.passed, 0);
        assert_eq!(summary.duration_ms, 1);
        assert_eq!(summary.tests.len(), 1);
    }

    fn arb_run() -> impl Strategy<Value = RunResult> {
        (0u64..1_000, 0u64..1_000, 0u64..1_000, 0u64..100_000).prop_map(
            |(passed, skipped, failed, duration_ms)| RunResult {
                source_label: "r".into(),
                total: passed + skipped + failed,
                passed,
                skipped,
                failed,
                duration_ms,
                suites: vec![],
            },
        )
    }

    proptest! {
        #[test]
        fn counters_are_sums(runs in proptest::collection::vec(arb_run(), 0..16)) {
            let summary = combine("p", &runs);
            prop_assert_eq!(summary.total, runs.iter().map(|r| r.total).sum::<u64>());
            prop_assert_eq!(summary.passed, runs.iter().map(|r| r.passed).sum::<u64>());
            prop_assert_eq!(summary.skipped, runs.iter().map(|r| r.skipped).sum::<u64>());
            prop_assert_eq!(summary.failed, runs.iter().map(|r| r.failed).sum::<u64>());
            prop_assert_eq!(summary.duration_ms, runs.iter().map(|r| r.duration_ms).sum::<u64>());
        }
    }
}
