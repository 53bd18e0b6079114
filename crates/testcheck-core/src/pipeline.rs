//! End-to-end preparation of a check: discover → parse → combine → annotate →
//! assemble.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::aggregate::{combine, sort_runs};
use crate::annotate::extract;
use crate::config::CheckConfig;
use crate::error::{CheckError, CheckResult};
use crate::model::{CheckOutput, RunResult, RunSummary};
use crate::output::{assemble, OutputState};
use crate::parser::ReportParser;
use crate::render::RenderOptions;

/// Everything needed to publish one check run.
#[derive(Debug, Clone)]
pub struct PreparedCheck {
    pub runs: Vec<RunResult>,
    pub summary: RunSummary,
    pub output: CheckOutput,
    pub state: OutputState,
}

impl PreparedCheck {
    /// Failed-test count; the invocation's exit signal.
    pub fn failed(&self) -> u64 {
        self.summary.failed
    }
}

/// Report files directly inside `dir` whose extension matches
/// (case-insensitively). Sorted by path.
pub async fn discover(dir: &Path, extension: &str) -> CheckResult<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| CheckError::io(dir, e))?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| CheckError::io(dir, e))?
    {
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if !matches {
            continue;
        }
        // Follows symlinks, unlike DirEntry::file_type.
        let is_file = tokio::fs::metadata(&path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if is_file {
            files.push(path);
        }
    }
    files.sort();
    debug!(dir = %dir.display(), count = files.len(), "discovered report files");
    Ok(files)
}

/// Parse every file concurrently.
///
/// Results are ordered by `(source_label, path)` regardless of completion
/// order. The first failure aborts the remaining parses and is returned.
pub async fn collect_runs(
    parser: Arc<dyn ReportParser>,
    files: Vec<PathBuf>,
) -> CheckResult<Vec<RunResult>> {
    let mut join_set = JoinSet::new();
    let expected = files.len();
    for path in files {
        let parser = Arc::clone(&parser);
        join_set.spawn(async move {
            let parsed = parser.parse(&path).await;
            (path, parsed)
        });
    }

    let mut parsed = Vec::with_capacity(expected);
    while let Some(res) = join_set.join_next().await {
        match res {
            Ok((path, Ok(run))) => parsed.push((path, run)),
            Ok((_, Err(e))) => {
                join_set.abort_all();
                return Err(e);
            }
            Err(e) => {
                join_set.abort_all();
                return Err(CheckError::Task {
                    message: e.to_string(),
                });
            }
        }
    }

    // Path order first; the stable label sort keeps it for shared labels.
    parsed.sort_by(|a, b| a.0.cmp(&b.0));
    let mut runs: Vec<RunResult> = parsed.into_iter().map(|(_, run)| run).collect();
    sort_runs(&mut runs);
    Ok(runs)
}

/// Run the whole pipeline for `config`. Does not require a token.
pub async fn prepare(
    config: &CheckConfig,
    parser: Arc<dyn ReportParser>,
) -> CheckResult<PreparedCheck> {
    config.validate(false)?;

    let files = discover(&config.artifact_dir, &config.extension).await?;
    info!(
        dir = %config.artifact_dir.display(),
        files = files.len(),
        "parsing test reports"
    );
    let runs = collect_runs(parser, files).await?;

    let summary = combine(&config.check_name, &runs);
    let annotations = extract(&summary, &config.root_prefix);
    let options = RenderOptions::new(config.root_prefix.clone());
    let assembled = assemble(&summary, &runs, annotations, &options);

    info!(
        check = %config.check_name,
        total = summary.total,
        passed = summary.passed,
        failed = summary.failed,
        skipped = summary.skipped,
        annotations = assembled.output.annotations.len(),
        state = ?assembled.state,
        "check output assembled"
    );

    Ok(PreparedCheck {
        runs,
        summary,
        output: assembled.output,
        state: assembled.state,
    })
}
