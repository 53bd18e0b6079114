pub mod dispatch;
pub mod publish;
pub mod render;

pub use dispatch::dispatch;

use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use testcheck_core::{CheckOutput, OutputState};

/// Check output plus the facts a workflow step needs to act on it.
#[derive(Debug, Serialize)]
pub struct RenderedCheck<'a> {
    pub check_name: &'a str,
    pub state: OutputState,
    pub failed: u64,
    pub output: &'a CheckOutput,
}

pub(crate) fn write_json(path: &Path, rendered: &RenderedCheck<'_>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(rendered)?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "check output written");
    Ok(())
}
