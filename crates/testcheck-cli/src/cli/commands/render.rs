use std::sync::Arc;

use testcheck_core::{pipeline, JsonRunParser};

use super::{write_json, RenderedCheck};
use crate::cli::args::{RenderArgs, DEFAULT_CHECK_NAME};
use crate::exit_codes;

/// Build the check output and print it (or write it to `--output`).
pub async fn run(args: RenderArgs) -> anyhow::Result<i32> {
    let config = args.report.check_config(Some(DEFAULT_CHECK_NAME));
    let prepared = pipeline::prepare(&config, Arc::new(JsonRunParser)).await?;

    let rendered = RenderedCheck {
        check_name: &config.check_name,
        state: prepared.state,
        failed: prepared.failed(),
        output: &prepared.output,
    };

    match &args.report.output {
        Some(path) => write_json(path, &rendered)?,
        None => println!("{}", serde_json::to_string_pretty(&rendered)?),
    }

    Ok(exit_codes::from_failed(
        prepared.failed(),
        args.report.ignore_failures,
    ))
}
