use std::sync::Arc;

use testcheck_core::{pipeline, JsonRunParser};
use testcheck_github::{CheckPublisher, GithubContext};

use super::{write_json, RenderedCheck};
use crate::cli::args::PublishArgs;
use crate::exit_codes;

/// Build the check output and publish it as a completed check run.
pub async fn run(args: PublishArgs) -> anyhow::Result<i32> {
    let mut config = args.report.check_config(None);
    if let Some(token) = &args.token {
        config = config.with_token(token);
    }
    // Report every missing parameter before touching the file system.
    config.validate(true)?;

    let prepared = pipeline::prepare(&config, Arc::new(JsonRunParser)).await?;

    if let Some(path) = &args.report.output {
        write_json(
            path,
            &RenderedCheck {
                check_name: &config.check_name,
                state: prepared.state,
                failed: prepared.failed(),
                output: &prepared.output,
            },
        )?;
    }

    let mut context = GithubContext::from_env();
    if let Some(repository) = &args.repository {
        context = context.with_repository(repository);
    }
    if let Some(api_url) = &args.api_url {
        context = context.with_api_url(api_url);
    }

    let token = config.token.clone().unwrap_or_default();
    let publisher =
        CheckPublisher::new(context, token)?.with_ignore_failures(args.report.ignore_failures);
    let outcome = publisher
        .publish(&config.check_name, &prepared.output, prepared.failed())
        .await?;

    eprintln!(
        "Published check run {} ({:?}): {}",
        outcome.check_run_id, outcome.conclusion, prepared.output.title
    );
    if let Some(url) = &outcome.html_url {
        eprintln!("  {url}");
    }

    Ok(exit_codes::from_failed(
        outcome.failed,
        args.report.ignore_failures,
    ))
}
