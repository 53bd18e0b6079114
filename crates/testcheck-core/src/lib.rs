//! Test report aggregation for code-review check runs.
//!
//! The pipeline takes any number of parsed test runs and produces one
//! [`CheckOutput`]:
//!
//! - [`aggregate::combine`] folds runs into a [`RunSummary`]
//! - [`annotate::extract`] turns failing tests into at most
//!   [`MAX_ANNOTATIONS`] inline annotations
//! - [`render::render`] produces the summary and details markdown
//! - [`output::assemble`] keeps the payload under [`OUTPUT_SIZE_CEILING`],
//!   degrading the details when needed
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use testcheck_core::{pipeline, CheckConfig, JsonRunParser};
//!
//! # async fn example() -> Result<(), testcheck_core::CheckError> {
//! let config = CheckConfig::new("target/test-results", "Unit tests");
//! let prepared = pipeline::prepare(&config, Arc::new(JsonRunParser)).await?;
//! println!("{} ({} failed)", prepared.output.title, prepared.failed());
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod annotate;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;
pub mod paths;
pub mod pipeline;
pub mod render;

pub use aggregate::{combine, sort_runs};
pub use annotate::{extract, MAX_ANNOTATIONS};
pub use config::{CheckConfig, DEFAULT_EXTENSION};
pub use error::{CheckError, CheckResult};
pub use model::{
    Annotation, AnnotationLevel, CheckOutput, Failure, RunResult, RunSummary, SourceLocation,
    Suite, SummaryTest, Test, TestStatus,
};
pub use output::{
    assemble, build_title, AssembledOutput, OutputState, OUTPUT_SIZE_CEILING, TRUNCATION_NOTICE,
};
pub use parser::{JsonRunParser, ReportParser};
pub use paths::RootPrefix;
pub use pipeline::{collect_runs, discover, prepare, PreparedCheck};
pub use render::{render, RenderOptions, Template, INDENT};
