//! Error types for the check pipeline.

use std::path::PathBuf;

/// Pipeline errors.
///
/// Exceeding the output size ceiling is not an error; see [`crate::output`].
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// Required invocation parameters are missing.
    #[error("missing required configuration: {}", missing.join(", "))]
    Configuration { missing: Vec<String> },

    /// A report file could not be parsed.
    #[error("failed to parse report {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// The artifact directory could not be listed or a report could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A parse task died before producing a result.
    #[error("parse task failed: {message}")]
    Task { message: String },
}

impl CheckError {
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration { .. } => 2,
            Self::Parse { .. } | Self::Io { .. } | Self::Task { .. } => 3,
        }
    }
}

/// Result type for pipeline operations.
pub type CheckResult<T> = Result<T, CheckError>;
