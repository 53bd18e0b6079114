//! Error types for the check publisher.

/// Publish errors. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Token rejected by the API.
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// API answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Request could not be sent or the response could not be read.
    #[error("network error: {message}")]
    Network { message: String },

    /// Response body was not what the API documents.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    /// Repository or commit could not be determined from the environment.
    #[error("invalid GitHub context: {message}")]
    Context { message: String },
}

impl PublishError {
    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Context { .. } => 2,
            Self::Unauthorized { .. }
            | Self::Http { .. }
            | Self::Network { .. }
            | Self::InvalidResponse { .. } => 3,
        }
    }
}

impl From<reqwest::Error> for PublishError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

/// Result type for publish operations.
pub type PublishResult<T> = Result<T, PublishError>;
