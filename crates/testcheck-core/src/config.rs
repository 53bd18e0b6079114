//! Invocation parameters.

use std::path::PathBuf;

use crate::error::{CheckError, CheckResult};
use crate::paths::RootPrefix;

/// Default extension of report files in the artifact directory.
pub const DEFAULT_EXTENSION: &str = "json";

/// Parameters for one check invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    /// Directory holding the report files.
    pub artifact_dir: PathBuf,

    /// Name of the check run.
    pub check_name: String,

    /// Token for the check API. Only needed when publishing.
    pub token: Option<String>,

    /// Report file extension, without the leading dot.
    pub extension: String,

    /// Build-root prefix stripped from reported paths.
    pub root_prefix: RootPrefix,
}

impl CheckConfig {
    pub fn new(artifact_dir: impl Into<PathBuf>, check_name: impl Into<String>) -> Self {
        Self {
            artifact_dir: artifact_dir.into(),
            check_name: check_name.into(),
            token: None,
            extension: DEFAULT_EXTENSION.to_string(),
            root_prefix: RootPrefix::none(),
        }
    }

    /// Set the token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the report extension. A leading dot is accepted.
    pub fn with_extension(mut self, extension: impl AsRef<str>) -> Self {
        self.extension = extension.as_ref().trim_start_matches('.').to_string();
        self
    }

    pub fn with_root_prefix(mut self, root_prefix: RootPrefix) -> Self {
        self.root_prefix = root_prefix;
        self
    }

    /// Check that every required parameter is present, reporting all missing
    /// ones at once.
    pub fn validate(&self, require_token: bool) -> CheckResult<()> {
        let mut missing = Vec::new();

        if self.artifact_dir.as_os_str().is_empty() {
            missing.push("artifact path".to_string());
        } else if !self.artifact_dir.is_dir() {
            missing.push(format!(
                "artifact path ({} does not exist)",
                self.artifact_dir.display()
            ));
        }

        let has_token = matches!(self.token.as_deref(), Some(t) if !t.trim().is_empty());
        if require_token && !has_token {
            missing.push("token".to_string());
        }

        if self.check_name.trim().is_empty() {
            missing.push("check name".to_string());
        }

        if self.extension.is_empty() {
            missing.push("report extension".to_string());
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(CheckError::Configuration { missing })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_config_passes() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = CheckConfig::new(dir.path(), "tests").with_token("t");
        assert!(cfg.validate(true).is_ok());
    }

    #[test]
    fn token_only_required_when_publishing() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = CheckConfig::new(dir.path(), "tests");
        assert!(cfg.validate(false).is_ok());
        assert!(cfg.validate(true).is_err());
    }

    #[test]
    fn every_missing_field_is_reported() {
        let cfg = CheckConfig::new("/no/such/dir", " ").with_token("");
        let err = cfg.validate(true).unwrap_err();
        match err {
            CheckError::Configuration { missing } => {
                assert_eq!(missing.len(), 3);
                assert!(missing[0].starts_with("artifact path"));
                assert_eq!(missing[1], "token");
                assert_eq!(missing[2], "check name");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn extension_dot_is_stripped() {
        let cfg = CheckConfig::new("a", "b").with_extension(".trx");
        assert_eq!(cfg.extension, "trx");
    }
}
