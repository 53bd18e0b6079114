//! Workspace path normalization.
//!
//! Test runners report absolute paths rooted at the build workspace (for
//! example `/home/runner/work/repo/repo/src/lib.rs`). Annotations and rendered
//! reports need paths relative to the repository root instead.

use serde::{Deserialize, Serialize};

/// Absolute build-root prefix stripped from reported paths.
///
/// An empty prefix disables stripping; separators are still normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootPrefix(String);

impl RootPrefix {
    /// Relative prefixes are anchored at `/` so that a stripped path can never
    /// match the prefix again.
    pub fn new(prefix: impl AsRef<str>) -> Self {
        let mut p = to_forward_slashes(prefix.as_ref().trim());
        while p.len() > 1 && p.ends_with('/') {
            p.pop();
        }
        if p.is_empty() || p == "/" {
            return Self::default();
        }
        if !is_absolute(&p) {
            p.insert(0, '/');
        }
        Self(p)
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Normalize `path` against this prefix. Idempotent.
    pub fn normalize(&self, path: &str) -> String {
        let path = to_forward_slashes(path);
        if self.0.is_empty() {
            return path;
        }
        match path.strip_prefix(self.0.as_str()) {
            Some(rest) if rest.is_empty() => String::new(),
            Some(rest) if rest.starts_with('/') => rest.trim_start_matches('/').to_string(),
            _ => path,
        }
    }

    /// Normalize workspace paths embedded in free text such as a failure
    /// message or stack trace.
    ///
    /// Only whitespace-delimited tokens that start with this prefix followed
    /// by a separator are rewritten (after a leading quote or bracket); all
    /// other text, separators included, is kept byte for byte.
    pub fn normalize_in_text(&self, text: &str) -> String {
        if self.0.is_empty() {
            return text.to_string();
        }
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(start) = rest.find(|c: char| !c.is_whitespace()) {
            out.push_str(&rest[..start]);
            rest = &rest[start..];
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            self.push_token(&mut out, &rest[..end]);
            rest = &rest[end..];
        }
        out.push_str(rest);
        out
    }

    fn push_token(&self, out: &mut String, token: &str) {
        let lead = token
            .find(|c: char| !TOKEN_OPENERS.contains(&c))
            .unwrap_or(token.len());
        let (opener, candidate) = token.split_at(lead);
        if self.is_under(candidate) {
            out.push_str(opener);
            out.push_str(&self.normalize(candidate));
        } else {
            out.push_str(token);
        }
    }

    /// `path` lies strictly below the prefix.
    fn is_under(&self, path: &str) -> bool {
        to_forward_slashes(path)
            .strip_prefix(self.0.as_str())
            .is_some_and(|rest| rest.len() > 1 && rest.starts_with('/'))
    }
}

/// Characters that may precede a path inside a message token.
const TOKEN_OPENERS: &[char] = &['(', '[', '<', '"', '\'', '`', '='];

fn to_forward_slashes(s: &str) -> String {
    s.replace('\\', "/")
}

fn is_absolute(p: &str) -> bool {
    if p.starts_with('/') {
        return true;
    }
    let bytes = p.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
