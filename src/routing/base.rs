//! Deployment base path handling.
//!
//! The same prefix is stripped when deriving the app-relative path, prepended
//! when building navigation targets, and folded into every compiled pattern.

/// Deployment prefix such as `/front_6th_chapter1-1`, or empty when served
/// from the origin root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasePath(String);

impl BasePath {
    /// Build a base path. A trailing `/` is dropped, so `/` means "no prefix".
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let trimmed = prefix.trim_end_matches('/');
        if trimmed.is_empty() {
            return Self::default();
        }
        if trimmed.starts_with('/') {
            Self(trimmed.to_string())
        } else {
            Self(format!("/{trimmed}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when `path` starts with the prefix on a segment boundary.
    ///
    /// `/app` is a prefix of `/app`, `/app/x` and `/app?q=1`, never of `/apple`.
    pub fn is_prefix_of(&self, path: &str) -> bool {
        if self.is_empty() {
            return true;
        }
        match path.strip_prefix(self.0.as_str()) {
            Some(rest) => {
                rest.is_empty() || rest.starts_with('/') || rest.starts_with('?') || rest.starts_with('#')
            }
            None => false,
        }
    }

    /// App-relative path: the prefix is removed and an empty rest becomes `/`.
    /// Paths outside the prefix are returned unchanged.
    pub fn strip(&self, full_path: &str) -> String {
        if !self.is_prefix_of(full_path) {
            return full_path.to_string();
        }
        let rest = &full_path[self.0.len()..];
        if rest.is_empty() {
            "/".to_string()
        } else {
            rest.to_string()
        }
    }

    /// Navigation target with the prefix present exactly once and a leading `/`.
    pub fn prepend(&self, target: &str) -> String {
        if !self.is_empty() && self.is_prefix_of(target) {
            return target.to_string();
        }
        let rooted = if target.starts_with('/') {
            target.to_string()
        } else {
            format!("/{target}")
        };
        format!("{}{}", self.0, rooted)
    }
}

impl std::fmt::Display for BasePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
