//! Route pattern compilation.
//!
//! # Responsibilities
//! - Turn `/products/:id` into an anchored matcher
//! - Record parameter names in declaration order
//! - Extract raw segment values on match
//!
//! # Design Decisions
//! - Compiled once at registration, immutable afterwards
//! - A parameter captures one segment (`[^/]+`); literals are escaped
//! - The base path is folded into the expression, so matching runs on full
//!   pathnames
//! - A `:` not followed by an identifier stays a literal character

use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::routing::base::BasePath;
use crate::routing::error::PatternError;

/// Parameter values extracted from a path, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// A compiled route pattern.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    source: String,
    regex: Regex,
    param_names: Vec<String>,
}

impl RoutePattern {
    /// Compile `pattern` for paths served under `base`.
    pub fn compile(pattern: &str, base: &BasePath) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }
        if !pattern.starts_with('/') {
            return Err(PatternError::NotAbsolute(pattern.to_string()));
        }

        let mut param_names: Vec<String> = Vec::new();
        let mut expr = String::with_capacity(pattern.len() * 2 + base.as_str().len() + 2);
        expr.push('^');
        expr.push_str(&regex::escape(base.as_str()));

        let mut literal = String::new();
        let mut chars = pattern.char_indices().peekable();
        while let Some((offset, ch)) = chars.next() {
            if ch != ':' {
                literal.push(ch);
                continue;
            }

            let start = offset + 1;
            let mut end = start;
            while let Some(&(i, c)) = chars.peek() {
                if !is_ident_char(c) {
                    break;
                }
                end = i + c.len_utf8();
                chars.next();
            }

            if end == start {
                literal.push(':');
                continue;
            }

            let name = &pattern[start..end];
            if param_names.iter().any(|n| n == name) {
                return Err(PatternError::DuplicateParam {
                    pattern: pattern.to_string(),
                    name: name.to_string(),
                });
            }
            param_names.push(name.to_string());

            expr.push_str(&regex::escape(&literal));
            literal.clear();
            expr.push_str("([^/]+)");
        }
        expr.push_str(&regex::escape(&literal));
        expr.push('$');

        let regex = Regex::new(&expr).map_err(|e| PatternError::Compile {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        tracing::trace!(pattern = %pattern, regex = %regex, params = ?param_names, "Compiled route pattern");

        Ok(Self {
            source: pattern.to_string(),
            regex,
            param_names,
        })
    }

    /// The pattern as registered.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Match a full pathname, returning the extracted parameters.
    pub fn matches(&self, pathname: &str) -> Option<Params> {
        let caps = self.regex.captures(pathname)?;
        Some(
            self.param_names
                .iter()
                .enumerate()
                .filter_map(|(i, name)| {
                    caps.get(i + 1).map(|m| (name.clone(), m.as_str().to_string()))
                })
                .collect(),
        )
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
