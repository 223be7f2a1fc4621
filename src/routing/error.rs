//! Routing error definitions.

use thiserror::Error;

use crate::history::HistoryError;

/// Errors raised while compiling a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Pattern string was empty.
    #[error("route pattern is empty")]
    Empty,

    /// Pattern must be an absolute path.
    #[error("route pattern {0:?} must start with '/'")]
    NotAbsolute(String),

    /// The same parameter name appears twice in one pattern.
    #[error("route pattern {pattern:?} declares parameter {name:?} more than once")]
    DuplicateParam { pattern: String, name: String },

    /// The generated expression was rejected by the regex engine.
    #[error("route pattern {pattern:?} failed to compile: {reason}")]
    Compile { pattern: String, reason: String },
}

/// Errors raised while navigating.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// The history backend refused the new entry.
    #[error("history update failed: {0}")]
    History(#[from] HistoryError),

    /// The target could not be resolved against the location origin.
    #[error("invalid navigation target {target:?}: {source}")]
    InvalidUrl {
        target: String,
        #[source]
        source: url::ParseError,
    },
}

/// Result type for navigation operations.
pub type NavigationResult<T> = Result<T, NavigationError>;
