//! Browser history integration boundary.
//!
//! # Data Flow
//! ```text
//! Router::push
//!     → History::location (compare current path + query)
//!     → History::push_state (new entry, no reload)
//!
//! back / forward (user or MemoryHistory::go)
//!     → location already changed
//!     → pop-state listeners fire
//!     → Router::on_pop_state
//! ```
//!
//! # Design Decisions
//! - The router never touches a concrete browser API; it only sees this trait
//! - Listeners are zero-argument callbacks, matching the DOM `popstate` shape
//! - Everything is single-threaded (`Rc`, no `Send` bounds)

pub mod memory;

use std::rc::Rc;

use thiserror::Error;

pub use memory::MemoryHistory;

/// Callback fired after the location changed through back/forward navigation.
pub type PopStateListener = Rc<dyn Fn()>;

/// Snapshot of the addressable location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Scheme, host and port, e.g. `http://localhost:5173`.
    pub origin: String,
    /// Percent-encoded path, always starting with `/`.
    pub pathname: String,
    /// Query string including the leading `?`, or empty.
    pub search: String,
}

impl Location {
    /// `pathname` followed by `search`, the form compared on navigation.
    pub fn path_and_query(&self) -> String {
        format!("{}{}", self.pathname, self.search)
    }
}

/// Errors reported by a history backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// The URL could not be resolved against the current entry.
    #[error("invalid history url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Entries may only be pushed within the current origin.
    #[error("refusing to push {url:?}: origin differs from {origin}")]
    CrossOrigin { url: String, origin: String },

    /// Backend-specific refusal (quota, security policy, detached document).
    #[error("history backend rejected {url:?}: {reason}")]
    Rejected { url: String, reason: String },
}

/// Location provider, history mutator and pop-state source in one seam.
pub trait History {
    /// Current location.
    fn location(&self) -> Location;

    /// Append a navigation entry without reloading.
    fn push_state(&self, url: &str) -> Result<(), HistoryError>;

    /// Register a back/forward listener.
    fn add_pop_state_listener(&self, listener: PopStateListener);
}
