//! Client-side routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     add_route(pattern, handler)
//!     → pattern.rs (compile to anchored matcher)
//!     → table.rs (append; first registration wins)
//!
//! Navigation:
//!     push(url) / pop-state / start()
//!     → router.rs (history entry, lookup)
//!     → table.rs (first full match or None)
//!     → active route updated
//!     → subscribers.rs (notify in order)
//!
//! Query state:
//!     query.rs (parse / stringify / merge, pure)
//! ```
//!
//! # Design Decisions
//! - Routes compiled once at registration, immutable afterwards
//! - Deterministic: same path always matches the same route
//! - First match wins (registration order)
//! - No match is a value (`None`), not an error

pub mod base;
pub mod error;
pub mod pattern;
pub mod query;
pub mod router;
pub mod subscribers;
pub mod table;

pub use base::BasePath;
pub use error::{NavigationError, NavigationResult, PatternError};
pub use pattern::{Params, RoutePattern};
pub use query::{get_url, parse_query, stringify_query, Query, QueryValue};
pub use router::{Navigation, NavigationKind, Router};
pub use subscribers::{NotifyReport, SubscriberError, SubscriberResult};
pub use table::RouteMatch;
