//! Shopping catalog application wired onto the router.
//!
//! # Data Flow
//! ```text
//! CatalogApp::new
//!     → add_route("/", Home) / add_route("/products/:id", Detail)
//!     → subscribe(render)
//!
//! route change → render
//!     → target page: component(None) (loading)
//!     → spawn_local(load_data(params, query))
//!     → generation unchanged? component(Some(data)) : discard
//! ```
//!
//! # Design Decisions
//! - Pages are the router's opaque handlers; the router never inspects them
//! - Data loading runs on a tokio `LocalSet`, outside the router
//! - Results of superseded navigations are dropped via the router generation

pub mod app;
pub mod pages;
pub mod products;

use thiserror::Error;

pub use app::{CatalogApp, RouteSummary, Screen, Step};
pub use pages::{Page, PageData};
pub use products::{Product, ProductStore};

/// Errors raised by page data loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("product {0} not found")]
    NotFound(String),

    #[error("invalid query parameter {key}={value:?}")]
    InvalidQuery { key: String, value: String },
}
