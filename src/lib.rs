//! Client-side router for a single-page shopping catalog

pub mod catalog;
pub mod config;
pub mod history;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use history::{History, MemoryHistory};
pub use routing::Router;
