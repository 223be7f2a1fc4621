//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing / history / catalog produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (navigation counters)
//!
//! Consumers:
//!     → stdout via tracing-subscriber fmt layer
//!     → whatever `metrics` recorder the host installs
//! ```
//!
//! # Design Decisions
//! - Log level from config, overridable with RUST_LOG
//! - Metrics go through the `metrics` facade; without a recorder they are no-ops

pub mod logging;
pub mod metrics;
