//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! router.toml
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → Router::from_config (base path for the deployment mode)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so an empty file is a valid config
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{DeployMode, DeploymentConfig, ObservabilityConfig, RouterConfig};
pub use validation::{validate_config, ValidationError};
