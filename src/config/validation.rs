//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Base path shape, origin URL, log level
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: &RouterConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;
use url::Url;

use crate::config::schema::RouterConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let deployment = &config.deployment;

    let base = deployment.base_path.as_str();
    if !base.is_empty() {
        if !base.starts_with('/') {
            errors.push(ValidationError::new("deployment.base_path", "must start with '/'"));
        }
        if base.len() > 1 && base.ends_with('/') {
            errors.push(ValidationError::new("deployment.base_path", "must not end with '/'"));
        }
        if base.contains(['?', '#']) {
            errors.push(ValidationError::new("deployment.base_path", "must not contain '?' or '#'"));
        }
    }

    match Url::parse(&deployment.origin) {
        Ok(url) if url.has_host() => {}
        Ok(_) => errors.push(ValidationError::new("deployment.origin", "must include a host")),
        Err(e) => errors.push(ValidationError::new("deployment.origin", e.to_string())),
    }

    if !deployment.initial_path.starts_with('/') {
        errors.push(ValidationError::new("deployment.initial_path", "must start with '/'"));
    }

    let level = config.observability.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level {:?}", config.observability.log_level),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
