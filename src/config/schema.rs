//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

use crate::routing::BasePath;

/// Prefix the catalog is served under in production.
pub const PRODUCTION_BASE_PATH: &str = "/front_6th_chapter1-1";

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Where and how the app is served.
    pub deployment: DeploymentConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Build/deployment mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployMode {
    /// Served under `base_path`.
    Production,
    /// Served directly from the origin root.
    #[default]
    Development,
}

/// Deployment configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DeploymentConfig {
    pub mode: DeployMode,

    /// Prefix applied in production mode.
    pub base_path: String,

    /// Origin URLs are resolved against (e.g., "http://localhost:5173").
    pub origin: String,

    /// Path the session starts on, relative to the origin.
    pub initial_path: String,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            mode: DeployMode::Development,
            base_path: PRODUCTION_BASE_PATH.to_string(),
            origin: "http://localhost".to_string(),
            initial_path: "/".to_string(),
        }
    }
}

impl DeploymentConfig {
    /// Base path in effect for the configured mode.
    pub fn effective_base(&self) -> BasePath {
        match self.mode {
            DeployMode::Production => BasePath::new(self.base_path.as_str()),
            DeployMode::Development => BasePath::default(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_base_by_mode() {
        let mut deployment = DeploymentConfig::default();
        assert_eq!(deployment.effective_base().as_str(), "");

        deployment.mode = DeployMode::Production;
        assert_eq!(deployment.effective_base().as_str(), PRODUCTION_BASE_PATH);
    }
}
