//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<RouterConfig, ConfigError> {
    let config: RouterConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&content)?;
    tracing::info!(path = %path.display(), mode = ?config.deployment.mode, "Configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::DeployMode;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [deployment]
            mode = "production"
            base_path = "/shop"
            origin = "http://localhost:5173"

            [observability]
            log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.deployment.mode, DeployMode::Production);
        assert_eq!(config.deployment.effective_base().as_str(), "/shop");
        assert_eq!(config.deployment.initial_path, "/");
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.deployment.mode, DeployMode::Development);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_unknown_mode_is_parse_error() {
        let err = parse_config("[deployment]\nmode = \"staging\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_values_are_validation_error() {
        let err = parse_config("[deployment]\norigin = \"nowhere\"\n").unwrap_err();
        match err {
            ConfigError::Validation(errors) => assert_eq!(errors[0].field, "deployment.origin"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_config_from_file() {
        let path = std::env::temp_dir().join(format!("catalog-router-{}.toml", std::process::id()));
        fs::write(&path, "[deployment]\nmode = \"production\"\n").unwrap();

        let config = load_config(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(
            config.deployment.effective_base().as_str(),
            crate::config::schema::PRODUCTION_BASE_PATH
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
