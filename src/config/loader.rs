//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::SolanaDemoConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `rpc.url`.
pub const RPC_URL_ENV_VAR: &str = "SOLANA_RPC_URL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

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

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<SolanaDemoConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config = parse_config(&content)?;
    apply_env_overrides(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load from `path` when given, otherwise start from defaults.
///
/// Environment overrides and validation apply either way.
pub fn load_or_default(path: Option<&Path>) -> Result<SolanaDemoConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let mut config = SolanaDemoConfig::default();
            apply_env_overrides(&mut config);
            validate_config(&config).map_err(ConfigError::Validation)?;
            Ok(config)
        }
    }
}

/// Parse TOML without touching the environment.
pub fn parse_config(content: &str) -> Result<SolanaDemoConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Apply process environment overrides. Read once at startup.
pub fn apply_env_overrides(config: &mut SolanaDemoConfig) {
    apply_overrides_from(config, |key| std::env::var(key).ok());
}

fn apply_overrides_from<F>(config: &mut SolanaDemoConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(RPC_URL_ENV_VAR).filter(|v| !v.trim().is_empty()) {
        tracing::debug!(env = RPC_URL_ENV_VAR, "RPC URL overridden from environment");
        config.rpc.url = url;
    }
}
