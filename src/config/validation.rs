//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate endpoint URLs and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SolanaDemoConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use crate::config::schema::SolanaDemoConfig;

/// Largest page the DAS `getAssetsByOwner` method accepts.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
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

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &SolanaDemoConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url(&mut errors, "rpc.url", &config.rpc.url);
    if let Some(url) = &config.indexer.url {
        check_url(&mut errors, "indexer.url", url);
    }
    check_url(&mut errors, "prices.base_url", &config.prices.base_url);

    check_timeout(&mut errors, "rpc.timeout_secs", config.rpc.timeout_secs);
    check_timeout(&mut errors, "indexer.timeout_secs", config.indexer.timeout_secs);
    check_timeout(&mut errors, "prices.timeout_secs", config.prices.timeout_secs);

    if config.indexer.page_size == 0 || config.indexer.page_size > MAX_PAGE_SIZE {
        errors.push(ValidationError::new(
            "indexer.page_size",
            format!("must be between 1 and {}", MAX_PAGE_SIZE),
        ));
    }

    if config.prices.chain_id.trim().is_empty() {
        errors.push(ValidationError::new("prices.chain_id", "must not be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &'static str, raw: &str) {
    match url::Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            field,
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(field, format!("invalid URL '{}': {}", raw, e))),
    }
}

fn check_timeout(errors: &mut Vec<ValidationError>, field: &'static str, secs: u64) {
    if secs == 0 {
        errors.push(ValidationError::new(field, "must be greater than zero"));
    }
}
