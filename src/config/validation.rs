//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, attempts > 0)
//! - Check the RPC URL is an http(s) endpoint
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>

use std::fmt;

use crate::config::schema::ClientConfig;

/// Nodes reject transactions valid for more than this many blocks ahead.
pub const MAX_VALID_UNTIL_BLOCK_OFFSET: u64 = 100;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with the configuration.
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

/// Validate a parsed configuration, collecting every error.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match url::Url::parse(&config.rpc.url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::new(
            "rpc.url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new("rpc.url", e.to_string())),
    }

    if config.rpc.timeout_secs == 0 {
        errors.push(ValidationError::new("rpc.timeout_secs", "must be greater than 0"));
    }

    let offset = config.chain.valid_until_block_offset;
    if offset == 0 || offset > MAX_VALID_UNTIL_BLOCK_OFFSET {
        errors.push(ValidationError::new(
            "chain.valid_until_block_offset",
            format!("must be in 1..={}", MAX_VALID_UNTIL_BLOCK_OFFSET),
        ));
    }

    if config.confirmation.max_attempts == 0 {
        errors.push(ValidationError::new(
            "confirmation.max_attempts",
            "must be greater than 0",
        ));
    }

    if config.runtime.worker_threads == 0 {
        errors.push(ValidationError::new(
            "runtime.worker_threads",
            "must be greater than 0",
        ));
    }

    let level = config.observability.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", config.observability.log_level),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ClientConfig::default();
        config.rpc.url = "ws://node:1337".to_string();
        config.rpc.timeout_secs = 0;
        config.confirmation.max_attempts = 0;
        config.chain.valid_until_block_offset = 101;
        config.observability.log_level = "loud".to_string();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "rpc.url",
                "rpc.timeout_secs",
                "chain.valid_until_block_offset",
                "confirmation.max_attempts",
                "observability.log_level",
            ]
        );
    }
}
