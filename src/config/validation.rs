//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts and intervals > 0)
//! - Check the RPC URL parses and uses an HTTP scheme
//!
//! Returns all validation errors, not just the first.

use std::fmt;

use crate::config::schema::MintClientConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    /// What is wrong with it.
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

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a parsed configuration.
pub fn validate_config(config: &MintClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match url::Url::parse(&config.rpc.rpc_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            "rpc.rpc_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new("rpc.rpc_url", e.to_string())),
    }

    if config.rpc.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("rpc.rpc_timeout_secs", "must be > 0"));
    }
    if config.rpc.inclusion_timeout_secs == 0 {
        errors.push(ValidationError::new("rpc.inclusion_timeout_secs", "must be > 0"));
    }
    if config.rpc.receipt_poll_ms == 0 {
        errors.push(ValidationError::new("rpc.receipt_poll_ms", "must be > 0"));
    }
    if config.events.poll_interval_ms == 0 {
        errors.push(ValidationError::new("events.poll_interval_ms", "must be > 0"));
    }
    if config.events.buffer_size == 0 {
        errors.push(ValidationError::new("events.buffer_size", "must be > 0"));
    }
    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
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
        assert!(validate_config(&MintClientConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = MintClientConfig::default();
        config.rpc.rpc_url = "ws://localhost:8546".to_string();
        config.rpc.receipt_poll_ms = 0;
        config.observability.log_level = "loud".to_string();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["rpc.rpc_url", "rpc.receipt_poll_ms", "observability.log_level"]
        );
    }

    #[test]
    fn test_zero_event_settings() {
        let mut config = MintClientConfig::default();
        config.events.poll_interval_ms = 0;
        config.events.buffer_size = 0;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["events.poll_interval_ms", "events.buffer_size"]);
    }
}
