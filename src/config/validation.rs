//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check header names are valid HTTP header names
//! - Check the log level is one `tracing` understands
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MetaConfig → Result<(), Vec<ValidationError>>

use axum::http::HeaderName;
use thiserror::Error;

use crate::config::schema::MetaConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("client_ip.headers[{index}]: invalid header name {name:?}")]
    InvalidHeaderName { index: usize, name: String },

    #[error("client_ip.headers must not be empty when trust_headers is set")]
    NoHeaders,

    #[error("logging.level: unknown level {0:?}")]
    UnknownLogLevel(String),
}

/// Check a log level name, case-insensitively.
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    if LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        Ok(())
    } else {
        Err(ValidationError::UnknownLogLevel(level.to_string()))
    }
}

/// Validate a parsed configuration, collecting every error.
pub fn validate_config(config: &MetaConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let client_ip = &config.client_ip;
    if client_ip.trust_headers && client_ip.headers.is_empty() {
        errors.push(ValidationError::NoHeaders);
    }
    for (index, name) in client_ip.headers.iter().enumerate() {
        if HeaderName::from_bytes(name.as_bytes()).is_err() {
            errors.push(ValidationError::InvalidHeaderName {
                index,
                name: name.clone(),
            });
        }
    }

    if let Err(e) = validate_log_level(&config.logging.level) {
        errors.push(e);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
