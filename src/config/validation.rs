//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (port, body limit)
//! - Reject alias tables that could never resolve a field
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.port must not be 0")]
    ZeroPort,

    #[error("listener.host must not be empty")]
    EmptyHost,

    #[error("alias list `{0}` must contain at least one key")]
    EmptyAliasList(&'static str),

    #[error("alias list `{list}` contains an empty key")]
    BlankAlias { list: &'static str },

    #[error("limits.max_body_bytes must be greater than 0")]
    ZeroBodyLimit,
}

/// Validate a parsed configuration, collecting every error found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }
    if config.listener.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }
    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    let sipgate = &config.aliases.sipgate;
    let whatsapp = &config.aliases.whatsapp;
    let lists: [(&'static str, &[String]); 5] = [
        ("aliases.sipgate.from", &sipgate.from),
        ("aliases.sipgate.to", &sipgate.to),
        ("aliases.sipgate.direction", &sipgate.direction),
        ("aliases.whatsapp.from", &whatsapp.from),
        ("aliases.whatsapp.message", &whatsapp.message),
    ];

    for (name, keys) in lists {
        if keys.is_empty() {
            errors.push(ValidationError::EmptyAliasList(name));
        } else if keys.iter().any(|k| k.is_empty()) {
            errors.push(ValidationError::BlankAlias { list: name });
        }
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
        assert!(validate_config(&ServiceConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ServiceConfig::default();
        config.listener.port = 0;
        config.limits.max_body_bytes = 0;
        config.aliases.whatsapp.message.clear();
        config.aliases.sipgate.to = vec!["to".into(), String::new()];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::ZeroPort,
                ValidationError::ZeroBodyLimit,
                ValidationError::BlankAlias { list: "aliases.sipgate.to" },
                ValidationError::EmptyAliasList("aliases.whatsapp.message"),
            ]
        );
    }
}
