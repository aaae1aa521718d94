//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (mounts reference declared stores)
//! - Validate value ranges and address formats
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: RouterConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;
use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::RouterConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    InvalidBindAddress(String),

    #[error("observability.metrics_address `{0}` is not a socket address")]
    InvalidMetricsAddress(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("limits.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("{section} prefix `{prefix}` must start with `/`")]
    InvalidPrefix { section: &'static str, prefix: String },

    #[error("access rule for `{0}` has an empty api_key")]
    EmptyApiKey(String),

    #[error("store `{0}` is declared more than once")]
    DuplicateStore(String),

    #[error("mount `{prefix}` references undeclared store `{store}`")]
    UnknownStore { prefix: String, store: String },

    #[error("default store `{0}` is not declared")]
    UnknownDefaultStore(String),
}

/// Check a parsed configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    for rule in &config.access.rules {
        if !rule.prefix.starts_with('/') {
            errors.push(ValidationError::InvalidPrefix {
                section: "access",
                prefix: rule.prefix.clone(),
            });
        }
        if rule.api_key.is_empty() {
            errors.push(ValidationError::EmptyApiKey(rule.prefix.clone()));
        }
    }

    let mut declared = HashSet::new();
    for name in &config.stores.names {
        if !declared.insert(name.as_str()) {
            errors.push(ValidationError::DuplicateStore(name.clone()));
        }
    }
    if let Some(default) = &config.stores.default {
        if !declared.contains(default.as_str()) {
            errors.push(ValidationError::UnknownDefaultStore(default.clone()));
        }
    }
    for mount in &config.stores.mounts {
        if !mount.prefix.starts_with('/') {
            errors.push(ValidationError::InvalidPrefix {
                section: "stores",
                prefix: mount.prefix.clone(),
            });
        }
        if !declared.contains(mount.store.as_str()) {
            errors.push(ValidationError::UnknownStore {
                prefix: mount.prefix.clone(),
                store: mount.store.clone(),
            });
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
    use crate::config::schema::{AccessRule, StoreMount};

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&RouterConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = RouterConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.timeouts.request_secs = 0;
        config.access.rules.push(AccessRule {
            prefix: "admin".into(),
            api_key: String::new(),
        });
        config.stores.mounts.push(StoreMount {
            prefix: "/archive".into(),
            store: "archive".into(),
        });

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidBindAddress("nowhere".into()),
                ValidationError::ZeroTimeout,
                ValidationError::InvalidPrefix {
                    section: "access",
                    prefix: "admin".into()
                },
                ValidationError::EmptyApiKey("admin".into()),
                ValidationError::UnknownStore {
                    prefix: "/archive".into(),
                    store: "archive".into()
                },
            ]
        );
    }

    #[test]
    fn test_store_declarations() {
        let mut config = RouterConfig::default();
        config.stores.names = vec!["a".into(), "a".into()];
        config.stores.default = Some("b".into());

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::DuplicateStore("a".into())));
        assert!(errors.contains(&ValidationError::UnknownDefaultStore("b".into())));
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = RouterConfig::default();
        config.observability.metrics_address = "bad".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::InvalidMetricsAddress("bad".into())]
        );
    }
}
