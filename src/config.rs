// src/config.rs

use std::net::SocketAddr;
use thiserror::Error;

pub const BIND_VAR: &str = "HELLO_INSPECTOR_BIND";
pub const MAX_BODY_VAR: &str = "HELLO_INSPECTOR_MAX_BODY_BYTES";
pub const LOG_FILTER_VAR: &str = "RUST_LOG";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    InvalidBind { var: &'static str, value: String },
    #[error("{var} must be a positive byte count, got {value}")]
    InvalidBodyLimit { var: &'static str, value: String },
}

/// Service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Address the HTTP listener binds to
    pub bind: SocketAddr,
    /// Largest accepted request body in bytes
    pub max_body_bytes: usize,
    /// tracing filter directive
    pub log_filter: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            max_body_bytes: 1024 * 1024,
            log_filter: "info".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Load from the process environment after reading any `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unset variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(BIND_VAR) {
            config.bind = value.trim().parse().map_err(|_| ConfigError::InvalidBind {
                var: BIND_VAR,
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup(MAX_BODY_VAR) {
            config.max_body_bytes = match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidBodyLimit {
                        var: MAX_BODY_VAR,
                        value,
                    });
                }
            };
        }

        if let Some(value) = lookup(LOG_FILTER_VAR) {
            if !value.trim().is_empty() {
                config.log_filter = value;
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServiceConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.bind.to_string(), "127.0.0.1:8080");
        assert_eq!(config.max_body_bytes, 1_048_576);
    }

    #[test]
    fn overrides_apply() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            (BIND_VAR, "0.0.0.0:9000"),
            (MAX_BODY_VAR, "4096"),
            (LOG_FILTER_VAR, "hello_inspector=debug"),
        ]))
        .unwrap();
        assert_eq!(config.bind.port(), 9000);
        assert_eq!(config.max_body_bytes, 4096);
        assert_eq!(config.log_filter, "hello_inspector=debug");
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(matches!(
            ServiceConfig::from_lookup(lookup_from(&[(BIND_VAR, "localhost")])),
            Err(ConfigError::InvalidBind { .. })
        ));
        assert!(matches!(
            ServiceConfig::from_lookup(lookup_from(&[(MAX_BODY_VAR, "0")])),
            Err(ConfigError::InvalidBodyLimit { .. })
        ));
        assert!(matches!(
            ServiceConfig::from_lookup(lookup_from(&[(MAX_BODY_VAR, "lots")])),
            Err(ConfigError::InvalidBodyLimit { .. })
        ));
    }
}
