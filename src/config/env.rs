//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "GATEWAY_SANITY";

/// Environment configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Timeout from GATEWAY_SANITY_TIMEOUT
    pub timeout: Option<u64>,
    /// Insecure from GATEWAY_SANITY_INSECURE
    pub insecure: Option<bool>,
    /// Config file from GATEWAY_SANITY_CONFIG
    pub config_file: Option<String>,
    /// Log level from GATEWAY_SANITY_LOG_LEVEL
    pub log_level: Option<String>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(&format!("{ENV_PREFIX}_{name}"));

        Self {
            timeout: get("TIMEOUT").and_then(|v| v.parse().ok()),
            insecure: get("INSECURE").map(|v| parse_bool(&v)),
            config_file: get("CONFIG"),
            log_level: get("LOG_LEVEL"),
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "1" | "true" | "yes" | "on" | "enabled"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_env_config_default() {
        let config = EnvConfig::from_lookup(lookup(&[]));
        assert!(config.timeout.is_none());
        assert!(config.insecure.is_none());
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_env_config_values() {
        let config = EnvConfig::from_lookup(lookup(&[
            ("GATEWAY_SANITY_TIMEOUT", "60"),
            ("GATEWAY_SANITY_INSECURE", "yes"),
            ("GATEWAY_SANITY_CONFIG", "/etc/sanity.yaml"),
            ("GATEWAY_SANITY_LOG_LEVEL", "debug"),
        ]));

        assert_eq!(config.timeout, Some(60));
        assert_eq!(config.insecure, Some(true));
        assert_eq!(config.config_file.as_deref(), Some("/etc/sanity.yaml"));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_unparseable_timeout_is_ignored() {
        let config = EnvConfig::from_lookup(lookup(&[("GATEWAY_SANITY_TIMEOUT", "soon")]));
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_env_bool_parsing() {
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("1"));
        assert!(!parse_bool("off"));
    }
}
