//! Configuration module
//!
//! Settings come from an optional config file, then `GATEWAY_SANITY_*`
//! environment variables, then command-line flags, each layer overriding
//! the one before.

mod env;

pub use env::EnvConfig;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::http::DEFAULT_TIMEOUT_SECS;

/// Application configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP timeout in seconds
    pub timeout_secs: u64,

    /// Accept an untrusted gateway server certificate
    pub insecure: bool,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            insecure: false,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Self = if path
            .extension()
            .map(|e| e == "yaml" || e == "yml")
            .unwrap_or(false)
        {
            serde_yaml::from_str(&content).context("Failed to parse YAML config")?
        } else {
            serde_json::from_str(&content).context("Failed to parse JSON config")?
        };

        Ok(config)
    }

    /// Apply environment overrides
    pub fn apply_env(mut self, env: &EnvConfig) -> Self {
        if let Some(timeout) = env.timeout {
            self.timeout_secs = timeout;
        }
        if let Some(insecure) = env.insecure {
            self.insecure = insecure;
        }
        if let Some(level) = &env.log_level {
            self.log_level = level.clone();
        }
        self
    }

    /// Apply command-line overrides; `insecure` can only be switched on
    pub fn apply_flags(mut self, timeout: Option<u64>, insecure: bool) -> Self {
        if let Some(timeout) = timeout {
            self.timeout_secs = timeout;
        }
        if insecure {
            self.insecure = true;
        }
        self
    }
}
