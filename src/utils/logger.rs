//! Logging utilities
//!
//! Logs go to stderr so stdout stays free for the run summary. The level
//! comes from `--verbose` first, then the `log_level` config value.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Log level for the sanity run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    /// Only failed probes and fatal errors
    Error,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "debug" | "trace" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" | "quiet" => Some(LogLevel::Error),
            _ => None,
        }
    }

    /// `--verbose` wins; an unrecognised config value falls back to info
    pub fn resolve(verbose: bool, configured: &str) -> Self {
        if verbose {
            LogLevel::Debug
        } else {
            LogLevel::from_str(configured).unwrap_or(LogLevel::Info)
        }
    }

    /// Filter directive limited to this crate, so reqwest/hyper stay silent
    pub fn directive(self) -> String {
        format!("gateway_sanity={}", self.to_tracing_level())
    }
}

/// Initialize the logger with specified level
pub fn init_logger(level: LogLevel) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level.directive()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
