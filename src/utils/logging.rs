//! Logging configuration and subscriber setup

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::{ChapcatError, ChapcatResult};

/// Log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Parse log level from string
    pub fn parse(level: &str) -> ChapcatResult<Self> {
        match level.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(ChapcatError::config(format!(
                "Invalid log level: {}. Valid levels: trace, debug, info, warn, error",
                level
            ))),
        }
    }

    fn as_filter(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format
    Pretty,
    /// Compact text format
    Compact,
    /// JSON format for structured logging
    Json,
}

impl LogFormat {
    pub fn parse(format: &str) -> ChapcatResult<Self> {
        match format.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            _ => Err(ChapcatError::config(format!(
                "Invalid log format: {}. Valid formats: pretty, compact, json",
                format
            ))),
        }
    }
}

/// Logging configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Global log level, used when `RUST_LOG` is unset
    pub level: LogLevel,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
        }
    }
}

/// Install the global tracing subscriber.
///
/// Logs go to stderr so that command output on stdout stays machine-readable.
/// Calling this twice is harmless; the second subscriber is discarded.
pub fn initialize(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_filter()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = match config.format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    if result.is_ok() {
        tracing::debug!(
            "Logging initialized with level {:?}, format {:?}",
            config.level,
            config.format
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::parse("warn").unwrap(), LogLevel::Warn);
        assert!(LogLevel::parse("loud").is_err());
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json").unwrap(), LogFormat::Json);
        assert!(LogFormat::parse("xml").is_err());
    }

    #[test]
    fn test_unknown_log_key_is_rejected() {
        assert!(toml::from_str::<LoggingConfig>("levle = \"debug\"").is_err());
        let config: LoggingConfig = toml::from_str("format = \"compact\"").unwrap();
        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(config.level, LogLevel::Info);
    }

    #[test]
    fn test_initialize_twice_does_not_panic() {
        initialize(&LoggingConfig::default());
        initialize(&LoggingConfig::default());
    }
}
