//! Structured logging setup using tracing
//!
//! Events go to standard error so command output on standard output stays
//! machine-readable.

use crate::domain::{FactoryError, Result};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Logging output options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
}

/// Initialize the global subscriber
///
/// `RUST_LOG` takes precedence over `log_level_str` when it is set.
///
/// # Errors
///
/// Returns [`FactoryError::Configuration`] if the level is not one of trace,
/// debug, info, warn or error, or if a global subscriber is already installed.
///
/// # Example
///
/// ```no_run
/// use obfuscation_markers::logging::{init_logging, LoggingConfig};
///
/// init_logging("debug", &LoggingConfig { json: true }).expect("Failed to initialize logging");
/// tracing::info!("Application started");
/// ```
pub fn init_logging(log_level_str: &str, config: &LoggingConfig) -> Result<()> {
    let log_level = parse_log_level(log_level_str)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(log_level)));

    let layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|e| FactoryError::Configuration(format!("Failed to initialize logging: {}", e)))?;

    tracing::debug!(level = %log_level, json = config.json, "Logging initialized");
    Ok(())
}

fn default_directive(level: Level) -> String {
    format!("obfuscation_markers={}", level)
}

/// Parse log level from string
fn parse_log_level(level_str: &str) -> Result<Level> {
    match level_str.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(FactoryError::Configuration(format!(
            "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
            level_str
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level_valid() {
        assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
        assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
        assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
        assert_eq!(parse_log_level("warn").unwrap(), Level::WARN);
        assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);
    }

    #[test]
    fn test_parse_log_level_case_insensitive() {
        assert_eq!(parse_log_level("TRACE").unwrap(), Level::TRACE);
        assert_eq!(parse_log_level("Warn").unwrap(), Level::WARN);
    }

    #[test]
    fn test_parse_log_level_invalid() {
        assert!(parse_log_level("verbose").is_err());
        assert!(parse_log_level("").is_err());
    }

    #[test]
    fn test_invalid_level_fails_before_installing() {
        let err = init_logging("loud", &LoggingConfig::default()).unwrap_err();
        assert!(matches!(err, FactoryError::Configuration(_)));
    }

    #[test]
    fn test_default_directive_targets_crate() {
        assert_eq!(default_directive(Level::WARN), "obfuscation_markers=WARN");
    }
}
