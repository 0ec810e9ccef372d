//! Logging and observability
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the host. The binary uses [`init_logging`].
//!
//! # Example
//!
//! ```no_run
//! use obfuscation_markers::logging::{init_logging, LoggingConfig};
//!
//! init_logging("info", &LoggingConfig::default()).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingConfig};

/// Log a field whose markers could not be resolved
///
/// # Example
///
/// ```no_run
/// use obfuscation_markers::log_field_error;
/// use obfuscation_markers::domain::FactoryError;
///
/// let error = FactoryError::Configuration("Unknown provider".to_string());
/// log_field_error!("password", &error);
/// ```
#[macro_export]
macro_rules! log_field_error {
    ($field:expr, $error:expr) => {
        tracing::error!(
            field = %$field,
            error = %$error,
            "Failed to resolve field markers"
        );
    };
}
