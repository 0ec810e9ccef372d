//! Domain error types
//!
//! This module defines the error hierarchy for the marker factory.
//! Every failure surfaces to the immediate caller; nothing is retried or
//! downgraded locally.

use crate::domain::Capability;
use crate::markers::Marker;
use std::fmt;
use thiserror::Error;

/// Boxed error type used for causes raised by user code (constructors, DI containers)
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main factory error type
///
/// This is the primary error type returned by the factory, the provider registry
/// and the manifest loader.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// A referenced provider type could not be constructed
    #[error("Cannot create instance of {type_name}")]
    Instantiation {
        type_name: &'static str,
        #[source]
        source: ConstructError,
    },

    /// More than one marker of the same capability on one input set
    #[error("Multiple {capability} markers found: {}", MarkerList(.markers))]
    Conflict {
        capability: Capability,
        markers: Vec<Marker>,
    },

    /// A required value was absent
    #[error("Null reference: {0} must not be null")]
    NullReference(&'static str),

    /// Marker parameters that cannot produce a strategy
    #[error("Invalid marker: {0}")]
    InvalidMarker(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl FactoryError {
    /// Wraps a construction failure for the given type
    pub fn instantiation(type_name: &'static str, source: ConstructError) -> Self {
        FactoryError::Instantiation { type_name, source }
    }

    /// Returns the offending markers if this is a conflict error
    pub fn conflicting_markers(&self) -> Option<&[Marker]> {
        match self {
            FactoryError::Conflict { markers, .. } => Some(markers),
            _ => None,
        }
    }
}

/// Construction errors raised by an [`ObjectFactory`](crate::factory::ObjectFactory)
///
/// Hosts plugging in their own resolver report failures through this type;
/// the facade wraps it into [`FactoryError::Instantiation`].
#[derive(Debug, Error)]
pub enum ConstructError {
    /// The type declares no zero-argument constructor
    #[error("{type_name} has no zero-argument constructor")]
    MissingConstructor { type_name: &'static str },

    /// The constructor ran but failed
    #[error("constructor of {type_name} failed: {source}")]
    Failed {
        type_name: &'static str,
        #[source]
        source: BoxError,
    },

    /// The resolver could not provide an instance for another reason
    #[error("cannot resolve {type_name}: {reason}")]
    Unresolved {
        type_name: &'static str,
        reason: String,
    },
}

impl ConstructError {
    /// Name of the type that failed to construct
    pub fn type_name(&self) -> &'static str {
        match self {
            ConstructError::MissingConstructor { type_name }
            | ConstructError::Failed { type_name, .. }
            | ConstructError::Unresolved { type_name, .. } => type_name,
        }
    }
}

struct MarkerList<'a>(&'a [Marker]);

impl fmt::Display for MarkerList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, marker) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{marker}")?;
        }
        f.write_str("]")
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for FactoryError {
    fn from(err: std::io::Error) -> Self {
        FactoryError::Io(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for FactoryError {
    fn from(err: toml::de::Error) -> Self {
        FactoryError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::{ObfuscateAll, ObfuscateNone};
    use std::error::Error as _;

    #[test]
    fn test_conflict_display_lists_markers_in_order() {
        let err = FactoryError::Conflict {
            capability: Capability::Obfuscation,
            markers: vec![
                Marker::All(ObfuscateAll { mask_char: 'x' }),
                Marker::None(ObfuscateNone),
            ],
        };
        assert_eq!(
            err.to_string(),
            "Multiple obfuscation markers found: [all(mask_char = 'x'), none]"
        );
        assert_eq!(err.conflicting_markers().map(<[Marker]>::len), Some(2));
    }

    #[test]
    fn test_instantiation_keeps_cause() {
        let err = FactoryError::instantiation(
            "my::Provider",
            ConstructError::MissingConstructor {
                type_name: "my::Provider",
            },
        );
        assert_eq!(err.to_string(), "Cannot create instance of my::Provider");
        let source = err.source().expect("cause should be preserved");
        assert_eq!(
            source.to_string(),
            "my::Provider has no zero-argument constructor"
        );
        assert!(err.conflicting_markers().is_none());
    }

    #[test]
    fn test_construct_error_type_name() {
        let err = ConstructError::Unresolved {
            type_name: "a::B",
            reason: "not registered".to_string(),
        };
        assert_eq!(err.type_name(), "a::B");
        assert_eq!(err.to_string(), "cannot resolve a::B: not registered");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: FactoryError = io_err.into();
        assert!(matches!(err, FactoryError::Io(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: FactoryError = toml_err.into();
        assert!(matches!(err, FactoryError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_factory_error_implements_std_error() {
        let err = FactoryError::NullReference("value");
        let _: &dyn std::error::Error = &err;
    }
}
