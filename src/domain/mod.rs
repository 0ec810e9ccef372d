//! Domain types shared by every layer of the crate.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Error types** ([`FactoryError`], [`ConstructError`])
//! - **Result type alias** ([`Result`])
//! - **Capabilities** ([`Capability`]) that markers resolve into
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, FactoryError>`]:
//!
//! ```rust
//! use obfuscation_markers::domain::{FactoryError, Result};
//!
//! fn example() -> Result<()> {
//!     Err(FactoryError::NullReference("value"))
//! }
//! assert!(example().is_err());
//! ```

pub mod errors;
pub mod result;

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export commonly used types for convenience
pub use errors::{BoxError, ConstructError, FactoryError};
pub use result::Result;

/// The kind of strategy a marker resolves into
///
/// Single-match enforcement is applied per capability: an input set may carry
/// one obfuscation marker and one representation marker at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Markers producing an [`Obfuscator`](crate::obfuscator::Obfuscator)
    Obfuscation,
    /// Markers producing a [`Representation`](crate::representation::Representation)
    Representation,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Obfuscation => write!(f, "obfuscation"),
            Capability::Representation => write!(f, "representation"),
        }
    }
}
