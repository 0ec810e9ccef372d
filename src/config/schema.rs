//! Manifest schema types
//!
//! This module defines the TOML structure of a field manifest.

use crate::markers::{MarkerKind, DEFAULT_MASK_CHAR};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Root manifest configuration
///
/// This is the structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestConfig {
    /// Defaults applied to every marker
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Field declarations, in file order
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

impl ManifestConfig {
    /// Validates the manifest
    ///
    /// Field names must be non-empty and unique, and a field may carry at
    /// most one marker of each kind.
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            field.validate()?;
            if !seen.insert(field.name.as_str()) {
                return Err(format!("Duplicate field name: {}", field.name));
            }
        }
        Ok(())
    }
}

/// Manifest-wide defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Mask character for markers that do not set one
    #[serde(default = "default_mask_char")]
    pub mask_char: char,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            mask_char: default_mask_char(),
        }
    }
}

/// A named field and its markers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Field name
    pub name: String,

    /// Markers attached to the field
    #[serde(default)]
    pub markers: Vec<MarkerSpec>,
}

impl FieldConfig {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Field name cannot be empty".to_string());
        }

        let mut kinds = HashSet::new();
        for marker in &self.markers {
            if !kinds.insert(marker.kind()) {
                return Err(format!(
                    "Field '{}' declares more than one '{}' marker",
                    self.name,
                    marker.kind()
                ));
            }
        }
        Ok(())
    }
}

/// A marker as written in the manifest
///
/// Providers are referenced by their registered name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerSpec {
    All {
        #[serde(default)]
        mask_char: Option<char>,
    },
    None,
    FixedLength {
        length: usize,
        #[serde(default)]
        mask_char: Option<char>,
    },
    FixedValue {
        value: String,
    },
    Portion {
        #[serde(default)]
        keep_at_start: usize,
        #[serde(default)]
        keep_at_end: usize,
        #[serde(default)]
        at_least_from_start: usize,
        #[serde(default)]
        at_least_from_end: usize,
        #[serde(default)]
        fixed_total_length: Option<usize>,
        #[serde(default)]
        fixed_length: Option<usize>,
        #[serde(default)]
        mask_char: Option<char>,
    },
    Using {
        provider: String,
    },
    RepresentedBy {
        provider: String,
    },
}

impl MarkerSpec {
    /// The marker kind this spec declares
    pub fn kind(&self) -> MarkerKind {
        match self {
            MarkerSpec::All { .. } => MarkerKind::All,
            MarkerSpec::None => MarkerKind::None,
            MarkerSpec::FixedLength { .. } => MarkerKind::FixedLength,
            MarkerSpec::FixedValue { .. } => MarkerKind::FixedValue,
            MarkerSpec::Portion { .. } => MarkerKind::Portion,
            MarkerSpec::Using { .. } => MarkerKind::Using,
            MarkerSpec::RepresentedBy { .. } => MarkerKind::RepresentedBy,
        }
    }
}

fn default_mask_char() -> char {
    DEFAULT_MASK_CHAR
}
