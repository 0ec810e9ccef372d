//! Field manifests
//!
//! A manifest declares markers for named fields in TOML, so marker
//! configuration can live outside the code that is being obfuscated.
//!
//! # Overview
//!
//! Manifests support:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - A manifest-wide default mask character
//! - Provider references by registered name
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use obfuscation_markers::config::load_manifest;
//! use obfuscation_markers::factory::ObjectFactory;
//! use obfuscation_markers::registry::ProviderRegistry;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = ProviderRegistry::with_builtins();
//! let manifest = load_manifest("fields.toml", &registry)?;
//!
//! for element in manifest.elements() {
//!     let obfuscator = registry.obfuscator(element)?;
//!     println!("{}: {:?}", element.name(), obfuscator);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example Manifest
//!
//! ```toml
//! [defaults]
//! mask_char = "#"
//!
//! [[fields]]
//! name = "password"
//! markers = [{ kind = "all" }]
//!
//! [[fields]]
//! name = "card_number"
//! markers = [{ kind = "portion", keep_at_end = 4, fixed_total_length = 16 }]
//!
//! [[fields]]
//! name = "roles"
//! markers = [{ kind = "represented_by", provider = "object_array_deep" }]
//!
//! [[fields]]
//! name = "api_key"
//! markers = [{ kind = "fixed_value", value = "${API_KEY_PLACEHOLDER}" }]
//! ```

pub mod loader;
pub mod manifest;
pub mod schema;

pub use loader::{load_manifest, parse_manifest};
pub use manifest::Manifest;
pub use schema::{DefaultsConfig, FieldConfig, ManifestConfig, MarkerSpec};
