//! Mask command implementation
//!
//! Obfuscates a single value the way a manifest field would be obfuscated:
//! the value is rendered with the field's representation provider (or the
//! default one for its type) and then passed through the field's obfuscator.

use crate::config::load_manifest;
use crate::domain::Result;
use crate::factory::ObjectFactory;
use crate::log_field_error;
use crate::markers::AnnotatedElement;
use crate::registry::ProviderRegistry;
use crate::representation::{default_instance, Value};
use clap::Args;

/// Arguments for the mask command
#[derive(Args, Debug)]
pub struct MaskArgs {
    /// Name of the manifest field
    #[arg(short, long)]
    pub field: String,

    /// Value to obfuscate; parsed as JSON unless --text is given
    pub value: String,

    /// Treat the value as plain text
    #[arg(long)]
    pub text: bool,
}

impl MaskArgs {
    /// Execute the mask command
    ///
    /// Prints the obfuscated value and returns 0, or returns 2 when the field
    /// is unknown or its markers do not resolve.
    pub fn execute(&self, manifest_path: &str, registry: &ProviderRegistry) -> anyhow::Result<i32> {
        let manifest = match load_manifest(manifest_path, registry) {
            Ok(m) => m,
            Err(e) => {
                eprintln!("❌ Failed to load manifest: {e}");
                return Ok(2);
            }
        };

        let Some(element) = manifest.element(&self.field) else {
            eprintln!("❌ Unknown field: {}", self.field);
            return Ok(2);
        };

        match self.mask(element, registry) {
            Ok(masked) => {
                println!("{masked}");
                Ok(0)
            }
            Err(e) => {
                log_field_error!(element.name(), &e);
                eprintln!("❌ {}: {e}", element.name());
                Ok(2)
            }
        }
    }

    /// Parses the command-line value
    pub fn parse_value(&self) -> Value {
        if self.text {
            return Value::from(self.value.as_str());
        }
        serde_json::from_str::<serde_json::Value>(&self.value)
            .map(Value::from)
            .unwrap_or_else(|_| Value::from(self.value.as_str()))
    }

    /// Renders and obfuscates the value for `element`
    ///
    /// Values of fields without an obfuscator are returned in their display form.
    ///
    /// # Errors
    ///
    /// Returns the resolution error of the field's markers, or
    /// [`FactoryError::NullReference`](crate::domain::FactoryError::NullReference)
    /// for a JSON `null`.
    pub fn mask(&self, element: &AnnotatedElement, factory: &impl ObjectFactory) -> Result<String> {
        let obfuscator = factory.obfuscator(element)?;
        let value = self.parse_value();
        let representation = factory
            .representation(element)?
            .unwrap_or_else(|| default_instance(value.kind()));

        let text = representation.to_display_form(&value)?;
        Ok(match obfuscator {
            Some(obfuscator) => obfuscator.obfuscate_text(&text),
            None => text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FactoryError;
    use crate::markers::{ObfuscatePortion, RepresentedBy};
    use crate::representation::builtin::ObjectArrayDeepToString;

    fn args(value: &str) -> MaskArgs {
        MaskArgs {
            field: "field".to_string(),
            value: value.to_string(),
            text: false,
        }
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(args("42").parse_value().kind(), crate::representation::ValueKind::Long);
        assert_eq!(args("hello").parse_value().to_string(), "hello");
        let text = MaskArgs {
            text: true,
            ..args("42")
        };
        assert_eq!(text.parse_value().kind(), crate::representation::ValueKind::Text);
    }

    #[test]
    fn test_mask_with_portion() {
        let element = AnnotatedElement::new("card").with(ObfuscatePortion {
            keep_at_end: 4,
            ..ObfuscatePortion::default()
        });
        let masked = args("1234567890123456")
            .mask(&element, &ProviderRegistry::with_builtins())
            .unwrap();
        assert_eq!(masked, "************3456");
    }

    #[test]
    fn test_mask_uses_representation() {
        let element = AnnotatedElement::new("roles")
            .with(RepresentedBy::new(ObjectArrayDeepToString::provider_type()));
        let masked = args(r#"["admin", ["audit", 2]]"#)
            .mask(&element, &ProviderRegistry::with_builtins())
            .unwrap();
        assert_eq!(masked, "[admin, [audit, 2]]");
    }

    #[test]
    fn test_mask_null_value() {
        let element = AnnotatedElement::new("field");
        let err = args("null")
            .mask(&element, &ProviderRegistry::with_builtins())
            .unwrap_err();
        assert!(matches!(err, FactoryError::NullReference(_)));
    }
}
