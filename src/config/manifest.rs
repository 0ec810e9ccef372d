//! Resolved manifests
//!
//! A [`Manifest`] is the validated form of a [`ManifestConfig`]: provider
//! names are resolved through a [`ProviderRegistry`] and every field becomes
//! an [`AnnotatedElement`].

use super::schema::{DefaultsConfig, ManifestConfig, MarkerSpec};
use crate::domain::{FactoryError, Result};
use crate::markers::{
    AnnotatedElement, Marker, ObfuscateAll, ObfuscateFixedLength, ObfuscateFixedValue,
    ObfuscateNone, ObfuscatePortion, ObfuscateUsing, RepresentedBy,
};
use crate::registry::ProviderRegistry;

/// Annotated elements declared by a manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    elements: Vec<AnnotatedElement>,
}

impl Manifest {
    /// Resolves a parsed manifest against `registry`
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::Configuration`] if the manifest fails
    /// validation (for example a field declaring the same marker kind twice)
    /// or a marker references an unregistered provider name.
    pub fn resolve(config: &ManifestConfig, registry: &ProviderRegistry) -> Result<Self> {
        config.validate().map_err(|e| {
            FactoryError::Configuration(format!("Manifest validation failed: {}", e))
        })?;

        let elements = config
            .fields
            .iter()
            .map(|field| {
                field
                    .markers
                    .iter()
                    .map(|spec| spec.to_marker(&config.defaults, registry))
                    .try_fold(
                        AnnotatedElement::new(&field.name),
                        |element, marker| -> Result<AnnotatedElement> { Ok(element.with(marker?)) },
                    )
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { elements })
    }

    /// Looks up a field by name
    pub fn element(&self, name: &str) -> Option<&AnnotatedElement> {
        self.elements.iter().find(|element| element.name() == name)
    }

    /// All fields in declaration order
    pub fn elements(&self) -> &[AnnotatedElement] {
        &self.elements
    }

    /// Consumes the manifest, returning its fields
    pub fn into_elements(self) -> Vec<AnnotatedElement> {
        self.elements
    }
}

impl MarkerSpec {
    /// Converts this spec into a marker
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::Configuration`](crate::domain::FactoryError::Configuration)
    /// if the referenced provider name is not registered.
    pub fn to_marker(&self, defaults: &DefaultsConfig, registry: &ProviderRegistry) -> Result<Marker> {
        let mask = |mask_char: &Option<char>| mask_char.unwrap_or(defaults.mask_char);

        let marker = match self {
            MarkerSpec::All { mask_char } => Marker::from(ObfuscateAll {
                mask_char: mask(mask_char),
            }),
            MarkerSpec::None => Marker::from(ObfuscateNone),
            MarkerSpec::FixedLength { length, mask_char } => {
                Marker::from(ObfuscateFixedLength {
                    length: *length,
                    mask_char: mask(mask_char),
                })
            }
            MarkerSpec::FixedValue { value } => Marker::from(ObfuscateFixedValue::new(value.clone())),
            MarkerSpec::Portion {
                keep_at_start,
                keep_at_end,
                at_least_from_start,
                at_least_from_end,
                fixed_total_length,
                fixed_length,
                mask_char,
            } => Marker::from(ObfuscatePortion {
                keep_at_start: *keep_at_start,
                keep_at_end: *keep_at_end,
                at_least_from_start: *at_least_from_start,
                at_least_from_end: *at_least_from_end,
                fixed_total_length: *fixed_total_length,
                fixed_length: *fixed_length,
                mask_char: mask(mask_char),
            }),
            MarkerSpec::Using { provider } => {
                Marker::from(ObfuscateUsing::new(registry.require_obfuscator(provider)?))
            }
            MarkerSpec::RepresentedBy { provider } => {
                Marker::from(RepresentedBy::new(registry.require_representation(provider)?))
            }
        };
        Ok(marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::{Annotated, MarkerKind};
    use crate::representation::builtin::ObjectArrayDeepToString;

    fn config(toml_str: &str) -> ManifestConfig {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn test_resolve_applies_default_mask_char() {
        let config = config(
            r##"
[defaults]
mask_char = "#"

[[fields]]
name = "password"
markers = [{ kind = "all" }]

[[fields]]
name = "pin"
markers = [{ kind = "fixed_length", length = 3, mask_char = "x" }]
"##,
        );
        let manifest = Manifest::resolve(&config, &ProviderRegistry::new()).unwrap();

        assert_eq!(
            manifest.element("password").unwrap().markers(),
            &[Marker::from(ObfuscateAll { mask_char: '#' })]
        );
        assert_eq!(
            manifest.element("pin").unwrap().markers(),
            &[Marker::from(ObfuscateFixedLength {
                length: 3,
                mask_char: 'x'
            })]
        );
        assert!(manifest.element("missing").is_none());
    }

    #[test]
    fn test_resolve_provider_names() {
        let config = config(
            r#"
[[fields]]
name = "roles"
markers = [{ kind = "represented_by", provider = "object_array_deep" }]
"#,
        );
        let manifest = Manifest::resolve(&config, &ProviderRegistry::with_builtins()).unwrap();
        let element = &manifest.elements()[0];
        let Some(Marker::RepresentedBy(marker)) = element.annotation(MarkerKind::RepresentedBy)
        else {
            panic!("expected represented_by marker");
        };
        assert!(marker.provider.is::<ObjectArrayDeepToString>());
    }

    #[test]
    fn test_resolve_unknown_provider() {
        let config = config(
            r#"
[[fields]]
name = "token"
markers = [{ kind = "using", provider = "vault" }]
"#,
        );
        let err = Manifest::resolve(&config, &ProviderRegistry::with_builtins()).unwrap_err();
        assert!(matches!(err, FactoryError::Configuration(_)));
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let config = config(
            r#"
[[fields]]
name = "b"
markers = [{ kind = "fixed_value", value = "x" }, { kind = "none" }]

[[fields]]
name = "a"
"#,
        );
        let manifest = Manifest::resolve(&config, &ProviderRegistry::new()).unwrap();
        let names: Vec<&str> = manifest.elements().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["b", "a"]);

        let kinds: Vec<MarkerKind> = manifest.elements()[0]
            .markers()
            .iter()
            .map(Marker::kind)
            .collect();
        assert_eq!(kinds, vec![MarkerKind::FixedValue, MarkerKind::None]);
        assert!(manifest.into_elements()[1].markers().is_empty());
    }

    #[test]
    fn test_resolve_rejects_duplicate_marker_kinds() {
        let config = config(
            r##"
[[fields]]
name = "password"
markers = [{ kind = "all", mask_char = "x" }, { kind = "all", mask_char = "#" }]
"##,
        );
        let err = Manifest::resolve(&config, &ProviderRegistry::new()).unwrap_err();
        assert!(matches!(err, FactoryError::Configuration(_)));
        assert!(err.to_string().contains("password"));
    }
}
