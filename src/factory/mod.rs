//! Factory facade
//!
//! Turns markers into strategies. [`ObjectFactory`] is the facade: hosts
//! implement [`ObjectFactory::instance`] to decide how provider types are
//! instantiated and inherit every conversion and resolution operation, each of
//! which can be overridden as a customization point.
//!
//! # Usage
//!
//! ```rust
//! use obfuscation_markers::factory::{DefaultObjectFactory, ObjectFactory};
//! use obfuscation_markers::markers::{AnnotatedElement, ObfuscateAll};
//!
//! let factory = DefaultObjectFactory;
//! let element = AnnotatedElement::new("password").with(ObfuscateAll { mask_char: 'x' });
//!
//! let obfuscator = factory.obfuscator(&element).unwrap().unwrap();
//! assert_eq!(obfuscator.obfuscate_text("secret"), "xxxxxx");
//! ```

pub mod scanner;

pub use crate::representation::builtin::lookup as lookup_builtin;

use crate::domain::{Capability, ConstructError, FactoryError, Result};
use crate::markers::{
    Annotated, Marker, MarkerKind, ObfuscateAll, ObfuscateFixedLength, ObfuscateFixedValue,
    ObfuscateNone, ObfuscatePortion, ObfuscateUsing, ProviderType, RepresentedBy,
};
use crate::obfuscator::Obfuscator;
use crate::representation::Representation;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Trait for user types that supply an obfuscator
///
/// Referenced by [`ObfuscateUsing`] markers. Providers are created on demand
/// and queried once per resolution.
pub trait ObfuscatorProvider: fmt::Debug + Send + Sync {
    /// Returns the obfuscator to use
    fn obfuscator(&self) -> Obfuscator;
}

/// Facade converting markers into obfuscators and representation providers
///
/// Only [`instance`](ObjectFactory::instance) must be implemented.
pub trait ObjectFactory {
    /// Creates an instance of a provider type
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructError`] when the type cannot be instantiated.
    fn instance<P: ?Sized + 'static>(
        &self,
        provider: &ProviderType<P>,
    ) -> std::result::Result<Arc<P>, ConstructError>;

    /// Converts an `all` marker
    fn obfuscate_all(&self, marker: &ObfuscateAll) -> Obfuscator {
        Obfuscator::all(marker.mask_char)
    }

    /// Converts a `none` marker
    fn obfuscate_none(&self, _marker: &ObfuscateNone) -> Obfuscator {
        Obfuscator::none()
    }

    /// Converts a `fixed_length` marker
    fn obfuscate_fixed_length(&self, marker: &ObfuscateFixedLength) -> Obfuscator {
        Obfuscator::fixed_length(marker.length, marker.mask_char)
    }

    /// Converts a `fixed_value` marker
    fn obfuscate_fixed_value(&self, marker: &ObfuscateFixedValue) -> Obfuscator {
        Obfuscator::fixed_value(marker.value.clone())
    }

    /// Converts a `portion` marker
    ///
    /// When both `fixed_total_length` and the deprecated `fixed_length` are
    /// set, the total length is used.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::InvalidMarker`] if the fixed total length is
    /// smaller than the kept characters.
    #[allow(deprecated)]
    fn obfuscate_portion(&self, marker: &ObfuscatePortion) -> Result<Obfuscator> {
        if let (Some(total), Some(length)) = (marker.fixed_total_length, marker.fixed_length) {
            warn!(
                fixed_total_length = total,
                fixed_length = length,
                "Portion marker sets both fixed_total_length and fixed_length; ignoring fixed_length"
            );
        }

        Obfuscator::portion()
            .keep_at_start(marker.keep_at_start)
            .keep_at_end(marker.keep_at_end)
            .at_least_from_start(marker.at_least_from_start)
            .at_least_from_end(marker.at_least_from_end)
            .with_fixed_total_length(marker.fixed_total_length)
            .with_fixed_length(marker.fixed_length)
            .with_mask_char(marker.mask_char)
            .build()
    }

    /// Converts a `using` marker
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::Instantiation`] if the provider cannot be created.
    fn obfuscate_using(&self, marker: &ObfuscateUsing) -> Result<Obfuscator> {
        Ok(self.obfuscator_provider_for(marker)?.obfuscator())
    }

    /// Creates the provider a `using` marker references
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::Instantiation`] if the provider cannot be created.
    fn obfuscator_provider_for(&self, marker: &ObfuscateUsing) -> Result<Arc<dyn ObfuscatorProvider>> {
        self.obfuscator_provider(&marker.provider)
    }

    /// Creates an obfuscator provider
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::Instantiation`] if the provider cannot be created.
    fn obfuscator_provider(
        &self,
        provider: &ProviderType<dyn ObfuscatorProvider>,
    ) -> Result<Arc<dyn ObfuscatorProvider>> {
        self.instance(provider)
            .map_err(|e| FactoryError::instantiation(provider.name(), e))
    }

    /// Converts any marker into an obfuscator
    ///
    /// Representation markers yield `None`.
    ///
    /// # Errors
    ///
    /// Returns the error of the per-kind conversion.
    fn obfuscator_for_marker(&self, marker: &Marker) -> Result<Option<Obfuscator>> {
        let obfuscator = match marker {
            Marker::All(m) => self.obfuscate_all(m),
            Marker::None(m) => self.obfuscate_none(m),
            Marker::FixedLength(m) => self.obfuscate_fixed_length(m),
            Marker::FixedValue(m) => self.obfuscate_fixed_value(m),
            Marker::Portion(m) => self.obfuscate_portion(m)?,
            Marker::Using(m) => self.obfuscate_using(m)?,
            Marker::RepresentedBy(_) => return Ok(None),
        };
        Ok(Some(obfuscator))
    }

    /// Resolves the obfuscator of an annotated element
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::Conflict`] if the element carries more than one
    /// masking marker, or the error of a failing conversion.
    fn obfuscator(&self, element: &impl Annotated) -> Result<Option<Obfuscator>> {
        self.obfuscator_from_lookup(|kind| element.annotation(kind).cloned())
    }

    /// Resolves the obfuscator from a marker lookup, probing kinds in scan order
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::Conflict`] if the lookup yields more than one
    /// masking marker, or the error of a failing conversion.
    fn obfuscator_from_lookup(
        &self,
        lookup: impl Fn(MarkerKind) -> Option<Marker>,
    ) -> Result<Option<Obfuscator>> {
        let markers = scanner::scan_lookup(lookup, Capability::Obfuscation);
        scanner::find_single(Capability::Obfuscation, markers, |m| {
            self.obfuscator_for_marker(m)
        })
    }

    /// Resolves the obfuscator from markers in the given order
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::Conflict`] if more than one masking marker is
    /// given, or the error of a failing conversion.
    fn obfuscator_from_markers(&self, markers: &[Marker]) -> Result<Option<Obfuscator>> {
        let markers = scanner::scan_markers(markers, Capability::Obfuscation);
        scanner::find_single(Capability::Obfuscation, markers, |m| {
            self.obfuscator_for_marker(m)
        })
    }

    /// Converts a `represented_by` marker
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::Instantiation`] if the provider cannot be created.
    fn represented_by(&self, marker: &RepresentedBy) -> Result<Arc<dyn Representation>> {
        self.representation_provider(&marker.provider)
    }

    /// Returns a representation provider, preferring the built-in singletons
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::Instantiation`] if a non-built-in provider
    /// cannot be created.
    fn representation_provider(
        &self,
        provider: &ProviderType<dyn Representation>,
    ) -> Result<Arc<dyn Representation>> {
        if let Some(builtin) = lookup_builtin(provider) {
            return Ok(builtin);
        }
        debug!(provider = %provider, "Instantiating representation provider");
        self.instance(provider)
            .map_err(|e| FactoryError::instantiation(provider.name(), e))
    }

    /// Converts any marker into a representation provider
    ///
    /// Masking markers yield `None`.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::Instantiation`] if the provider cannot be created.
    fn representation_for_marker(&self, marker: &Marker) -> Result<Option<Arc<dyn Representation>>> {
        match marker {
            Marker::RepresentedBy(m) => self.represented_by(m).map(Some),
            Marker::All(_)
            | Marker::None(_)
            | Marker::FixedLength(_)
            | Marker::FixedValue(_)
            | Marker::Portion(_)
            | Marker::Using(_) => Ok(None),
        }
    }

    /// Resolves the representation provider of an annotated element
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::Instantiation`] if the provider cannot be created.
    fn representation(&self, element: &impl Annotated) -> Result<Option<Arc<dyn Representation>>> {
        self.representation_from_lookup(|kind| element.annotation(kind).cloned())
    }

    /// Resolves the representation provider from a marker lookup
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::Instantiation`] if the provider cannot be created.
    fn representation_from_lookup(
        &self,
        lookup: impl Fn(MarkerKind) -> Option<Marker>,
    ) -> Result<Option<Arc<dyn Representation>>> {
        let markers = scanner::scan_lookup(lookup, Capability::Representation);
        scanner::find_single(Capability::Representation, markers, |m| {
            self.representation_for_marker(m)
        })
    }

    /// Resolves the representation provider from markers in the given order
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::Conflict`] if more than one representation
    /// marker is given, or [`FactoryError::Instantiation`] if the provider
    /// cannot be created.
    fn representation_from_markers(
        &self,
        markers: &[Marker],
    ) -> Result<Option<Arc<dyn Representation>>> {
        let markers = scanner::scan_markers(markers, Capability::Representation);
        scanner::find_single(Capability::Representation, markers, |m| {
            self.representation_for_marker(m)
        })
    }
}

/// Factory that instantiates provider types through their own constructors
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultObjectFactory;

impl ObjectFactory for DefaultObjectFactory {
    fn instance<P: ?Sized + 'static>(
        &self,
        provider: &ProviderType<P>,
    ) -> std::result::Result<Arc<P>, ConstructError> {
        provider.construct()
    }
}
