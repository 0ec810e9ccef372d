//! Named provider registration
//!
//! Manifests and other non-code sources reference providers by name. The
//! [`ProviderRegistry`] maps those names to [`ProviderType`]s and doubles as
//! an [`ObjectFactory`] that can construct types through registered
//! constructors, the way a dependency-injection container would.

use crate::domain::{BoxError, ConstructError, FactoryError, Result};
use crate::factory::{ObfuscatorProvider, ObjectFactory};
use crate::markers::{ProviderType, Provides};
use crate::representation::builtin::{
    BoolArrayToString, ByteArrayToString, CharArrayToString, DoubleArrayToString,
    FloatArrayToString, IntArrayToString, LongArrayToString, ObjectArrayDeepToString,
    ObjectArrayToString, ShortArrayToString, ValueToString,
};
use crate::representation::Representation;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

type Constructor<P> = Arc<dyn Fn() -> std::result::Result<Arc<P>, BoxError> + Send + Sync>;

/// Registry of named obfuscator and representation provider types
///
/// # Examples
///
/// ```
/// use obfuscation_markers::factory::{ObfuscatorProvider, ObjectFactory};
/// use obfuscation_markers::markers::ObfuscateUsing;
/// use obfuscation_markers::obfuscator::Obfuscator;
/// use obfuscation_markers::registry::ProviderRegistry;
///
/// #[derive(Debug, Default)]
/// struct LastFour;
///
/// impl ObfuscatorProvider for LastFour {
///     fn obfuscator(&self) -> Obfuscator {
///         Obfuscator::portion().keep_at_end(4).build().unwrap()
///     }
/// }
///
/// let mut registry = ProviderRegistry::with_builtins();
/// registry.register_obfuscator::<LastFour>("last_four");
///
/// let provider = registry.obfuscator_type("last_four").unwrap().clone();
/// let obfuscator = registry.obfuscate_using(&ObfuscateUsing::new(provider)).unwrap();
/// assert_eq!(obfuscator.obfuscate_text("1234567890"), "******7890");
/// ```
#[derive(Default)]
pub struct ProviderRegistry {
    obfuscators: HashMap<String, ProviderType<dyn ObfuscatorProvider>>,
    representations: HashMap<String, ProviderType<dyn Representation>>,
    constructors: HashMap<(TypeId, TypeId), Box<dyn Any + Send + Sync>>,
}

impl ProviderRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in representation providers
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        let builtins = [
            ("to_string", ValueToString::provider_type()),
            ("bool_array", BoolArrayToString::provider_type()),
            ("char_array", CharArrayToString::provider_type()),
            ("byte_array", ByteArrayToString::provider_type()),
            ("short_array", ShortArrayToString::provider_type()),
            ("int_array", IntArrayToString::provider_type()),
            ("long_array", LongArrayToString::provider_type()),
            ("float_array", FloatArrayToString::provider_type()),
            ("double_array", DoubleArrayToString::provider_type()),
            ("object_array", ObjectArrayToString::provider_type()),
            ("object_array_deep", ObjectArrayDeepToString::provider_type()),
        ];
        for (name, provider) in builtins {
            registry.register_representation_type(name, provider);
        }
        registry
    }

    /// Registers a default-constructible obfuscator provider under `name`
    pub fn register_obfuscator<T>(&mut self, name: impl Into<String>) -> &mut Self
    where
        T: ObfuscatorProvider + Default + 'static,
    {
        self.register_obfuscator_type(name, ProviderType::of::<T>())
    }

    /// Registers an obfuscator provider type under `name`, replacing any earlier one
    pub fn register_obfuscator_type(
        &mut self,
        name: impl Into<String>,
        provider: ProviderType<dyn ObfuscatorProvider>,
    ) -> &mut Self {
        let name = name.into();
        debug!(name = %name, provider = %provider, "Registering obfuscator provider");
        self.obfuscators.insert(name, provider);
        self
    }

    /// Registers a default-constructible representation provider under `name`
    pub fn register_representation<T>(&mut self, name: impl Into<String>) -> &mut Self
    where
        T: Representation + Default + 'static,
    {
        self.register_representation_type(name, ProviderType::of::<T>())
    }

    /// Registers a representation provider type under `name`, replacing any earlier one
    pub fn register_representation_type(
        &mut self,
        name: impl Into<String>,
        provider: ProviderType<dyn Representation>,
    ) -> &mut Self {
        let name = name.into();
        debug!(name = %name, provider = %provider, "Registering representation provider");
        self.representations.insert(name, provider);
        self
    }

    /// Registers the constructor used to build `T` as a `P`
    ///
    /// Registered constructors take precedence over the constructor a
    /// [`ProviderType`] carries, and make types referenced through
    /// [`ProviderType::unconstructible`] instantiable.
    pub fn register_constructor<P, T, F>(&mut self, constructor: F) -> &mut Self
    where
        P: ?Sized + 'static,
        T: Provides<P>,
        F: Fn() -> std::result::Result<T, BoxError> + Send + Sync + 'static,
    {
        let constructor: Constructor<P> = Arc::new(move || {
            constructor().map(|instance| <T as Provides<P>>::upcast(Arc::new(instance)))
        });
        self.constructors.insert(
            (TypeId::of::<T>(), TypeId::of::<P>()),
            Box::new(constructor),
        );
        self
    }

    /// Looks up an obfuscator provider type by name
    pub fn obfuscator_type(&self, name: &str) -> Option<&ProviderType<dyn ObfuscatorProvider>> {
        self.obfuscators.get(name)
    }

    /// Looks up a representation provider type by name
    pub fn representation_type(&self, name: &str) -> Option<&ProviderType<dyn Representation>> {
        self.representations.get(name)
    }

    /// Resolves an obfuscator provider name
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::Configuration`] if no provider is registered
    /// under `name`.
    pub fn require_obfuscator(&self, name: &str) -> Result<ProviderType<dyn ObfuscatorProvider>> {
        self.obfuscator_type(name).cloned().ok_or_else(|| {
            FactoryError::Configuration(format!("Unknown obfuscator provider: {name}"))
        })
    }

    /// Resolves a representation provider name
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::Configuration`] if no provider is registered
    /// under `name`.
    pub fn require_representation(&self, name: &str) -> Result<ProviderType<dyn Representation>> {
        self.representation_type(name).cloned().ok_or_else(|| {
            FactoryError::Configuration(format!("Unknown representation provider: {name}"))
        })
    }

    /// Registered obfuscator provider names, sorted
    pub fn obfuscator_names(&self) -> Vec<&str> {
        sorted_names(&self.obfuscators)
    }

    /// Registered representation provider names, sorted
    pub fn representation_names(&self) -> Vec<&str> {
        sorted_names(&self.representations)
    }
}

fn sorted_names<V>(map: &HashMap<String, V>) -> Vec<&str> {
    let mut names: Vec<&str> = map.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("obfuscators", &self.obfuscator_names())
            .field("representations", &self.representation_names())
            .field("constructors", &self.constructors.len())
            .finish()
    }
}

impl ObjectFactory for ProviderRegistry {
    fn instance<P: ?Sized + 'static>(
        &self,
        provider: &ProviderType<P>,
    ) -> std::result::Result<Arc<P>, ConstructError> {
        let registered = self
            .constructors
            .get(&(provider.id(), TypeId::of::<P>()))
            .and_then(|constructor| constructor.downcast_ref::<Constructor<P>>());

        match registered {
            Some(constructor) => {
                debug!(provider = %provider, "Using registered constructor");
                constructor().map_err(|source| ConstructError::Failed {
                    type_name: provider.name(),
                    source,
                })
            }
            None if provider.is_constructible() => provider.construct(),
            None => Err(ConstructError::Unresolved {
                type_name: provider.name(),
                reason: "no constructor registered".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::ObfuscateUsing;
    use crate::obfuscator::Obfuscator;

    #[derive(Debug)]
    struct Salted {
        mask_char: char,
    }

    impl ObfuscatorProvider for Salted {
        fn obfuscator(&self) -> Obfuscator {
            Obfuscator::all(self.mask_char)
        }
    }

    #[derive(Debug, Default)]
    struct Plain;

    impl ObfuscatorProvider for Plain {
        fn obfuscator(&self) -> Obfuscator {
            Obfuscator::fixed_value("plain")
        }
    }

    #[test]
    fn test_builtins_are_registered() {
        let registry = ProviderRegistry::with_builtins();
        assert_eq!(registry.representation_names().len(), 11);
        assert!(registry.obfuscator_names().is_empty());

        let provider = registry.require_representation("int_array").unwrap();
        assert!(provider.is::<IntArrayToString>());
        assert!(registry.representation_type("text").is_none());
    }

    #[test]
    fn test_unknown_names_are_configuration_errors() {
        let registry = ProviderRegistry::new();
        let err = registry.require_obfuscator("nope").unwrap_err();
        assert!(matches!(err, FactoryError::Configuration(_)));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_registered_constructor_makes_type_constructible() {
        let mut registry = ProviderRegistry::new();
        registry
            .register_obfuscator_type("salted", ProviderType::unconstructible::<Salted>())
            .register_constructor::<dyn ObfuscatorProvider, Salted, _>(|| {
                Ok(Salted { mask_char: '~' })
            });

        let marker = ObfuscateUsing::new(registry.require_obfuscator("salted").unwrap());
        let obfuscator = registry.obfuscate_using(&marker).unwrap();
        assert_eq!(obfuscator.obfuscate_text("abc"), "~~~");
    }

    #[test]
    fn test_registered_constructor_wins_over_default() {
        #[derive(Debug, Default)]
        struct Counter(usize);

        impl ObfuscatorProvider for Counter {
            fn obfuscator(&self) -> Obfuscator {
                Obfuscator::fixed_length(self.0, '*')
            }
        }

        let mut registry = ProviderRegistry::new();
        registry.register_constructor::<dyn ObfuscatorProvider, Counter, _>(|| Ok(Counter(2)));

        let obfuscator = registry
            .obfuscate_using(&ObfuscateUsing::of::<Counter>())
            .unwrap();
        assert_eq!(obfuscator.obfuscate_text("anything"), "**");

        let default = crate::factory::DefaultObjectFactory
            .obfuscate_using(&ObfuscateUsing::of::<Counter>())
            .unwrap();
        assert_eq!(default.obfuscate_text("anything"), "");
    }

    #[test]
    fn test_unregistered_unconstructible_type_is_unresolved() {
        let registry = ProviderRegistry::new();
        let marker = ObfuscateUsing::new(ProviderType::unconstructible::<Salted>());
        let err = registry.obfuscate_using(&marker).unwrap_err();
        let FactoryError::Instantiation { source, .. } = err else {
            panic!("expected instantiation error");
        };
        assert!(matches!(source, ConstructError::Unresolved { .. }));
    }

    #[test]
    fn test_failing_registered_constructor() {
        let mut registry = ProviderRegistry::new();
        registry.register_constructor::<dyn ObfuscatorProvider, Plain, _>(|| {
            Err("vault unavailable".into())
        });
        let err = registry
            .obfuscate_using(&ObfuscateUsing::of::<Plain>())
            .unwrap_err();
        assert!(matches!(
            err,
            FactoryError::Instantiation {
                source: ConstructError::Failed { .. },
                ..
            }
        ));
    }
}
