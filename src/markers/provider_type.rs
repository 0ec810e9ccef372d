//! Nominal references to provider implementation types
//!
//! A [`ProviderType`] stands in for a class reference: it identifies a
//! provider type by [`TypeId`] and optionally carries the zero-argument
//! constructor used to create it on demand.

use crate::domain::{BoxError, ConstructError};
use crate::factory::ObfuscatorProvider;
use crate::representation::Representation;
use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

type Constructor<P> = Arc<dyn Fn() -> Result<Arc<P>, BoxError> + Send + Sync>;

/// Conversion of a concrete provider into the capability trait object `P`
///
/// Implemented for every [`ObfuscatorProvider`] (as `dyn ObfuscatorProvider`)
/// and every [`Representation`] (as `dyn Representation`).
pub trait Provides<P: ?Sized>: Send + Sync + 'static {
    /// Upcasts a shared instance
    fn upcast(this: Arc<Self>) -> Arc<P>;
}

impl<T: ObfuscatorProvider + 'static> Provides<dyn ObfuscatorProvider> for T {
    fn upcast(this: Arc<Self>) -> Arc<dyn ObfuscatorProvider> {
        this
    }
}

impl<T: Representation + 'static> Provides<dyn Representation> for T {
    fn upcast(this: Arc<Self>) -> Arc<dyn Representation> {
        this
    }
}

/// A reference to a provider implementation type for capability `P`
pub struct ProviderType<P: ?Sized + 'static> {
    id: TypeId,
    name: &'static str,
    constructor: Option<Constructor<P>>,
}

impl<P: ?Sized + 'static> ProviderType<P> {
    /// References a default-constructible provider type
    ///
    /// # Examples
    ///
    /// ```
    /// use obfuscation_markers::factory::ObfuscatorProvider;
    /// use obfuscation_markers::markers::ProviderType;
    /// use obfuscation_markers::obfuscator::Obfuscator;
    ///
    /// #[derive(Debug, Default)]
    /// struct Masked;
    ///
    /// impl ObfuscatorProvider for Masked {
    ///     fn obfuscator(&self) -> Obfuscator {
    ///         Obfuscator::fixed_length(8, '*')
    ///     }
    /// }
    ///
    /// let provider_type = ProviderType::<dyn ObfuscatorProvider>::of::<Masked>();
    /// assert!(provider_type.is::<Masked>());
    /// ```
    pub fn of<T>() -> Self
    where
        T: Provides<P> + Default,
    {
        Self::with_constructor::<T, _>(|| Ok(T::default()))
    }

    /// References a provider type created by a fallible zero-argument constructor
    pub fn with_constructor<T, F>(constructor: F) -> Self
    where
        T: Provides<P>,
        F: Fn() -> Result<T, BoxError> + Send + Sync + 'static,
    {
        let constructor: Constructor<P> = Arc::new(move || {
            constructor().map(|instance| <T as Provides<P>>::upcast(Arc::new(instance)))
        });
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            constructor: Some(constructor),
        }
    }

    /// References a provider type that has no zero-argument constructor
    ///
    /// Only a resolver that knows how to build `T` by other means can
    /// instantiate it.
    pub fn unconstructible<T>() -> Self
    where
        T: Provides<P>,
    {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            constructor: None,
        }
    }

    pub(crate) fn singleton<T>(instance: fn() -> Arc<P>) -> Self
    where
        T: Provides<P>,
    {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            constructor: Some(Arc::new(move || Ok(instance()))),
        }
    }

    /// Nominal identity of the referenced type
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified name of the referenced type
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns true if this references `T`
    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// Returns true if the type carries a zero-argument constructor
    pub fn is_constructible(&self) -> bool {
        self.constructor.is_some()
    }

    /// Invokes the type's zero-argument constructor
    ///
    /// # Errors
    ///
    /// Returns [`ConstructError::MissingConstructor`] if the type has none, or
    /// [`ConstructError::Failed`] if the constructor itself fails.
    pub fn construct(&self) -> Result<Arc<P>, ConstructError> {
        let constructor = self
            .constructor
            .as_ref()
            .ok_or(ConstructError::MissingConstructor {
                type_name: self.name,
            })?;
        constructor().map_err(|source| ConstructError::Failed {
            type_name: self.name,
            source,
        })
    }
}

impl<P: ?Sized + 'static> Clone for ProviderType<P> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name,
            constructor: self.constructor.clone(),
        }
    }
}

impl<P: ?Sized + 'static> PartialEq for ProviderType<P> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<P: ?Sized + 'static> Eq for ProviderType<P> {}

impl<P: ?Sized + 'static> Hash for ProviderType<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<P: ?Sized + 'static> fmt::Debug for ProviderType<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderType")
            .field("name", &self.name)
            .field("constructible", &self.is_constructible())
            .finish()
    }
}

impl<P: ?Sized + 'static> fmt::Display for ProviderType<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obfuscator::Obfuscator;

    #[derive(Debug, Default)]
    struct Valid;

    impl ObfuscatorProvider for Valid {
        fn obfuscator(&self) -> Obfuscator {
            Obfuscator::fixed_length(8, '*')
        }
    }

    #[derive(Debug)]
    struct NoDefault(#[allow(dead_code)] usize);

    impl ObfuscatorProvider for NoDefault {
        fn obfuscator(&self) -> Obfuscator {
            Obfuscator::none()
        }
    }

    #[test]
    fn test_of_constructs_default() {
        let provider_type = ProviderType::<dyn ObfuscatorProvider>::of::<Valid>();
        assert!(provider_type.is::<Valid>());
        assert!(provider_type.is_constructible());
        let provider = provider_type.construct().unwrap();
        assert_eq!(provider.obfuscator(), Obfuscator::fixed_length(8, '*'));
    }

    #[test]
    fn test_unconstructible_fails() {
        let provider_type = ProviderType::<dyn ObfuscatorProvider>::unconstructible::<NoDefault>();
        let err = provider_type.construct().unwrap_err();
        assert!(matches!(err, ConstructError::MissingConstructor { .. }));
        assert!(err.type_name().ends_with("NoDefault"));
    }

    #[test]
    fn test_failing_constructor() {
        let provider_type = ProviderType::<dyn ObfuscatorProvider>::with_constructor::<NoDefault, _>(
            || Err("out of coffee".into()),
        );
        let err = provider_type.construct().unwrap_err();
        assert!(matches!(err, ConstructError::Failed { .. }));
    }

    #[test]
    fn test_equality_is_nominal() {
        let a = ProviderType::<dyn ObfuscatorProvider>::of::<Valid>();
        let b = ProviderType::<dyn ObfuscatorProvider>::unconstructible::<Valid>();
        let c = ProviderType::<dyn ObfuscatorProvider>::unconstructible::<NoDefault>();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
