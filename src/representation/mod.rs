//! Representation providers
//!
//! A representation provider computes the display form of a value before it
//! is obfuscated. Providers come in two flavours that bridge into each other:
//! eager ([`Representation`]) and deferred ([`LazyRepresentation`]).
//!
//! # Usage
//!
//! ```rust
//! use obfuscation_markers::representation::{builtin::IntArrayToString, Representation, Value};
//!
//! let provider = IntArrayToString::instance();
//! let text = provider.to_display_form(&Value::IntArray(vec![1, 2, 3])).unwrap();
//! assert_eq!(text, "[1, 2, 3]");
//! ```

pub mod builtin;
pub mod value;

pub use builtin::default_instance;
pub use value::{Value, ValueKind};

use crate::domain::{FactoryError, Result};
use std::fmt;

/// A display form whose computation is deferred until requested
pub struct Deferred<'a> {
    thunk: Box<dyn FnOnce() -> String + 'a>,
}

impl<'a> Deferred<'a> {
    /// Defers `thunk`
    pub fn new(thunk: impl FnOnce() -> String + 'a) -> Self {
        Self {
            thunk: Box::new(thunk),
        }
    }

    /// Computes the display form
    pub fn evaluate(self) -> String {
        (self.thunk)()
    }
}

impl fmt::Debug for Deferred<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Deferred(..)")
    }
}

fn require_present(value: &Value) -> Result<()> {
    if value.is_null() {
        return Err(FactoryError::NullReference("value"));
    }
    Ok(())
}

/// Trait for eager representation providers
///
/// Implementors provide [`render`](Representation::render); callers use
/// [`to_display_form`](Representation::to_display_form) or
/// [`deferred`](Representation::deferred), which reject `Null` first.
pub trait Representation: fmt::Debug + Send + Sync {
    /// Renders a value that is not `Null`
    fn render(&self, value: &Value) -> String;

    /// Returns the display form of `value`
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::NullReference`] if `value` is `Null`.
    fn to_display_form(&self, value: &Value) -> Result<String> {
        require_present(value)?;
        Ok(self.render(value))
    }

    /// Returns the display form of `value` without computing it yet
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::NullReference`] if `value` is `Null`.
    fn deferred<'a>(&'a self, value: &'a Value) -> Result<Deferred<'a>> {
        require_present(value)?;
        Ok(Deferred::new(move || self.render(value)))
    }
}

/// Trait for representation providers that natively defer their work
///
/// Implementors provide [`defer`](LazyRepresentation::defer); callers use
/// [`deferred_display_form`](LazyRepresentation::deferred_display_form),
/// which rejects `Null` first.
pub trait LazyRepresentation: fmt::Debug + Send + Sync {
    /// Defers rendering of a value that is not `Null`
    fn defer<'a>(&'a self, value: &'a Value) -> Deferred<'a>;

    /// Returns the deferred display form of `value`
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::NullReference`] if `value` is `Null`.
    fn deferred_display_form<'a>(&'a self, value: &'a Value) -> Result<Deferred<'a>> {
        require_present(value)?;
        Ok(self.defer(value))
    }
}

/// Adapts a [`LazyRepresentation`] into a [`Representation`]
///
/// Eager calls evaluate the deferred form immediately; deferred calls pass
/// it through untouched.
#[derive(Debug, Clone, Default)]
pub struct Eager<L>(pub L);

impl<L: LazyRepresentation> Representation for Eager<L> {
    fn render(&self, value: &Value) -> String {
        self.0.defer(value).evaluate()
    }

    fn deferred<'a>(&'a self, value: &'a Value) -> Result<Deferred<'a>> {
        self.0.deferred_display_form(value)
    }
}
