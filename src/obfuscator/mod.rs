//! Masking strategies
//!
//! Provides the concrete [`Obfuscator`] values the factory hands out for
//! masking markers. Built-in strategies are plain values and compare equal
//! when their parameters match; custom strategies wrap a user
//! [`MaskingStrategy`] and compare by identity.

pub mod portion;

pub use portion::{PortionBuilder, PortionObfuscator};

use std::fmt;
use std::sync::Arc;

/// Trait for user-defined masking algorithms
///
/// Implementations must be immutable once constructed; obfuscators are shared
/// between threads and reused for every value of a field.
pub trait MaskingStrategy: fmt::Debug + Send + Sync {
    /// Returns the obfuscated form of `text`
    fn obfuscate_text(&self, text: &str) -> String;
}

/// An immutable strategy that transforms a string into its obfuscated form
#[derive(Clone)]
pub struct Obfuscator {
    kind: Kind,
}

#[derive(Clone)]
enum Kind {
    All { mask_char: char },
    None,
    FixedLength { length: usize, mask_char: char },
    FixedValue { value: String },
    Portion(PortionObfuscator),
    Custom(Arc<dyn MaskingStrategy>),
}

impl Obfuscator {
    /// Replaces every character with `mask_char`
    pub fn all(mask_char: char) -> Self {
        Self::from_kind(Kind::All { mask_char })
    }

    /// Passes text through unchanged
    pub fn none() -> Self {
        Self::from_kind(Kind::None)
    }

    /// Replaces text with exactly `length` mask characters
    pub fn fixed_length(length: usize, mask_char: char) -> Self {
        Self::from_kind(Kind::FixedLength { length, mask_char })
    }

    /// Replaces text with a literal value
    pub fn fixed_value(value: impl Into<String>) -> Self {
        Self::from_kind(Kind::FixedValue {
            value: value.into(),
        })
    }

    /// Starts building an obfuscator that keeps parts of the text
    pub fn portion() -> PortionBuilder {
        PortionBuilder::new()
    }

    /// Wraps a user-defined masking algorithm
    pub fn custom(strategy: impl MaskingStrategy + 'static) -> Self {
        Self::from_kind(Kind::Custom(Arc::new(strategy)))
    }

    pub(crate) fn from_portion(portion: PortionObfuscator) -> Self {
        Self::from_kind(Kind::Portion(portion))
    }

    fn from_kind(kind: Kind) -> Self {
        Self { kind }
    }

    /// Obfuscates `text`
    pub fn obfuscate_text(&self, text: &str) -> String {
        match &self.kind {
            Kind::All { mask_char } => repeat(*mask_char, text.chars().count()),
            Kind::None => text.to_string(),
            Kind::FixedLength { length, mask_char } => repeat(*mask_char, *length),
            Kind::FixedValue { value } => value.clone(),
            Kind::Portion(portion) => portion.obfuscate_text(text),
            Kind::Custom(strategy) => strategy.obfuscate_text(text),
        }
    }
}

pub(crate) fn repeat(mask_char: char, count: usize) -> String {
    std::iter::repeat(mask_char).take(count).collect()
}

impl PartialEq for Obfuscator {
    fn eq(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (Kind::All { mask_char: a }, Kind::All { mask_char: b }) => a == b,
            (Kind::None, Kind::None) => true,
            (
                Kind::FixedLength {
                    length: l1,
                    mask_char: m1,
                },
                Kind::FixedLength {
                    length: l2,
                    mask_char: m2,
                },
            ) => l1 == l2 && m1 == m2,
            (Kind::FixedValue { value: a }, Kind::FixedValue { value: b }) => a == b,
            (Kind::Portion(a), Kind::Portion(b)) => a == b,
            (Kind::Custom(a), Kind::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Obfuscator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Kind::All { mask_char } => write!(f, "Obfuscator::all({mask_char:?})"),
            Kind::None => write!(f, "Obfuscator::none()"),
            Kind::FixedLength { length, mask_char } => {
                write!(f, "Obfuscator::fixed_length({length}, {mask_char:?})")
            }
            Kind::FixedValue { value } => write!(f, "Obfuscator::fixed_value({value:?})"),
            Kind::Portion(portion) => write!(f, "Obfuscator::portion({portion:?})"),
            Kind::Custom(strategy) => write!(f, "Obfuscator::custom({strategy:?})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Reverse;

    impl MaskingStrategy for Reverse {
        fn obfuscate_text(&self, text: &str) -> String {
            text.chars().rev().collect()
        }
    }

    #[test]
    fn test_all() {
        assert_eq!(Obfuscator::all('x').obfuscate_text("héllo"), "xxxxx");
        assert_eq!(Obfuscator::all('*').obfuscate_text(""), "");
    }

    #[test]
    fn test_none() {
        assert_eq!(Obfuscator::none().obfuscate_text("secret"), "secret");
    }

    #[test]
    fn test_fixed_length() {
        let obfuscator = Obfuscator::fixed_length(3, '#');
        assert_eq!(obfuscator.obfuscate_text("a"), "###");
        assert_eq!(obfuscator.obfuscate_text("a much longer value"), "###");
    }

    #[test]
    fn test_fixed_value() {
        assert_eq!(
            Obfuscator::fixed_value("<hidden>").obfuscate_text("secret"),
            "<hidden>"
        );
    }

    #[test]
    fn test_value_equality() {
        assert_eq!(Obfuscator::all('x'), Obfuscator::all('x'));
        assert_ne!(Obfuscator::all('x'), Obfuscator::all('*'));
        assert_eq!(Obfuscator::fixed_length(3, 'x'), Obfuscator::fixed_length(3, 'x'));
        assert_ne!(Obfuscator::fixed_length(3, 'x'), Obfuscator::fixed_length(4, 'x'));
        assert_eq!(Obfuscator::fixed_value("a"), Obfuscator::fixed_value("a"));
        assert_ne!(Obfuscator::none(), Obfuscator::all('*'));
    }

    #[test]
    fn test_custom_compares_by_identity() {
        let custom = Obfuscator::custom(Reverse);
        assert_eq!(custom.obfuscate_text("abc"), "cba");
        assert_eq!(custom, custom.clone());
        assert_ne!(custom, Obfuscator::custom(Reverse));
    }

    #[test]
    fn test_debug_output() {
        assert_eq!(format!("{:?}", Obfuscator::all('x')), "Obfuscator::all('x')");
        assert_eq!(
            format!("{:?}", Obfuscator::fixed_length(2, '*')),
            "Obfuscator::fixed_length(2, '*')"
        );
    }
}
