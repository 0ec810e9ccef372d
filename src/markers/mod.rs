//! Declarative obfuscation markers
//!
//! Markers describe how a value should be obfuscated or rendered before
//! obfuscation. There are six masking marker kinds and one representation
//! marker kind; the set is closed; only the implementations referenced by
//! [`ObfuscateUsing`] and [`RepresentedBy`] are open for extension.
//!
//! # Usage
//!
//! ```rust
//! use obfuscation_markers::markers::{AnnotatedElement, Marker, ObfuscatePortion};
//!
//! let element = AnnotatedElement::new("card_number").with(Marker::Portion(ObfuscatePortion {
//!     keep_at_end: 4,
//!     ..ObfuscatePortion::default()
//! }));
//! assert_eq!(element.markers().len(), 1);
//! ```

pub mod element;
pub mod provider_type;

pub use element::{Annotated, AnnotatedElement};
pub use provider_type::{ProviderType, Provides};

use crate::domain::Capability;
use crate::factory::ObfuscatorProvider;
use crate::representation::Representation;
use std::fmt;

/// Default mask character of every masking marker
pub const DEFAULT_MASK_CHAR: char = '*';

/// Obfuscate every character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObfuscateAll {
    /// The character to replace with
    pub mask_char: char,
}

impl Default for ObfuscateAll {
    fn default() -> Self {
        Self {
            mask_char: DEFAULT_MASK_CHAR,
        }
    }
}

/// Do not obfuscate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObfuscateNone;

/// Replace with a fixed number of mask characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObfuscateFixedLength {
    /// The number of mask characters
    pub length: usize,
    /// The character to replace with
    pub mask_char: char,
}

impl ObfuscateFixedLength {
    /// Creates a marker with the default mask character
    pub fn new(length: usize) -> Self {
        Self {
            length,
            mask_char: DEFAULT_MASK_CHAR,
        }
    }
}

/// Replace with a literal value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObfuscateFixedValue {
    /// The replacement text
    pub value: String,
}

impl ObfuscateFixedValue {
    /// Creates a marker for the given replacement text
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Keep a prefix and/or suffix and mask the rest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObfuscatePortion {
    /// The number of characters to keep at the start
    pub keep_at_start: usize,
    /// The number of characters to keep at the end
    pub keep_at_end: usize,
    /// The minimum number of characters from the start that are masked
    pub at_least_from_start: usize,
    /// The minimum number of characters from the end that are masked
    pub at_least_from_end: usize,
    /// The fixed total length of obfuscated text, `None` for the actual length
    pub fixed_total_length: Option<usize>,
    /// Deprecated fixed number of mask characters; ignored when
    /// `fixed_total_length` is set
    pub fixed_length: Option<usize>,
    /// The character to replace with
    pub mask_char: char,
}

impl Default for ObfuscatePortion {
    fn default() -> Self {
        Self {
            keep_at_start: 0,
            keep_at_end: 0,
            at_least_from_start: 0,
            at_least_from_end: 0,
            fixed_total_length: None,
            fixed_length: None,
            mask_char: DEFAULT_MASK_CHAR,
        }
    }
}

/// Obfuscate using the obfuscator of a provider type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObfuscateUsing {
    /// The provider type
    pub provider: ProviderType<dyn ObfuscatorProvider>,
}

impl ObfuscateUsing {
    /// Creates a marker referencing a default-constructible provider
    pub fn of<T>() -> Self
    where
        T: ObfuscatorProvider + Default + 'static,
    {
        Self::new(ProviderType::of::<T>())
    }

    /// Creates a marker referencing the given provider type
    pub fn new(provider: ProviderType<dyn ObfuscatorProvider>) -> Self {
        Self { provider }
    }
}

/// Render values with a representation provider before obfuscating
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepresentedBy {
    /// The representation provider type
    pub provider: ProviderType<dyn Representation>,
}

impl RepresentedBy {
    /// Creates a marker referencing a default-constructible representation
    pub fn of<T>() -> Self
    where
        T: Representation + Default + 'static,
    {
        Self::new(ProviderType::of::<T>())
    }

    /// Creates a marker referencing the given representation type
    pub fn new(provider: ProviderType<dyn Representation>) -> Self {
        Self { provider }
    }
}

/// The closed set of marker kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MarkerKind {
    All,
    None,
    FixedLength,
    FixedValue,
    Portion,
    Using,
    RepresentedBy,
}

impl MarkerKind {
    /// Masking marker kinds, in scan order
    pub const OBFUSCATION: [MarkerKind; 6] = [
        MarkerKind::All,
        MarkerKind::None,
        MarkerKind::FixedLength,
        MarkerKind::FixedValue,
        MarkerKind::Portion,
        MarkerKind::Using,
    ];

    /// Representation marker kinds
    pub const REPRESENTATION: [MarkerKind; 1] = [MarkerKind::RepresentedBy];

    /// Kinds participating in resolution of `capability`, in scan order
    pub fn for_capability(capability: Capability) -> &'static [MarkerKind] {
        match capability {
            Capability::Obfuscation => &Self::OBFUSCATION,
            Capability::Representation => &Self::REPRESENTATION,
        }
    }

    /// The capability markers of this kind resolve into
    pub fn capability(self) -> Capability {
        match self {
            MarkerKind::RepresentedBy => Capability::Representation,
            _ => Capability::Obfuscation,
        }
    }

    /// Name used in manifests and diagnostics
    pub fn as_str(self) -> &'static str {
        match self {
            MarkerKind::All => "all",
            MarkerKind::None => "none",
            MarkerKind::FixedLength => "fixed_length",
            MarkerKind::FixedValue => "fixed_value",
            MarkerKind::Portion => "portion",
            MarkerKind::Using => "using",
            MarkerKind::RepresentedBy => "represented_by",
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A marker of any kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    All(ObfuscateAll),
    None(ObfuscateNone),
    FixedLength(ObfuscateFixedLength),
    FixedValue(ObfuscateFixedValue),
    Portion(ObfuscatePortion),
    Using(ObfuscateUsing),
    RepresentedBy(RepresentedBy),
}

impl Marker {
    /// The kind of this marker
    pub fn kind(&self) -> MarkerKind {
        match self {
            Marker::All(_) => MarkerKind::All,
            Marker::None(_) => MarkerKind::None,
            Marker::FixedLength(_) => MarkerKind::FixedLength,
            Marker::FixedValue(_) => MarkerKind::FixedValue,
            Marker::Portion(_) => MarkerKind::Portion,
            Marker::Using(_) => MarkerKind::Using,
            Marker::RepresentedBy(_) => MarkerKind::RepresentedBy,
        }
    }

    /// The capability this marker resolves into
    pub fn capability(&self) -> Capability {
        self.kind().capability()
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::All(m) => write!(f, "all(mask_char = {:?})", m.mask_char),
            Marker::None(_) => write!(f, "none"),
            Marker::FixedLength(m) => write!(
                f,
                "fixed_length(length = {}, mask_char = {:?})",
                m.length, m.mask_char
            ),
            Marker::FixedValue(m) => write!(f, "fixed_value(value = {:?})", m.value),
            Marker::Portion(m) => {
                write!(
                    f,
                    "portion(keep_at_start = {}, keep_at_end = {}, at_least_from_start = {}, at_least_from_end = {}",
                    m.keep_at_start, m.keep_at_end, m.at_least_from_start, m.at_least_from_end
                )?;
                if let Some(total) = m.fixed_total_length {
                    write!(f, ", fixed_total_length = {total}")?;
                }
                if let Some(length) = m.fixed_length {
                    write!(f, ", fixed_length = {length}")?;
                }
                write!(f, ", mask_char = {:?})", m.mask_char)
            }
            Marker::Using(m) => write!(f, "using({})", m.provider),
            Marker::RepresentedBy(m) => write!(f, "represented_by({})", m.provider),
        }
    }
}

impl From<ObfuscateAll> for Marker {
    fn from(marker: ObfuscateAll) -> Self {
        Marker::All(marker)
    }
}

impl From<ObfuscateNone> for Marker {
    fn from(marker: ObfuscateNone) -> Self {
        Marker::None(marker)
    }
}

impl From<ObfuscateFixedLength> for Marker {
    fn from(marker: ObfuscateFixedLength) -> Self {
        Marker::FixedLength(marker)
    }
}

impl From<ObfuscateFixedValue> for Marker {
    fn from(marker: ObfuscateFixedValue) -> Self {
        Marker::FixedValue(marker)
    }
}

impl From<ObfuscatePortion> for Marker {
    fn from(marker: ObfuscatePortion) -> Self {
        Marker::Portion(marker)
    }
}

impl From<ObfuscateUsing> for Marker {
    fn from(marker: ObfuscateUsing) -> Self {
        Marker::Using(marker)
    }
}

impl From<RepresentedBy> for Marker {
    fn from(marker: RepresentedBy) -> Self {
        Marker::RepresentedBy(marker)
    }
}
