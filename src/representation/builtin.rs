//! Built-in representation providers
//!
//! Every built-in is a process-wide singleton: [`instance`](IntArrayToString::instance)
//! always returns the same shared object, and so does [`lookup`] for the
//! matching provider type. Array printers render their own value type as
//! `[a, b, c]` and fall back to the value's default display form otherwise.

use super::value::join;
use super::{Representation, Value, ValueKind};
use crate::markers::ProviderType;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

macro_rules! builtin_provider {
    ($(#[$doc:meta])* $name:ident, $singleton:ident) => {
        $(#[$doc])*
        pub struct $name {
            _private: (),
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(stringify!($name))
            }
        }

        static $singleton: LazyLock<Arc<dyn Representation>> =
            LazyLock::new(|| Arc::new($name { _private: () }));

        impl $name {
            /// The shared instance
            pub fn instance() -> Arc<dyn Representation> {
                Arc::clone(&$singleton)
            }

            /// Provider type referencing this built-in
            pub fn provider_type() -> ProviderType<dyn Representation> {
                ProviderType::singleton::<$name>($name::instance)
            }
        }
    };
}

macro_rules! primitive_array_provider {
    ($(#[$doc:meta])* $name:ident, $singleton:ident, $variant:ident, $element:expr) => {
        builtin_provider!($(#[$doc])* $name, $singleton);

        impl Representation for $name {
            fn render(&self, value: &Value) -> String {
                match value {
                    Value::$variant(items) => join(items, $element),
                    other => other.to_string(),
                }
            }
        }
    };
}

builtin_provider!(
    /// Uses the value's default display form
    ValueToString,
    VALUE_TO_STRING
);

impl Representation for ValueToString {
    fn render(&self, value: &Value) -> String {
        value.to_string()
    }
}

builtin_provider!(
    /// Returns text unchanged, other values in their default display form
    TextIdentity,
    TEXT_IDENTITY
);

impl Representation for TextIdentity {
    fn render(&self, value: &Value) -> String {
        match value {
            Value::Text(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

primitive_array_provider!(
    /// Renders `bool` arrays
    BoolArrayToString,
    BOOL_ARRAY_TO_STRING,
    BoolArray,
    |v: &bool| v.to_string()
);

primitive_array_provider!(
    /// Renders `char` arrays
    CharArrayToString,
    CHAR_ARRAY_TO_STRING,
    CharArray,
    |v: &char| v.to_string()
);

primitive_array_provider!(
    /// Renders `i8` arrays
    ByteArrayToString,
    BYTE_ARRAY_TO_STRING,
    ByteArray,
    |v: &i8| v.to_string()
);

primitive_array_provider!(
    /// Renders `i16` arrays
    ShortArrayToString,
    SHORT_ARRAY_TO_STRING,
    ShortArray,
    |v: &i16| v.to_string()
);

primitive_array_provider!(
    /// Renders `i32` arrays
    IntArrayToString,
    INT_ARRAY_TO_STRING,
    IntArray,
    |v: &i32| v.to_string()
);

primitive_array_provider!(
    /// Renders `i64` arrays
    LongArrayToString,
    LONG_ARRAY_TO_STRING,
    LongArray,
    |v: &i64| v.to_string()
);

primitive_array_provider!(
    /// Renders `f32` arrays
    FloatArrayToString,
    FLOAT_ARRAY_TO_STRING,
    FloatArray,
    |v: &f32| format!("{v:?}")
);

primitive_array_provider!(
    /// Renders `f64` arrays
    DoubleArrayToString,
    DOUBLE_ARRAY_TO_STRING,
    DoubleArray,
    |v: &f64| format!("{v:?}")
);

builtin_provider!(
    /// Renders value arrays one level deep; nested arrays keep their default display form
    ObjectArrayToString,
    OBJECT_ARRAY_TO_STRING
);

impl Representation for ObjectArrayToString {
    fn render(&self, value: &Value) -> String {
        match value {
            Value::Array(items) => join(items, Value::to_string),
            other => other.to_string(),
        }
    }
}

builtin_provider!(
    /// Renders value arrays, expanding nested arrays recursively
    ObjectArrayDeepToString,
    OBJECT_ARRAY_DEEP_TO_STRING
);

impl Representation for ObjectArrayDeepToString {
    fn render(&self, value: &Value) -> String {
        match value {
            Value::Array(items) => join(items, deep_element),
            other => other.to_string(),
        }
    }
}

fn deep_element(value: &Value) -> String {
    match value {
        Value::Array(items) => join(items, deep_element),
        nested if nested.kind().is_primitive_array() => default_instance(nested.kind()).render(nested),
        other => other.to_string(),
    }
}

static BUILTINS: LazyLock<HashMap<TypeId, Arc<dyn Representation>>> = LazyLock::new(|| {
    HashMap::from([
        (TypeId::of::<ValueToString>(), ValueToString::instance()),
        (TypeId::of::<BoolArrayToString>(), BoolArrayToString::instance()),
        (TypeId::of::<CharArrayToString>(), CharArrayToString::instance()),
        (TypeId::of::<ByteArrayToString>(), ByteArrayToString::instance()),
        (TypeId::of::<ShortArrayToString>(), ShortArrayToString::instance()),
        (TypeId::of::<IntArrayToString>(), IntArrayToString::instance()),
        (TypeId::of::<LongArrayToString>(), LongArrayToString::instance()),
        (TypeId::of::<FloatArrayToString>(), FloatArrayToString::instance()),
        (TypeId::of::<DoubleArrayToString>(), DoubleArrayToString::instance()),
        (TypeId::of::<ObjectArrayToString>(), ObjectArrayToString::instance()),
        (TypeId::of::<ObjectArrayDeepToString>(), ObjectArrayDeepToString::instance()),
    ])
});

/// Returns the shared instance for one of the eleven well-known provider types
///
/// Matching is by nominal identity only; any other type yields `None`.
pub fn lookup(provider: &ProviderType<dyn Representation>) -> Option<Arc<dyn Representation>> {
    let instance = BUILTINS.get(&provider.id()).cloned();
    if instance.is_some() {
        tracing::trace!(provider = %provider, "Serving built-in representation");
    }
    instance
}

/// Returns the built-in representation suited to values of `kind`
///
/// Primitive arrays get their dedicated printer, value arrays the shallow
/// printer, text the identity printer and everything else [`ValueToString`].
pub fn default_instance(kind: ValueKind) -> Arc<dyn Representation> {
    match kind {
        ValueKind::BoolArray => BoolArrayToString::instance(),
        ValueKind::CharArray => CharArrayToString::instance(),
        ValueKind::ByteArray => ByteArrayToString::instance(),
        ValueKind::ShortArray => ShortArrayToString::instance(),
        ValueKind::IntArray => IntArrayToString::instance(),
        ValueKind::LongArray => LongArrayToString::instance(),
        ValueKind::FloatArray => FloatArrayToString::instance(),
        ValueKind::DoubleArray => DoubleArrayToString::instance(),
        ValueKind::Array => ObjectArrayToString::instance(),
        ValueKind::Text => TextIdentity::instance(),
        ValueKind::Null
        | ValueKind::Bool
        | ValueKind::Char
        | ValueKind::Byte
        | ValueKind::Short
        | ValueKind::Int
        | ValueKind::Long
        | ValueKind::Float
        | ValueKind::Double
        | ValueKind::Other
        | ValueKind::Unit => ValueToString::instance(),
    }
}
