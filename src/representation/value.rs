//! Dynamic values handed to representation providers

use std::fmt;
use std::sync::Arc;

/// A runtime value whose display form a representation provider computes
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Char(char),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Text(String),
    BoolArray(Vec<bool>),
    CharArray(Vec<char>),
    ByteArray(Vec<i8>),
    ShortArray(Vec<i16>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    FloatArray(Vec<f32>),
    DoubleArray(Vec<f64>),
    /// Array of arbitrary values
    Array(Vec<Value>),
    /// Any other displayable value
    Other(Arc<dyn fmt::Display + Send + Sync>),
}

/// The runtime type of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Char,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Text,
    BoolArray,
    CharArray,
    ByteArray,
    ShortArray,
    IntArray,
    LongArray,
    FloatArray,
    DoubleArray,
    Array,
    Other,
    /// The unit type; no value has this kind
    Unit,
}

impl ValueKind {
    /// Returns true for the eight primitive array kinds
    pub fn is_primitive_array(self) -> bool {
        matches!(
            self,
            ValueKind::BoolArray
                | ValueKind::CharArray
                | ValueKind::ByteArray
                | ValueKind::ShortArray
                | ValueKind::IntArray
                | ValueKind::LongArray
                | ValueKind::FloatArray
                | ValueKind::DoubleArray
        )
    }

    /// Returns true for any array kind
    pub fn is_array(self) -> bool {
        self == ValueKind::Array || self.is_primitive_array()
    }
}

impl Value {
    /// The runtime type of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Char(_) => ValueKind::Char,
            Value::Byte(_) => ValueKind::Byte,
            Value::Short(_) => ValueKind::Short,
            Value::Int(_) => ValueKind::Int,
            Value::Long(_) => ValueKind::Long,
            Value::Float(_) => ValueKind::Float,
            Value::Double(_) => ValueKind::Double,
            Value::Text(_) => ValueKind::Text,
            Value::BoolArray(_) => ValueKind::BoolArray,
            Value::CharArray(_) => ValueKind::CharArray,
            Value::ByteArray(_) => ValueKind::ByteArray,
            Value::ShortArray(_) => ValueKind::ShortArray,
            Value::IntArray(_) => ValueKind::IntArray,
            Value::LongArray(_) => ValueKind::LongArray,
            Value::FloatArray(_) => ValueKind::FloatArray,
            Value::DoubleArray(_) => ValueKind::DoubleArray,
            Value::Array(_) => ValueKind::Array,
            Value::Other(_) => ValueKind::Other,
        }
    }

    /// Returns true if this is [`Value::Null`]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Wraps any displayable value
    pub fn other(value: impl fmt::Display + Send + Sync + 'static) -> Self {
        Value::Other(Arc::new(value))
    }

    /// Opaque per-instance token used as the default display form of arrays
    fn identity_token(&self) -> Option<String> {
        let (tag, address) = match self {
            Value::BoolArray(v) => ("bool", instance_address(v)),
            Value::CharArray(v) => ("char", instance_address(v)),
            Value::ByteArray(v) => ("i8", instance_address(v)),
            Value::ShortArray(v) => ("i16", instance_address(v)),
            Value::IntArray(v) => ("i32", instance_address(v)),
            Value::LongArray(v) => ("i64", instance_address(v)),
            Value::FloatArray(v) => ("f32", instance_address(v)),
            Value::DoubleArray(v) => ("f64", instance_address(v)),
            Value::Array(v) => ("Value", instance_address(v)),
            _ => return None,
        };
        Some(format!("[{tag}@{address:x}"))
    }
}

/// Address identifying a live vector
///
/// Unallocated vectors share a dangling buffer pointer, so those use the
/// address of the vector itself.
fn instance_address<T>(items: &Vec<T>) -> usize {
    if items.capacity() == 0 {
        items as *const Vec<T> as usize
    } else {
        items.as_ptr() as usize
    }
}

/// Formats elements as `[a, b, c]`
pub(crate) fn join<T>(items: &[T], element: impl FnMut(&T) -> String) -> String {
    let parts: Vec<String> = items.iter().map(element).collect();
    format!("[{}]", parts.join(", "))
}

/// The default display form
///
/// Scalars print their value, text prints as-is, `Null` prints `null`, and
/// arrays print an opaque per-instance token rather than their contents.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "{v}"),
            Value::Byte(v) => write!(f, "{v}"),
            Value::Short(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v:?}"),
            Value::Double(v) => write!(f, "{v:?}"),
            Value::Text(v) => f.write_str(v),
            Value::Other(v) => write!(f, "{v}"),
            array => match array.identity_token() {
                Some(token) => f.write_str(&token),
                None => Ok(()),
            },
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value::{:?}({self})", self.kind())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Array(values)
    }
}

/// JSON documents map onto values: arrays become [`Value::Array`], integral
/// numbers [`Value::Long`], other numbers [`Value::Double`], and objects are
/// kept as [`Value::Other`] displaying their compact JSON form.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Long(i),
                None => Value::Double(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            object @ serde_json::Value::Object(_) => Value::other(object),
        }
    }
}
