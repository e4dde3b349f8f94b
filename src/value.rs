use std::fmt;

use base64::Engine;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

/// Structural category of a [`Value`], used to select its wire encoding
/// and to name shapes in errors and logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Null,
    String,
    Int,
    Bool,
    Double,
    DateTime,
    Bytes,
    Array,
    List,
    Struct,
    Chars,
    Primitives,
}

impl Shape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Null => "null",
            Shape::String => "string",
            Shape::Int => "int",
            Shape::Bool => "bool",
            Shape::Double => "double",
            Shape::DateTime => "dateTime",
            Shape::Bytes => "bytes",
            Shape::Array => "array",
            Shape::List => "list",
            Shape::Struct => "struct",
            Shape::Chars => "chars",
            Shape::Primitives => "primitive array",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A runtime value ready to be placed on an XML-RPC stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicit null marker; encodes as an empty string token, never as an
    /// omitted node.
    Null,
    /// UTF-8 text.
    String(String),
    /// 32-bit signed integer. Byte- and short-sized integers widen into
    /// this variant.
    Int(i32),
    Bool(bool),
    /// 64-bit float. 32-bit floats widen into this variant.
    Double(f64),
    /// An instant in time; rendered in the configured zone at write time.
    DateTime(DateTime<Utc>),
    /// Opaque byte buffer; base64 on the wire.
    Bytes(Vec<u8>),
    /// Heterogeneous boxed array.
    Array(Vec<Value>),
    /// Ordered sequence. Same container wire form as [`Value::Array`].
    List(Vec<Value>),
    /// String-keyed mapping with insertion-ordered members.
    Struct(Members),
    /// Character buffer; written as character data, not boxed elements.
    Chars(Vec<char>),
    /// Unboxed numeric/boolean array; boxed by element kind before
    /// encoding.
    Primitives(PrimitiveArray),
}

/// Unboxed arrays of numeric or boolean primitives. The element kinds are
/// exhaustive; anything array-shaped outside this set is not a value.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveArray {
    Short(Vec<i16>),
    Int(Vec<i32>),
    Long(Vec<i64>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    Bool(Vec<bool>),
}

impl PrimitiveArray {
    /// Element kind name, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            PrimitiveArray::Short(_) => "short",
            PrimitiveArray::Int(_) => "int",
            PrimitiveArray::Long(_) => "long",
            PrimitiveArray::Float(_) => "float",
            PrimitiveArray::Double(_) => "double",
            PrimitiveArray::Bool(_) => "bool",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PrimitiveArray::Short(items) => items.len(),
            PrimitiveArray::Int(items) => items.len(),
            PrimitiveArray::Long(items) => items.len(),
            PrimitiveArray::Float(items) => items.len(),
            PrimitiveArray::Double(items) => items.len(),
            PrimitiveArray::Bool(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Value {
    /// Category of this value.
    pub fn shape(&self) -> Shape {
        match self {
            Value::Null => Shape::Null,
            Value::String(_) => Shape::String,
            Value::Int(_) => Shape::Int,
            Value::Bool(_) => Shape::Bool,
            Value::Double(_) => Shape::Double,
            Value::DateTime(_) => Shape::DateTime,
            Value::Bytes(_) => Shape::Bytes,
            Value::Array(_) => Shape::Array,
            Value::List(_) => Shape::List,
            Value::Struct(_) => Shape::Struct,
            Value::Chars(_) => Shape::Chars,
            Value::Primitives(_) => Shape::Primitives,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Diagnostic JSON view of this value. Byte buffers render as standard
    /// base64 text; timestamps as RFC 3339. Not a wire format.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::String(text) => JsonValue::String(text.clone()),
            Value::Int(n) => JsonValue::from(*n),
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Double(d) => float_to_json(*d),
            Value::DateTime(instant) => JsonValue::String(instant.to_rfc3339()),
            Value::Bytes(data) => JsonValue::String(
                base64::engine::general_purpose::STANDARD.encode(data),
            ),
            Value::Array(items) | Value::List(items) => {
                JsonValue::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Struct(members) => JsonValue::Object(
                members
                    .iter()
                    .map(|(name, member)| (name.to_string(), member.to_json()))
                    .collect(),
            ),
            Value::Chars(chars) => JsonValue::String(chars.iter().collect()),
            Value::Primitives(primitives) => match primitives {
                PrimitiveArray::Short(items) => {
                    JsonValue::Array(items.iter().map(|v| JsonValue::from(*v)).collect())
                }
                PrimitiveArray::Int(items) => {
                    JsonValue::Array(items.iter().map(|v| JsonValue::from(*v)).collect())
                }
                PrimitiveArray::Long(items) => {
                    JsonValue::Array(items.iter().map(|v| JsonValue::from(*v)).collect())
                }
                PrimitiveArray::Float(items) => JsonValue::Array(
                    items.iter().map(|v| float_to_json(f64::from(*v))).collect(),
                ),
                PrimitiveArray::Double(items) => {
                    JsonValue::Array(items.iter().map(|v| float_to_json(*v)).collect())
                }
                PrimitiveArray::Bool(items) => {
                    JsonValue::Array(items.iter().map(|v| JsonValue::Bool(*v)).collect())
                }
            },
        }
    }
}

// JSON numbers cannot carry NaN or infinities.
fn float_to_json(value: f64) -> JsonValue {
    serde_json::Number::from_f64(value)
        .map(JsonValue::Number)
        .unwrap_or(JsonValue::Null)
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::String(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::String(text)
    }
}

impl From<i8> for Value {
    fn from(n: i8) -> Self {
        Value::Int(i32::from(n))
    }
}

impl From<i16> for Value {
    fn from(n: i16) -> Self {
        Value::Int(i32::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f32> for Value {
    fn from(d: f32) -> Self {
        Value::Double(f64::from(d))
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(instant: DateTime<Utc>) -> Self {
        Value::DateTime(instant)
    }
}

impl From<Vec<u8>> for Value {
    fn from(data: Vec<u8>) -> Self {
        Value::Bytes(data)
    }
}

impl From<&[u8]> for Value {
    fn from(data: &[u8]) -> Self {
        Value::Bytes(data.to_vec())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Members> for Value {
    fn from(members: Members) -> Self {
        Value::Struct(members)
    }
}

impl From<PrimitiveArray> for Value {
    fn from(primitives: PrimitiveArray) -> Self {
        Value::Primitives(primitives)
    }
}

impl From<Vec<i16>> for Value {
    fn from(items: Vec<i16>) -> Self {
        Value::Primitives(PrimitiveArray::Short(items))
    }
}

impl From<Vec<i32>> for Value {
    fn from(items: Vec<i32>) -> Self {
        Value::Primitives(PrimitiveArray::Int(items))
    }
}

impl From<Vec<i64>> for Value {
    fn from(items: Vec<i64>) -> Self {
        Value::Primitives(PrimitiveArray::Long(items))
    }
}

impl From<Vec<f32>> for Value {
    fn from(items: Vec<f32>) -> Self {
        Value::Primitives(PrimitiveArray::Float(items))
    }
}

impl From<Vec<f64>> for Value {
    fn from(items: Vec<f64>) -> Self {
        Value::Primitives(PrimitiveArray::Double(items))
    }
}

impl From<Vec<bool>> for Value {
    fn from(items: Vec<bool>) -> Self {
        Value::Primitives(PrimitiveArray::Bool(items))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

/// Insertion-ordered member list backing [`Value::Struct`].
///
/// Keys are unique: inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Members {
    entries: Vec<(String, Value)>,
}

impl Members {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Members {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut members = Members::new();
        for (name, value) in iter {
            members.insert(name, value);
        }
        members
    }
}
