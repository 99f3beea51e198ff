//! Core domain types for the movie catalog.
//!
//! The catalog is schema-free: a movie is an id plus an ordered map of
//! free-form attributes. Attribute values cover the handful of shapes that
//! show up in real catalog files (text, numbers, booleans, lists of text),
//! and anything else is coerced to text rather than rejected.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a movie
pub type MovieId = u32;

/// Title shown for a movie whose attribute map carries no usable title
pub const UNTITLED: &str = "Untitled";

// =============================================================================
// Attribute Values
// =============================================================================

/// A single attribute value in a movie or preference map.
///
/// Values deserialize from any JSON value: strings, numbers and booleans map
/// to their own variants, arrays become lists of text (non-string elements
/// are stringified), and nulls become empty text. Nothing is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum AttrValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<String>),
}

impl AttrValue {
    /// Borrow the text content of a `Text` value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Borrow the integer content of an `Int` value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Append the lowercase flattened form of this value to `out`.
    ///
    /// List elements join with single spaces; scalars append the lowercase
    /// of their string form. This is the per-value half of the document
    /// combiner used by the recommender.
    pub fn push_lowercase(&self, out: &mut String) {
        match self {
            AttrValue::Text(text) => out.push_str(&text.to_lowercase()),
            AttrValue::Int(n) => out.push_str(&n.to_string()),
            AttrValue::Float(x) => out.push_str(&x.to_string()),
            AttrValue::Bool(b) => out.push_str(&b.to_string()),
            AttrValue::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    out.push_str(&item.to_lowercase());
                }
            }
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(text) => f.write_str(text),
            AttrValue::Int(n) => write!(f, "{n}"),
            AttrValue::Float(x) => write!(f, "{x}"),
            AttrValue::Bool(b) => write!(f, "{b}"),
            AttrValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

/// Stringify a JSON array element; only strings pass through unquoted.
fn coerce_element(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl From<Value> for AttrValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => AttrValue::Text(text),
            Value::Number(n) => match n.as_i64() {
                Some(i) => AttrValue::Int(i),
                None => AttrValue::Float(n.as_f64().unwrap_or(0.0)),
            },
            Value::Bool(b) => AttrValue::Bool(b),
            Value::Array(items) => {
                AttrValue::List(items.into_iter().map(coerce_element).collect())
            }
            Value::Null => AttrValue::Text(String::new()),
            // Nested objects have no natural flat form; keep their JSON text
            other @ Value::Object(_) => AttrValue::Text(other.to_string()),
        }
    }
}

impl From<AttrValue> for Value {
    fn from(value: AttrValue) -> Self {
        match value {
            AttrValue::Text(text) => Value::String(text),
            AttrValue::Int(n) => Value::Number(n.into()),
            AttrValue::Float(x) => serde_json::Number::from_f64(x)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            AttrValue::Bool(b) => Value::Bool(b),
            AttrValue::List(items) => {
                Value::Array(items.into_iter().map(Value::String).collect())
            }
        }
    }
}

// Conversions so call sites can write plain literals
impl From<&str> for AttrValue {
    fn from(text: &str) -> Self {
        AttrValue::Text(text.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(text: String) -> Self {
        AttrValue::Text(text)
    }
}

impl From<i64> for AttrValue {
    fn from(n: i64) -> Self {
        AttrValue::Int(n)
    }
}

impl From<i32> for AttrValue {
    fn from(n: i32) -> Self {
        AttrValue::Int(n as i64)
    }
}

impl From<f64> for AttrValue {
    fn from(x: f64) -> Self {
        AttrValue::Float(x)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(items: Vec<String>) -> Self {
        AttrValue::List(items)
    }
}

impl From<Vec<&str>> for AttrValue {
    fn from(items: Vec<&str>) -> Self {
        AttrValue::List(items.into_iter().map(String::from).collect())
    }
}

// =============================================================================
// Attributes - An Insertion-Ordered Map
// =============================================================================

/// An attribute map that remembers insertion order.
///
/// Order matters here: the recommender flattens attribute values into a text
/// document in map order, so two runs over the same data must walk the same
/// sequence. Setting an existing name replaces its value in place and keeps
/// its original position; new names append at the end.
///
/// Lookups scan the underlying vector. Attribute maps stay small (a dozen
/// entries or so), so a scan beats a hash map plus a separate order index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    entries: Vec<(String, AttrValue)>,
}

impl Attributes {
    /// Creates a new, empty attribute map
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Number of attributes in the map
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Set an attribute, replacing in place if the name already exists
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Get an attribute value by name
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.as_str() == name)
            .map(|(_, value)| value)
    }

    /// Iterate over `(name, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Iterate over values in insertion order
    pub fn values(&self) -> impl Iterator<Item = &AttrValue> {
        self.entries.iter().map(|(_, value)| value)
    }
}

impl FromIterator<(String, AttrValue)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (String, AttrValue)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (name, value) in iter {
            attributes.set(name, value);
        }
        attributes
    }
}

// Serialize as a plain map, preserving entry order
impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// Deserialize from a map, keeping entries in document order
impl<'de> Deserialize<'de> for Attributes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AttributesVisitor;

        impl<'de> Visitor<'de> for AttributesVisitor {
            type Value = Attributes;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of attribute names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut attributes =
                    Attributes::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, value)) = access.next_entry::<String, AttrValue>()? {
                    attributes.set(name, value);
                }
                Ok(attributes)
            }
        }

        deserializer.deserialize_map(AttributesVisitor)
    }
}

// =============================================================================
// Movie
// =============================================================================

/// A movie in the catalog: an id plus its attribute map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub attributes: Attributes,
}

impl Movie {
    pub fn new(id: MovieId, attributes: Attributes) -> Self {
        Self { id, attributes }
    }

    /// The movie's title attribute, or [`UNTITLED`] when absent or non-text
    pub fn title(&self) -> &str {
        self.attributes
            .get("title")
            .and_then(AttrValue::as_text)
            .unwrap_or(UNTITLED)
    }
}
