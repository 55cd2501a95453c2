//! DynamoDB typed value with custom serialization.
//!
//! `TypedValue` is the tagged union DynamoDB uses for every attribute value.
//! The JSON wire format uses single-key objects like `{"S": "hello"}`.
//! Values that carry no recognizable tag are kept verbatim in
//! [`TypedValue::Raw`] and left for the store to validate.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// DynamoDB typed attribute value.
///
/// Numbers are always string-encoded to preserve arbitrary precision.
/// Binary payloads stay base64-encoded; they are only forwarded, never
/// decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    /// String value.
    S(String),
    /// Number value (string-encoded for arbitrary precision).
    N(String),
    /// Binary value (base64 text).
    B(String),
    /// String Set.
    Ss(Vec<String>),
    /// Number Set (string-encoded).
    Ns(Vec<String>),
    /// Binary Set (base64 text).
    Bs(Vec<String>),
    /// Boolean value.
    Bool(bool),
    /// Null value.
    Null(bool),
    /// List of typed values.
    L(Vec<TypedValue>),
    /// Map of typed values.
    M(BTreeMap<String, TypedValue>),
    /// Untagged value forwarded as-is.
    Raw(Value),
}

impl TypedValue {
    /// Interpret `value` as an already-tagged DynamoDB value.
    ///
    /// Returns `None` unless `value` is a single-key object whose key is a
    /// DynamoDB type descriptor and whose payload has the matching shape.
    /// `N` accepts either a string or a JSON number. List and map members
    /// that are not tagged themselves are kept as [`TypedValue::Raw`].
    #[must_use]
    pub fn from_tagged(value: &Value) -> Option<Self> {
        let Value::Object(map) = value else {
            return None;
        };
        if map.len() != 1 {
            return None;
        }
        let (tag, inner) = map.iter().next()?;

        match (tag.as_str(), inner) {
            ("S", Value::String(s)) => Some(Self::S(s.clone())),
            ("N", Value::String(n)) => Some(Self::N(n.clone())),
            ("N", Value::Number(n)) => Some(Self::N(n.to_string())),
            ("B", Value::String(b)) => Some(Self::B(b.clone())),
            ("SS", Value::Array(items)) => string_items(items).map(Self::Ss),
            ("NS", Value::Array(items)) => number_items(items).map(Self::Ns),
            ("BS", Value::Array(items)) => string_items(items).map(Self::Bs),
            ("BOOL", Value::Bool(b)) => Some(Self::Bool(*b)),
            ("NULL", Value::Bool(b)) => Some(Self::Null(*b)),
            ("L", Value::Array(items)) => Some(Self::L(items.iter().map(Self::lenient).collect())),
            ("M", Value::Object(members)) => Some(Self::M(
                members
                    .iter()
                    .map(|(k, v)| (k.clone(), Self::lenient(v)))
                    .collect(),
            )),
            _ => None,
        }
    }

    fn lenient(value: &Value) -> Self {
        Self::from_tagged(value).unwrap_or_else(|| Self::Raw(value.clone()))
    }

    /// Returns the string value if this is an `S` variant.
    #[must_use]
    pub fn as_s(&self) -> Option<&str> {
        match self {
            Self::S(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the list if this is an `L` variant.
    #[must_use]
    pub fn as_l(&self) -> Option<&[TypedValue]> {
        match self {
            Self::L(l) => Some(l),
            _ => None,
        }
    }

    /// Every DynamoDB type descriptor, as accepted by `attribute_type`.
    pub const TYPE_DESCRIPTORS: &'static [&'static str] =
        &["S", "SS", "N", "NS", "B", "BS", "BOOL", "NULL", "L", "M"];

    /// Returns the DynamoDB type descriptor string (e.g., "S", "N", "BOOL").
    ///
    /// `Raw` values have no descriptor.
    #[must_use]
    pub fn type_descriptor(&self) -> Option<&'static str> {
        match self {
            Self::S(_) => Some("S"),
            Self::N(_) => Some("N"),
            Self::B(_) => Some("B"),
            Self::Ss(_) => Some("SS"),
            Self::Ns(_) => Some("NS"),
            Self::Bs(_) => Some("BS"),
            Self::Bool(_) => Some("BOOL"),
            Self::Null(_) => Some("NULL"),
            Self::L(_) => Some("L"),
            Self::M(_) => Some("M"),
            Self::Raw(_) => None,
        }
    }

    /// Convert to the JSON wire form.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let tagged = |tag: &str, inner: Value| {
            let mut map = serde_json::Map::with_capacity(1);
            map.insert(tag.to_owned(), inner);
            Value::Object(map)
        };
        let strings = |v: &[String]| Value::Array(v.iter().cloned().map(Value::String).collect());

        match self {
            Self::S(s) => tagged("S", Value::String(s.clone())),
            Self::N(n) => tagged("N", Value::String(n.clone())),
            Self::B(b) => tagged("B", Value::String(b.clone())),
            Self::Ss(v) => tagged("SS", strings(v)),
            Self::Ns(v) => tagged("NS", strings(v)),
            Self::Bs(v) => tagged("BS", strings(v)),
            Self::Bool(b) => tagged("BOOL", Value::Bool(*b)),
            Self::Null(b) => tagged("NULL", Value::Bool(*b)),
            Self::L(items) => tagged("L", Value::Array(items.iter().map(Self::to_json).collect())),
            Self::M(m) => tagged(
                "M",
                Value::Object(m.iter().map(|(k, v)| (k.clone(), v.to_json())).collect()),
            ),
            Self::Raw(v) => v.clone(),
        }
    }
}

fn string_items(items: &[Value]) -> Option<Vec<String>> {
    items
        .iter()
        .map(|item| item.as_str().map(str::to_owned))
        .collect()
}

fn number_items(items: &[Value]) -> Option<Vec<String>> {
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .collect()
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::S(s) => write!(f, "{{S: {s}}}"),
            Self::N(n) => write!(f, "{{N: {n}}}"),
            Self::B(b) => write!(f, "{{B: {} chars}}", b.len()),
            Self::Ss(v) => write!(f, "{{SS: {v:?}}}"),
            Self::Ns(v) => write!(f, "{{NS: {v:?}}}"),
            Self::Bs(v) => write!(f, "{{BS: {} items}}", v.len()),
            Self::Bool(b) => write!(f, "{{BOOL: {b}}}"),
            Self::Null(b) => write!(f, "{{NULL: {b}}}"),
            Self::L(v) => {
                f.write_str("{L: [")?;
                for (i, item) in v.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]}")
            }
            Self::M(m) => write!(f, "{{M: {} keys}}", m.len()),
            Self::Raw(v) => write!(f, "{v}"),
        }
    }
}

impl Serialize for TypedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TypedValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::lenient(&value))
    }
}
