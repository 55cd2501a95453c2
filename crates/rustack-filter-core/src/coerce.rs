//! Literal → typed value inference.

use rustack_filter_model::TypedValue;
use serde_json::Value;

/// Infer the DynamoDB typed representation of a filter literal.
///
/// Strings become `S`, integers become `N`, arrays become `L` with every
/// member coerced. Objects that already carry a DynamoDB type tag are taken
/// as that typed value. Everything else (floats, booleans, null, untagged
/// objects) is forwarded as [`TypedValue::Raw`] for the store to validate.
///
/// The input is only borrowed; a fresh value is always returned.
#[must_use]
pub fn coerce(literal: &Value) -> TypedValue {
    match literal {
        Value::String(s) => TypedValue::S(s.clone()),
        Value::Number(n) if n.is_i64() || n.is_u64() => TypedValue::N(n.to_string()),
        Value::Array(items) => TypedValue::L(items.iter().map(coerce).collect()),
        other => TypedValue::from_tagged(other).unwrap_or_else(|| TypedValue::Raw(other.clone())),
    }
}
