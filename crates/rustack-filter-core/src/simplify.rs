//! Removal of DynamoDB type descriptors from scan results.
//!
//! Unwrapping is decided by shape alone: any object with exactly one key is
//! treated as a type wrapper such as `{"S": "value"}` and replaced by its
//! (simplified) payload. Objects with any other number of keys keep their
//! keys. A record that has a single attribute therefore collapses when
//! passed to [`simplify`]; use [`simplify_item`] / [`simplify_items`] for
//! scan records, which keep attribute names.

use rustack_filter_model::Item;
use serde_json::Value;

/// Strip type descriptors from a JSON tree.
#[must_use]
pub fn simplify(node: &Value) -> Value {
    match node {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| match item {
                    Value::Array(_) | Value::Object(_) => simplify(item),
                    scalar => scalar.clone(),
                })
                .collect(),
        ),
        Value::Object(map) if map.len() == 1 => match map.values().next() {
            Some(inner) => simplify(inner),
            None => node.clone(),
        },
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), simplify(value)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Strip type descriptors from every attribute of a scan record.
#[must_use]
pub fn simplify_item(item: &Item) -> Item {
    item.iter()
        .map(|(name, value)| (name.clone(), simplify(value)))
        .collect()
}

/// Strip type descriptors from a list of scan records.
#[must_use]
pub fn simplify_items(items: &[Item]) -> Vec<Item> {
    items.iter().map(simplify_item).collect()
}
