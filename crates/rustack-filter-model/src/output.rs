//! DynamoDB `Scan` response.
//!
//! Items are kept as untyped JSON records so that they can be forwarded
//! unchanged or simplified.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single scanned item: attribute name → typed value.
pub type Item = serde_json::Map<String, Value>;

/// Output for the `Scan` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScanOutput {
    /// The items that matched the scan conditions.
    #[serde(default)]
    pub items: Vec<Item>,

    /// The number of items in the response.
    #[serde(default)]
    pub count: i32,

    /// The number of items evaluated before the filter expression was applied.
    #[serde(default)]
    pub scanned_count: i32,

    /// The primary key of the item where the scan operation stopped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_evaluated_key: Option<Item>,
}
