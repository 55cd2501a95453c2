//! Scan parameters and the DynamoDB `Scan` request they compile into.
//!
//! [`ScanParams`] is the user-facing shape (snake_case, filter tree and
//! projection list). [`ScanInput`] uses `PascalCase` JSON field naming to
//! match the DynamoDB wire protocol; optional fields are omitted when
//! `None` and empty maps are omitted to produce minimal JSON payloads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attribute_value::TypedValue;
use crate::filter::{FilterNode, JoinOperator};
use crate::types::Select;

/// Attributes to retrieve, given either as an expression or as a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Projection {
    /// A ready-made projection expression, e.g. `"Name, Email"`.
    Expression(String),
    /// Attribute paths joined with `", "`.
    Attributes(Vec<String>),
}

impl Projection {
    /// Render the projection as a DynamoDB projection expression.
    #[must_use]
    pub fn to_expression(&self) -> String {
        match self {
            Self::Expression(expr) => expr.clone(),
            Self::Attributes(attrs) => attrs.join(", "),
        }
    }

    /// Returns `true` if the projection names no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Expression(expr) => expr.trim().is_empty(),
            Self::Attributes(attrs) => attrs.is_empty(),
        }
    }
}

/// User-authored parameters of a filtered table scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanParams {
    /// The name of the table to scan.
    pub table_name: String,

    /// The name of a secondary index to scan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,

    /// The maximum number of items to evaluate (not necessarily the number of
    /// matching items).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,

    /// The attributes to be returned in the result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<Select>,

    /// The attributes to retrieve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection_expression: Option<Projection>,

    /// Filter tree applied to the scanned items.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filter_expression: Vec<FilterNode>,

    /// How top-level filter entries combine. Falls back to the configured
    /// default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_type: Option<JoinOperator>,

    /// Strip type descriptors from the returned items.
    #[serde(default)]
    pub simplify: bool,
}

/// Input for the `Scan` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScanInput {
    /// The name of the table to scan.
    pub table_name: String,

    /// The name of a secondary index to scan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,

    /// A string that contains conditions for filtering the scan results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_expression: Option<String>,

    /// A string that identifies the attributes to retrieve from the table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection_expression: Option<String>,

    /// Substitution tokens for attribute names in an expression.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub expression_attribute_names: BTreeMap<String, String>,

    /// Substitution tokens for attribute values in an expression.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub expression_attribute_values: BTreeMap<String, TypedValue>,

    /// The maximum number of items to evaluate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,

    /// The attributes to be returned in the result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<Select>,
}
