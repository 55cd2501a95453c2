//! User-authored filter tree types.
//!
//! A filter tree is an ordered list of [`FilterNode`]s. Each node is a JSON
//! object whose keys are attribute names or the grouping keywords `AND` /
//! `OR`. The tree is kept as untyped JSON because the meaning of a key is
//! decided by the shape of its value; the compiler classifies entries while
//! walking the tree.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of a filter tree: attribute name or grouping keyword → value.
pub type FilterNode = serde_json::Map<String, Value>;

/// Key of an explicit constraint object for the comparison operator.
pub const COMPARISON_OPERATOR_KEY: &str = "comparison_operator";

/// Key of an explicit constraint object for the operand.
pub const VALUE_KEY: &str = "value";

/// Comparison operator applied when a constraint does not name one.
pub const DEFAULT_COMPARISON_OPERATOR: &str = "eq";

/// Boolean operator used to combine sibling conditions at one nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JoinOperator {
    /// All siblings must match.
    #[default]
    And,
    /// Any sibling may match.
    Or,
}

impl JoinOperator {
    /// Resolve a join operator from a grouping keyword or `join_type` value.
    ///
    /// Only `or` (any case) selects [`JoinOperator::Or`]; every other string
    /// falls back to [`JoinOperator::And`].
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Self {
        if keyword.eq_ignore_ascii_case("or") {
            Self::Or
        } else {
            Self::And
        }
    }

    /// Returns `true` if `key` is one of the grouping keywords `AND` / `OR`.
    #[must_use]
    pub fn is_grouping_keyword(key: &str) -> bool {
        key.eq_ignore_ascii_case("and") || key.eq_ignore_ascii_case("or")
    }

    /// Returns the expression keyword (`AND` / `OR`).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl From<String> for JoinOperator {
    fn from(value: String) -> Self {
        Self::from_keyword(&value)
    }
}

impl From<JoinOperator> for String {
    fn from(value: JoinOperator) -> Self {
        value.as_str().to_owned()
    }
}

impl fmt::Display for JoinOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a filter tree from JSON text.
pub fn parse_filter_tree(json: &str) -> Result<Vec<FilterNode>, serde_json::Error> {
    serde_json::from_str(json)
}
