//! Recursive-descent compiler from filter trees to condition trees.
//!
//! Each entry of a [`FilterNode`] is classified by the shape of its value:
//!
//! - a list whose first element is a string, under an attribute name, is a
//!   membership test (`attr IN (...)`);
//! - any other list opens a nested level, combined with the operator named
//!   by the key (`OR` selects OR, anything else AND);
//! - an object with `comparison_operator` and/or `value` is an explicit
//!   constraint;
//! - any other value is equality shorthand.
//!
//! Siblings at one level are folded left-to-right with that level's join
//! operator.

use rustack_filter_model::filter::{
    COMPARISON_OPERATOR_KEY, DEFAULT_COMPARISON_OPERATOR, FilterNode, VALUE_KEY,
};
use rustack_filter_model::{JoinOperator, TypedValue};
use serde_json::Value;
use tracing::{debug, trace};

use crate::coerce::coerce;
use crate::condition::{Comparator, Condition};
use crate::error::{FilterError, FilterResult};

/// Maximum nesting depth of grouping keywords.
///
/// Set above what `serde_json`'s recursion limit lets a parsed tree reach,
/// so the cap only applies to trees built in code.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Comparator name used for list shorthand.
const MEMBERSHIP_OPERATOR: &str = "is_in";

/// Compile a filter tree, joining top-level entries with AND.
pub fn compile_filters(nodes: &[FilterNode]) -> FilterResult<Option<Condition>> {
    compile(nodes, JoinOperator::And)
}

/// Compile a filter tree into a single condition.
///
/// Returns `Ok(None)` when the tree contains no entries.
pub fn compile(nodes: &[FilterNode], join: JoinOperator) -> FilterResult<Option<Condition>> {
    compile_level(nodes.iter(), join, 0)
}

fn compile_level<'a, I>(nodes: I, join: JoinOperator, depth: usize) -> FilterResult<Option<Condition>>
where
    I: IntoIterator<Item = &'a FilterNode>,
{
    let mut combined: Option<Condition> = None;
    let mut entries = 0usize;

    for node in nodes {
        for (key, value) in node {
            entries += 1;
            let Some(condition) = compile_entry(key, value, depth)? else {
                continue;
            };
            combined = Some(match combined.take() {
                None => condition,
                Some(acc) => acc.combine(join, condition),
            });
        }
    }

    debug!(depth, %join, entries, "compiled filter level");
    Ok(combined)
}

fn compile_entry(key: &str, value: &Value, depth: usize) -> FilterResult<Option<Condition>> {
    let grouping = JoinOperator::is_grouping_keyword(key);

    match value {
        Value::Array(items) => match items.first() {
            Some(Value::String(_)) if !grouping => {
                build_condition(key, MEMBERSHIP_OPERATOR, Some(value)).map(Some)
            }
            None if !grouping => Err(malformed(key, "membership list is empty")),
            _ => compile_group(key, items, depth + 1),
        },
        _ if grouping => Err(malformed(
            key,
            "grouping keyword requires a list of filter entries",
        )),
        Value::Object(constraint) if is_constraint(constraint) => {
            compile_constraint(key, constraint).map(Some)
        }
        literal => build_condition(key, DEFAULT_COMPARISON_OPERATOR, Some(literal)).map(Some),
    }
}

fn compile_group(key: &str, items: &[Value], depth: usize) -> FilterResult<Option<Condition>> {
    if depth > MAX_NESTING_DEPTH {
        return Err(malformed(
            key,
            &format!("nesting exceeds the maximum depth of {MAX_NESTING_DEPTH}"),
        ));
    }

    let nodes = items
        .iter()
        .map(|item| match item {
            Value::Object(node) => Ok(node),
            other => Err(malformed(
                key,
                &format!("expected a filter entry object, found {other}"),
            )),
        })
        .collect::<FilterResult<Vec<_>>>()?;

    compile_level(nodes, JoinOperator::from_keyword(key), depth)
}

/// An object is an explicit constraint if it names an operator or a value.
/// Other objects (typically pre-tagged values such as `{"S": "x"}`) are
/// equality shorthand.
fn is_constraint(object: &FilterNode) -> bool {
    object.contains_key(COMPARISON_OPERATOR_KEY) || object.contains_key(VALUE_KEY)
}

fn compile_constraint(attribute: &str, constraint: &FilterNode) -> FilterResult<Condition> {
    let operator = match constraint.get(COMPARISON_OPERATOR_KEY) {
        None => DEFAULT_COMPARISON_OPERATOR,
        Some(Value::String(op)) => op.as_str(),
        Some(other) => {
            return Err(FilterError::InvalidComparisonOperator {
                attribute: attribute.to_owned(),
                operator: other.to_string(),
            });
        }
    };

    let ignored = constraint
        .keys()
        .filter(|k| *k != COMPARISON_OPERATOR_KEY && *k != VALUE_KEY)
        .count();
    if ignored > 0 {
        debug!(attribute, ignored, "ignoring unknown constraint keys");
    }

    build_condition(attribute, operator, constraint.get(VALUE_KEY))
}

fn build_condition(attribute: &str, operator: &str, value: Option<&Value>) -> FilterResult<Condition> {
    let comparator =
        Comparator::from_name(operator).ok_or_else(|| FilterError::InvalidComparisonOperator {
            attribute: attribute.to_owned(),
            operator: operator.to_owned(),
        })?;
    let operand = value.map(coerce);
    trace!(
        attribute,
        %comparator,
        value_type = operand.as_ref().and_then(TypedValue::type_descriptor),
        "resolved comparator"
    );

    comparator
        .apply(attribute, operand)
        .map_err(|message| FilterError::ConditionConstruction {
            attribute: attribute.to_owned(),
            operator: operator.to_owned(),
            message,
        })
}

fn malformed(key: &str, message: &str) -> FilterError {
    FilterError::MalformedFilter {
        key: key.to_owned(),
        message: message.to_owned(),
    }
}
