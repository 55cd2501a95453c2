//! Serialization of condition trees into DynamoDB filter expressions.
//!
//! The builder never inlines attribute names or values. Every attribute path
//! segment is replaced with a `#n<i>` name placeholder (reused when the same
//! name appears again) and every operand with a fresh `:v<i>` value
//! placeholder.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

use rustack_filter_model::TypedValue;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::condition::Condition;
use crate::error::{FilterError, FilterResult};

/// Prefix of generated attribute name placeholders.
pub const NAME_PLACEHOLDER_PREFIX: &str = "#n";

/// Prefix of generated attribute value placeholders.
pub const VALUE_PLACEHOLDER_PREFIX: &str = ":v";

/// A compiled filter expression with its placeholder substitutions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledExpression {
    /// Expression template referencing only placeholders.
    pub condition_expression: String,
    /// Name placeholder → attribute name.
    pub attribute_name_placeholders: BTreeMap<String, String>,
    /// Value placeholder → typed value.
    pub attribute_value_placeholders: BTreeMap<String, TypedValue>,
}

/// Builds [`CompiledExpression`]s from condition trees.
///
/// The builder holds no state between calls; placeholders restart at zero
/// for every expression.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionBuilder;

impl ExpressionBuilder {
    /// Create a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Serialize `condition` into an expression template and its two
    /// placeholder maps.
    pub fn build(&self, condition: &Condition) -> FilterResult<CompiledExpression> {
        let mut placeholders = Placeholders::default();
        let condition_expression = placeholders.render(condition)?;

        debug!(
            names = placeholders.names.len(),
            values = placeholders.values.len(),
            "built condition expression"
        );

        Ok(CompiledExpression {
            condition_expression,
            attribute_name_placeholders: placeholders.names,
            attribute_value_placeholders: placeholders.values,
        })
    }
}

/// A single element in an attribute path.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PathElement {
    /// A named attribute.
    Attribute(String),
    /// A list index dereference (e.g., `[0]`).
    Index(usize),
}

/// Split a document path such as `info.tags[2]` into its elements.
fn parse_path(path: &str) -> Result<Vec<PathElement>, String> {
    let mut elements = Vec::new();

    for segment in path.split('.') {
        let (name, mut rest) = match segment.find('[') {
            Some(pos) => segment.split_at(pos),
            None => (segment, ""),
        };
        if name.is_empty() {
            return Err(format!("empty attribute name in path \"{path}\""));
        }
        elements.push(PathElement::Attribute(name.to_owned()));

        while !rest.is_empty() {
            let Some(close) = rest.find(']') else {
                return Err(format!("unclosed list index in path \"{path}\""));
            };
            let index = rest[1..close]
                .parse::<usize>()
                .map_err(|_| format!("invalid list index \"{}\" in path \"{path}\"", &rest[1..close]))?;
            elements.push(PathElement::Index(index));
            rest = &rest[close + 1..];
            if !rest.is_empty() && !rest.starts_with('[') {
                return Err(format!("unexpected \"{rest}\" after list index in path \"{path}\""));
            }
        }
    }

    Ok(elements)
}

#[derive(Debug, Default)]
struct Placeholders {
    by_name: HashMap<String, String>,
    names: BTreeMap<String, String>,
    values: BTreeMap<String, TypedValue>,
}

impl Placeholders {
    fn render(&mut self, condition: &Condition) -> FilterResult<String> {
        let leaf_error = |message: String| FilterError::ExpressionBuild {
            condition: condition.to_string(),
            message,
        };

        match condition {
            Condition::Compare { path, op, value } => {
                let path = self.path(path).map_err(leaf_error)?;
                let value = self.value(value);
                Ok(format!("{path} {op} {value}"))
            }
            Condition::Between { path, low, high } => {
                let path = self.path(path).map_err(leaf_error)?;
                let low = self.value(low);
                let high = self.value(high);
                Ok(format!("{path} BETWEEN {low} AND {high}"))
            }
            Condition::In { path, values } => {
                let path = self.path(path).map_err(leaf_error)?;
                let values: Vec<String> = values.iter().map(|v| self.value(v)).collect();
                Ok(format!("{path} IN ({})", values.join(", ")))
            }
            Condition::Function {
                name,
                path,
                operand,
            } => {
                let path = self.path(path).map_err(leaf_error)?;
                match operand {
                    Some(operand) => {
                        let operand = self.value(operand);
                        Ok(format!("{name}({path}, {operand})"))
                    }
                    None => Ok(format!("{name}({path})")),
                }
            }
            Condition::Logical { op, left, right } => {
                let left = self.render(left)?;
                let right = self.render(right)?;
                Ok(format!("({left} {op} {right})"))
            }
        }
    }

    fn path(&mut self, path: &str) -> Result<String, String> {
        let mut rendered = String::new();
        for element in parse_path(path)? {
            match element {
                PathElement::Attribute(name) => {
                    if !rendered.is_empty() {
                        rendered.push('.');
                    }
                    rendered.push_str(&self.name(name));
                }
                PathElement::Index(index) => {
                    let _ = write!(rendered, "[{index}]");
                }
            }
        }
        Ok(rendered)
    }

    fn name(&mut self, name: String) -> String {
        if let Some(placeholder) = self.by_name.get(&name) {
            return placeholder.clone();
        }
        let placeholder = format!("{NAME_PLACEHOLDER_PREFIX}{}", self.names.len());
        self.names.insert(placeholder.clone(), name.clone());
        self.by_name.insert(name, placeholder.clone());
        placeholder
    }

    fn value(&mut self, value: &TypedValue) -> String {
        let placeholder = format!("{VALUE_PLACEHOLDER_PREFIX}{}", self.values.len());
        self.values.insert(placeholder.clone(), value.clone());
        placeholder
    }
}
