//! Condition tree produced by the filter compiler.
//!
//! A [`Condition`] is a boolean expression over attribute paths and typed
//! operands. It mirrors the condition grammar DynamoDB accepts in filter
//! expressions: comparisons, `BETWEEN`, `IN`, the built-in functions, and
//! binary `AND` / `OR`. Attribute names and values are stored raw here; the
//! expression builder is responsible for substituting placeholders.

use std::fmt;

use rustack_filter_model::{JoinOperator, TypedValue};

/// Boolean condition over one or more attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Comparison expression: `path op value`.
    Compare {
        /// Attribute path.
        path: String,
        /// Comparison operator.
        op: CompareOp,
        /// Right-hand operand.
        value: TypedValue,
    },
    /// Between expression: `path BETWEEN low AND high`.
    Between {
        /// Attribute path.
        path: String,
        /// Lower bound (inclusive).
        low: TypedValue,
        /// Upper bound (inclusive).
        high: TypedValue,
    },
    /// In expression: `path IN (values...)`.
    In {
        /// Attribute path.
        path: String,
        /// Candidate values.
        values: Vec<TypedValue>,
    },
    /// Function call over a path and an optional operand.
    Function {
        /// Function name.
        name: FunctionName,
        /// Attribute path (first argument).
        path: String,
        /// Second argument, for functions that take one.
        operand: Option<TypedValue>,
    },
    /// Logical combination: `left AND right` or `left OR right`.
    Logical {
        /// Logical operator.
        op: JoinOperator,
        /// Left-hand condition.
        left: Box<Condition>,
        /// Right-hand condition.
        right: Box<Condition>,
    },
}

impl Condition {
    /// Combine `self` and `other` with the given boolean operator.
    #[must_use]
    pub fn combine(self, op: JoinOperator, other: Self) -> Self {
        Self::Logical {
            op,
            left: Box::new(self),
            right: Box::new(other),
        }
    }

    /// Combine with boolean AND.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        self.combine(JoinOperator::And, other)
    }

    /// Combine with boolean OR.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        self.combine(JoinOperator::Or, other)
    }

    /// Number of leaf (non-logical) conditions in the tree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Logical { left, right, .. } => left.leaf_count() + right.leaf_count(),
            _ => 1,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compare { path, op, value } => write!(f, "{path} {op} {value}"),
            Self::Between { path, low, high } => write!(f, "{path} BETWEEN {low} AND {high}"),
            Self::In { path, values } => {
                write!(f, "{path} IN (")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str(")")
            }
            Self::Function {
                name,
                path,
                operand: Some(operand),
            } => write!(f, "{name}({path}, {operand})"),
            Self::Function {
                name,
                path,
                operand: None,
            } => write!(f, "{name}({path})"),
            Self::Logical { op, left, right } => write!(f, "({left} {op} {right})"),
        }
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Equal (`=`).
    Eq,
    /// Not equal (`<>`).
    Ne,
    /// Less than (`<`).
    Lt,
    /// Less than or equal (`<=`).
    Le,
    /// Greater than (`>`).
    Gt,
    /// Greater than or equal (`>=`).
    Ge,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq => write!(f, "="),
            Self::Ne => write!(f, "<>"),
            Self::Lt => write!(f, "<"),
            Self::Le => write!(f, "<="),
            Self::Gt => write!(f, ">"),
            Self::Ge => write!(f, ">="),
        }
    }
}

/// Built-in DynamoDB condition functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionName {
    /// `attribute_exists(path)`.
    AttributeExists,
    /// `attribute_not_exists(path)`.
    AttributeNotExists,
    /// `attribute_type(path, type)`.
    AttributeType,
    /// `begins_with(path, substr)`.
    BeginsWith,
    /// `contains(path, operand)`.
    Contains,
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AttributeExists => write!(f, "attribute_exists"),
            Self::AttributeNotExists => write!(f, "attribute_not_exists"),
            Self::AttributeType => write!(f, "attribute_type"),
            Self::BeginsWith => write!(f, "begins_with"),
            Self::Contains => write!(f, "contains"),
        }
    }
}

/// How many operands a comparator takes from a constraint's `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// No `value` allowed.
    None,
    /// Exactly one value.
    One,
    /// A two-element list.
    Pair,
    /// A non-empty list.
    List,
}

/// A `comparison_operator` a filter constraint may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// `eq`
    Eq,
    /// `ne`
    Ne,
    /// `lt`
    Lt,
    /// `lte`
    Lte,
    /// `gt`
    Gt,
    /// `gte`
    Gte,
    /// `between`
    Between,
    /// `begins_with`
    BeginsWith,
    /// `contains`
    Contains,
    /// `is_in`
    IsIn,
    /// `exists`
    Exists,
    /// `not_exists`
    NotExists,
    /// `attribute_type`
    AttributeType,
}

impl Comparator {
    /// Every supported comparator.
    pub const ALL: &'static [Self] = &[
        Self::Eq,
        Self::Ne,
        Self::Lt,
        Self::Lte,
        Self::Gt,
        Self::Gte,
        Self::Between,
        Self::BeginsWith,
        Self::Contains,
        Self::IsIn,
        Self::Exists,
        Self::NotExists,
        Self::AttributeType,
    ];

    /// Look up a comparator by its `comparison_operator` name.
    ///
    /// Names are matched exactly; there are no aliases.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }

    /// The `comparison_operator` name of this comparator.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Between => "between",
            Self::BeginsWith => "begins_with",
            Self::Contains => "contains",
            Self::IsIn => "is_in",
            Self::Exists => "exists",
            Self::NotExists => "not_exists",
            Self::AttributeType => "attribute_type",
        }
    }

    /// Operand rule of this comparator.
    #[must_use]
    pub fn arity(&self) -> Arity {
        match self {
            Self::Exists | Self::NotExists => Arity::None,
            Self::Between => Arity::Pair,
            Self::IsIn => Arity::List,
            _ => Arity::One,
        }
    }

    /// Build the condition for `path` with the (already coerced) operand.
    ///
    /// Returns a human-readable explanation when the operand does not fit
    /// this comparator's arity rule.
    pub fn apply(&self, path: &str, operand: Option<TypedValue>) -> Result<Condition, String> {
        let path = path.to_owned();

        match (self.arity(), operand) {
            (Arity::None, None) => Ok(Condition::Function {
                name: if *self == Self::Exists {
                    FunctionName::AttributeExists
                } else {
                    FunctionName::AttributeNotExists
                },
                path,
                operand: None,
            }),
            (Arity::None, Some(value)) => Err(format!("takes no value, got {value}")),
            (_, None) => Err("requires a value".to_owned()),
            (Arity::One, Some(value)) => self.apply_one(path, value),
            (Arity::Pair, Some(TypedValue::L(mut bounds))) if bounds.len() == 2 => {
                let high = bounds.pop();
                let low = bounds.pop();
                match (low, high) {
                    (Some(low), Some(high)) => Ok(Condition::Between { path, low, high }),
                    _ => Err("requires a list of two values".to_owned()),
                }
            }
            (Arity::Pair, Some(value)) => {
                Err(format!("requires a list of two values, got {value}"))
            }
            (Arity::List, Some(TypedValue::L(values))) if !values.is_empty() => {
                Ok(Condition::In { path, values })
            }
            (Arity::List, Some(value)) => {
                Err(format!("requires a non-empty list of values, got {value}"))
            }
        }
    }

    fn apply_one(&self, path: String, value: TypedValue) -> Result<Condition, String> {
        let compare = |op| Condition::Compare {
            path: path.clone(),
            op,
            value: value.clone(),
        };
        let function = |name| Condition::Function {
            name,
            path: path.clone(),
            operand: Some(value.clone()),
        };

        match self {
            Self::Eq => Ok(compare(CompareOp::Eq)),
            Self::Ne => Ok(compare(CompareOp::Ne)),
            Self::Lt => Ok(compare(CompareOp::Lt)),
            Self::Lte => Ok(compare(CompareOp::Le)),
            Self::Gt => Ok(compare(CompareOp::Gt)),
            Self::Gte => Ok(compare(CompareOp::Ge)),
            Self::BeginsWith => Ok(function(FunctionName::BeginsWith)),
            Self::Contains => Ok(function(FunctionName::Contains)),
            Self::AttributeType => match value.as_s() {
                Some(tag) if TypedValue::TYPE_DESCRIPTORS.contains(&tag) => {
                    Ok(function(FunctionName::AttributeType))
                }
                _ => Err(format!(
                    "requires one of {} as value, got {value}",
                    TypedValue::TYPE_DESCRIPTORS.join(", ")
                )),
            },
            Self::Between | Self::IsIn | Self::Exists | Self::NotExists => {
                Err("does not take a single value".to_owned())
            }
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
