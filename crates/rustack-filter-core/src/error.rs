//! Error type for filter compilation and scan request assembly.

/// Errors produced while compiling a filter tree or building a scan request.
///
/// Every variant carries enough context to be reported to the user as-is.
/// Compilation is all-or-nothing: no partial expression is returned once an
/// error has been raised.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// A `comparison_operator` does not name a supported comparator.
    #[error("Comparison \"{operator}\" on attribute \"{attribute}\" is not a valid comparison_operator")]
    InvalidComparisonOperator {
        /// The attribute the constraint applies to.
        attribute: String,
        /// The unrecognized operator string.
        operator: String,
    },
    /// A known comparator was given operands it cannot take.
    #[error("Error constructing {operator} condition on attribute \"{attribute}\": {message}")]
    ConditionConstruction {
        /// The attribute the constraint applies to.
        attribute: String,
        /// The comparator name.
        operator: String,
        /// Explanation.
        message: String,
    },
    /// The condition tree could not be serialized into an expression.
    #[error("Error building condition expression for `{condition}`: {message}")]
    ExpressionBuild {
        /// Description of the failing sub-condition.
        condition: String,
        /// Explanation.
        message: String,
    },
    /// The filter tree does not have the expected shape.
    #[error("Malformed filter entry \"{key}\": {message}")]
    MalformedFilter {
        /// The key of the offending entry.
        key: String,
        /// Explanation.
        message: String,
    },
    /// A scan parameter is missing or inconsistent.
    #[error("Invalid scan parameter: {0}")]
    InvalidParameter(String),
}

/// Convenience result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;
