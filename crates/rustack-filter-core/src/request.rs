//! Assembly of DynamoDB `Scan` requests from user scan parameters.

use rustack_filter_model::{JoinOperator, Projection, ScanInput, ScanParams, Select};
use tracing::debug;

use crate::builder::ExpressionBuilder;
use crate::compiler::compile;
use crate::error::{FilterError, FilterResult};

/// Build a `Scan` request from user parameters.
///
/// `default_join` applies when the parameters do not set `join_type`. An
/// empty filter tree leaves the filter expression and both placeholder maps
/// unset.
pub fn build_scan_input(params: &ScanParams, default_join: JoinOperator) -> FilterResult<ScanInput> {
    if params.table_name.trim().is_empty() {
        return Err(FilterError::InvalidParameter(
            "table_name must not be empty".to_owned(),
        ));
    }

    let projection_expression = params
        .projection_expression
        .as_ref()
        .filter(|p| !p.is_empty())
        .map(Projection::to_expression);

    if let (Some(_), Some(select)) = (&projection_expression, params.select) {
        if select != Select::SpecificAttributes {
            return Err(FilterError::InvalidParameter(format!(
                "select must be {} (or omitted) when projection_expression is set, got {select}",
                Select::SpecificAttributes
            )));
        }
    }

    let mut input = ScanInput {
        table_name: params.table_name.clone(),
        index_name: params.index_name.clone(),
        projection_expression,
        limit: params.limit,
        select: params.select,
        ..ScanInput::default()
    };

    let join = params.join_type.unwrap_or(default_join);
    if let Some(condition) = compile(&params.filter_expression, join)? {
        let compiled = ExpressionBuilder::new().build(&condition)?;
        input.filter_expression = Some(compiled.condition_expression);
        input.expression_attribute_names = compiled.attribute_name_placeholders;
        input.expression_attribute_values = compiled.attribute_value_placeholders;
    }

    debug!(
        table = %input.table_name,
        filtered = input.filter_expression.is_some(),
        "built scan input"
    );
    Ok(input)
}
