//! DynamoDB filter compiler for Rustack.
//!
//! Turns a user-authored filter tree into a DynamoDB filter expression with
//! name and value placeholders, and strips type descriptors from scan
//! results. The pipeline is:
//!
//! 1. **Coercion**: infer typed values for filter literals ([`coerce`]).
//! 2. **Compilation**: walk the filter tree into a [`Condition`] tree
//!    ([`compile`]).
//! 3. **Building**: serialize the condition tree into a
//!    [`CompiledExpression`] ([`ExpressionBuilder`]).
//!
//! [`simplify`] and [`build_scan_input`] sit at the request/response
//! boundary.
#![allow(clippy::doc_markdown, clippy::module_name_repetitions)]

pub mod builder;
pub mod coerce;
pub mod compiler;
pub mod condition;
pub mod config;
pub mod error;
pub mod request;
pub mod simplify;

use rustack_filter_model::{FilterNode, JoinOperator};

pub use builder::{CompiledExpression, ExpressionBuilder};
pub use coerce::coerce;
pub use compiler::{compile, compile_filters};
pub use condition::{Comparator, Condition};
pub use config::FilterConfig;
pub use error::{FilterError, FilterResult};
pub use request::build_scan_input;
pub use simplify::{simplify, simplify_item, simplify_items};

/// Compile a filter tree and build its expression in one step.
///
/// Returns `Ok(None)` when the tree contains no entries.
pub fn compile_filter_expression(
    nodes: &[FilterNode],
    join: JoinOperator,
) -> FilterResult<Option<CompiledExpression>> {
    compile(nodes, join)?
        .map(|condition| ExpressionBuilder::new().build(&condition))
        .transpose()
}
