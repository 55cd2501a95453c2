//! DynamoDB filter and scan wire types for Rustack.
//!
//! This crate holds the data shapes shared by the filter compiler and its
//! callers: the typed value union, the user-authored filter tree, and the
//! `Scan` request/response types. Logic lives in `rustack-filter-core`.
// "DynamoDB" appears in virtually every doc comment in this crate.
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]

pub mod attribute_value;
pub mod filter;
pub mod input;
pub mod output;
pub mod types;

pub use attribute_value::TypedValue;
pub use filter::{FilterNode, JoinOperator};
pub use input::{Projection, ScanInput, ScanParams};
pub use output::{Item, ScanOutput};
pub use types::Select;
