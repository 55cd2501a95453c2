//! Integration tests for the Rustack DynamoDB filter compiler.
//!
//! `test_filter` runs offline against the public API. `test_scan` executes
//! compiled filters against a running DynamoDB-compatible server at
//! `localhost:4566`; those tests are marked `#[ignore]` so they don't run
//! during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! cargo test -p rustack-filter-integration -- --ignored
//! ```

use std::collections::HashMap;
use std::sync::Once;

use anyhow::{Context, Result, bail};
use aws_sdk_dynamodb::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue;
use base64::Engine;
use rustack_filter_core::compile_filter_expression;
use rustack_filter_model::{FilterNode, Item, JoinOperator, TypedValue};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Endpoint URL for the server.
fn endpoint_url() -> String {
    std::env::var("DYNAMODB_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:4566".to_owned())
}

/// Create a configured DynamoDB client pointing at the local server.
#[must_use]
pub fn dynamodb_client() -> aws_sdk_dynamodb::Client {
    init_tracing();

    let creds = Credentials::new("test", "test", None, None, "integration-test");

    let config = aws_sdk_dynamodb::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(creds)
        .endpoint_url(endpoint_url())
        .build();

    aws_sdk_dynamodb::Client::from_conf(config)
}

/// Generate a unique table name for a DynamoDB test.
#[must_use]
pub fn test_table_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("test-{prefix}-{id}")
}

fn decode_blob(encoded: &str) -> Result<Blob> {
    base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map(Blob::new)
        .with_context(|| format!("invalid base64 binary value: {encoded}"))
}

/// Convert a compiled typed value into the SDK representation.
pub fn to_sdk_value(value: &TypedValue) -> Result<AttributeValue> {
    Ok(match value {
        TypedValue::S(s) => AttributeValue::S(s.clone()),
        TypedValue::N(n) => AttributeValue::N(n.clone()),
        TypedValue::B(b) => AttributeValue::B(decode_blob(b)?),
        TypedValue::Ss(v) => AttributeValue::Ss(v.clone()),
        TypedValue::Ns(v) => AttributeValue::Ns(v.clone()),
        TypedValue::Bs(v) => {
            AttributeValue::Bs(v.iter().map(|b| decode_blob(b)).collect::<Result<_>>()?)
        }
        TypedValue::Bool(b) => AttributeValue::Bool(*b),
        TypedValue::Null(b) => AttributeValue::Null(*b),
        TypedValue::L(items) => {
            AttributeValue::L(items.iter().map(to_sdk_value).collect::<Result<_>>()?)
        }
        TypedValue::M(m) => AttributeValue::M(
            m.iter()
                .map(|(k, v)| Ok((k.clone(), to_sdk_value(v)?)))
                .collect::<Result<_>>()?,
        ),
        TypedValue::Raw(v) => bail!("untagged value {v} cannot be sent to DynamoDB"),
    })
}

/// Convert an SDK value into the typed wire representation.
#[must_use]
pub fn from_sdk_value(value: &AttributeValue) -> TypedValue {
    let encode = |b: &Blob| base64::engine::general_purpose::STANDARD.encode(b.as_ref());

    match value {
        AttributeValue::S(s) => TypedValue::S(s.clone()),
        AttributeValue::N(n) => TypedValue::N(n.clone()),
        AttributeValue::B(b) => TypedValue::B(encode(b)),
        AttributeValue::Ss(v) => TypedValue::Ss(v.clone()),
        AttributeValue::Ns(v) => TypedValue::Ns(v.clone()),
        AttributeValue::Bs(v) => TypedValue::Bs(v.iter().map(encode).collect()),
        AttributeValue::Bool(b) => TypedValue::Bool(*b),
        AttributeValue::Null(b) => TypedValue::Null(*b),
        AttributeValue::L(items) => TypedValue::L(items.iter().map(from_sdk_value).collect()),
        AttributeValue::M(m) => TypedValue::M(
            m.iter()
                .map(|(k, v)| (k.clone(), from_sdk_value(v)))
                .collect(),
        ),
        _ => TypedValue::Raw(serde_json::Value::Null),
    }
}

/// Convert an SDK item into a JSON scan record.
#[must_use]
pub fn from_sdk_item(item: &HashMap<String, AttributeValue>) -> Item {
    item.iter()
        .map(|(k, v)| (k.clone(), from_sdk_value(v).to_json()))
        .collect()
}

/// Scan `table` with a compiled filter tree and return the raw records.
pub async fn scan_with_filter(
    client: &aws_sdk_dynamodb::Client,
    table: &str,
    nodes: &[FilterNode],
    join: JoinOperator,
) -> Result<Vec<Item>> {
    let mut request = client.scan().table_name(table);

    if let Some(compiled) = compile_filter_expression(nodes, join)? {
        let values = compiled
            .attribute_value_placeholders
            .iter()
            .map(|(k, v)| Ok((k.clone(), to_sdk_value(v)?)))
            .collect::<Result<HashMap<_, _>>>()?;
        request = request
            .filter_expression(compiled.condition_expression)
            .set_expression_attribute_names(Some(
                compiled.attribute_name_placeholders.into_iter().collect(),
            ))
            .set_expression_attribute_values(Some(values));
    }

    let response = request
        .send()
        .await
        .with_context(|| format!("scan of {table} failed"))?;
    Ok(response.items().iter().map(from_sdk_item).collect())
}

mod test_filter;
