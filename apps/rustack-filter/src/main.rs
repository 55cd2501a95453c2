//! Rustack Filter - compile DynamoDB scan filters from the command line.
//!
//! Reads user-authored scan parameters (table, projection, filter tree) and
//! prints the corresponding DynamoDB `Scan` request, ready for
//! `aws dynamodb scan --cli-input-json`. The other commands render the items
//! of a `Scan` response, with type descriptors stripped (`simplify`) or as
//! the params file asks (`items`).
//!
//! # Usage
//!
//! ```text
//! rustack-filter compile <params.json|->
//! rustack-filter simplify <response.json|->
//! rustack-filter items <response.json|-> [params.json]
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `FILTER_JOIN_TYPE` | `and` | Join operator for top-level filter entries |
//! | `FILTER_SIMPLIFY` | `false` | Simplify items when no params file is given |
//! | `LOG_LEVEL` | `warn` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use rustack_filter_core::{FilterConfig, build_scan_input, simplify_items};
use rustack_filter_model::{ScanOutput, ScanParams};
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: rustack-filter compile <params.json|->\n       rustack-filter simplify <response.json|->\n       rustack-filter items <response.json|-> [params.json]";

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Read a file, or stdin when `source` is `-`.
fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(Path::new(source)).with_context(|| format!("failed to read {source}"))
}

fn parse_params(json: &str) -> Result<ScanParams> {
    serde_json::from_str(json).context("invalid scan parameters")
}

/// Compile scan parameters into a pretty-printed `Scan` request.
fn compile_request(params_json: &str, config: &FilterConfig) -> Result<String> {
    let params = parse_params(params_json)?;
    let input = build_scan_input(&params, config.default_join)
        .with_context(|| format!("failed to build scan request for table {}", params.table_name))?;
    info!(
        table = %input.table_name,
        names = input.expression_attribute_names.len(),
        values = input.expression_attribute_values.len(),
        "compiled scan request"
    );
    serde_json::to_string_pretty(&input).context("failed to serialize scan request")
}

/// Render the items of a `Scan` response as `{"Items": [...]}`.
fn render_items(response_json: &str, simplify: bool) -> Result<String> {
    let output: ScanOutput =
        serde_json::from_str(response_json).context("invalid scan response")?;
    debug!(items = output.items.len(), simplify, "rendering scan items");

    let items = if simplify {
        simplify_items(&output.items)
    } else {
        output.items
    };
    serde_json::to_string_pretty(&json!({ "Items": items })).context("failed to serialize items")
}

fn run(args: &[String], config: &FilterConfig) -> Result<String> {
    match args {
        [command, params] if command == "compile" => compile_request(&read_input(params)?, config),
        [command, response] if command == "simplify" => render_items(&read_input(response)?, true),
        [command, response] if command == "items" => {
            render_items(&read_input(response)?, config.simplify)
        }
        [command, response, params] if command == "items" => {
            let simplify = parse_params(&read_input(params)?)?.simplify;
            render_items(&read_input(response)?, simplify)
        }
        _ => bail!("{USAGE}"),
    }
}

fn main() -> Result<()> {
    let config = FilterConfig::from_env();
    init_tracing(&config.log_level)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let rendered = run(&args, &config)?;
    println!("{rendered}");
    Ok(())
}
