//! Filter compiler configuration.
//!
//! All configuration is driven by environment variables, matching the other
//! Rustack services.

use std::env;

use rustack_filter_model::JoinOperator;

/// Filter compiler configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Join operator for top-level filter entries when a request sets none.
    pub default_join: JoinOperator,
    /// Simplify scan results by default.
    pub simplify: bool,
    /// Log level filter.
    pub log_level: String,
}

impl FilterConfig {
    /// Create configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_join: env::var("FILTER_JOIN_TYPE")
                .map_or(defaults.default_join, |v| JoinOperator::from_keyword(&v)),
            simplify: env_bool("FILTER_SIMPLIFY", defaults.simplify),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            default_join: JoinOperator::And,
            simplify: false,
            log_level: "warn".to_owned(),
        }
    }
}

fn env_bool(key: &str, default: bool) -> bool {
    env::var(key).map_or(default, |v| {
        matches!(v.as_str(), "1" | "true" | "yes" | "TRUE" | "YES")
    })
}
