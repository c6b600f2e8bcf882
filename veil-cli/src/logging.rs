//! Logging setup for the veil binary.
//!
//! Logging is off unless requested through the environment:
//!
//! - `VEIL_DEBUG=true|1|yes` - enable debug logging
//! - `VEIL_LOG_LEVEL=trace|debug|info|warn|error` - set a specific level
//! - `VEIL_LOG_FORMAT=compact|pretty|json` - output format (default: compact)
//!
//! Log lines are written to stderr so they never mix with schema output.

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

/// Check if debug logging is enabled via `VEIL_DEBUG`.
pub fn is_debug_enabled() -> bool {
    debug_flag(env::var("VEIL_DEBUG").ok().as_deref())
}

/// The configured log level, from `VEIL_LOG_LEVEL` or `VEIL_DEBUG`.
pub fn get_log_level() -> &'static str {
    log_level(env::var("VEIL_LOG_LEVEL").ok().as_deref(), is_debug_enabled())
}

/// The configured log format, from `VEIL_LOG_FORMAT`.
pub fn get_log_format() -> &'static str {
    log_format(env::var("VEIL_LOG_FORMAT").ok().as_deref())
}

fn debug_flag(value: Option<&str>) -> bool {
    value
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

fn log_level(requested: Option<&str>, debug: bool) -> &'static str {
    let fallback = if debug { "debug" } else { "warn" };
    match requested.map(str::to_lowercase).as_deref() {
        Some("trace") => "trace",
        Some("debug") => "debug",
        Some("info") => "info",
        Some("warn") => "warn",
        Some("error") => "error",
        _ => fallback,
    }
}

fn log_format(requested: Option<&str>) -> &'static str {
    match requested.map(str::to_lowercase).as_deref() {
        Some("pretty") => "pretty",
        Some("json") => "json",
        _ => "compact",
    }
}

/// Initialize logging. Subsequent calls are no-ops.
pub fn init() {
    INIT.call_once(|| {
        if !is_debug_enabled() && env::var("VEIL_LOG_LEVEL").is_err() {
            return;
        }

        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        let level = get_log_level();
        let filter = EnvFilter::try_new(format!(
            "veil={level},veil_cli={level},veil_core={level},veil_schema={level}"
        ))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

        let layer = fmt::layer().with_writer(std::io::stderr);
        match get_log_format() {
            "json" => tracing_subscriber::registry()
                .with(filter)
                .with(layer.json())
                .init(),
            "pretty" => tracing_subscriber::registry()
                .with(filter)
                .with(layer.pretty())
                .init(),
            _ => tracing_subscriber::registry()
                .with(filter)
                .with(layer.compact())
                .init(),
        }

        tracing::info!(
            level = level,
            format = get_log_format(),
            "Veil logging initialized"
        );
    });
}
