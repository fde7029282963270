//! Telemetry
//!
//! Structured logging for buffer and trace operations. Library code only
//! emits `tracing` events; the binary decides whether a subscriber exists.
//! - Configurable log levels via RUST_LOG
//! - `--verbose` forces debug output for this crate, overriding RUST_LOG

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used by `--verbose`.
pub const VERBOSE_FILTER: &str = "overrun=debug";

/// Initialize global tracing subscriber.
/// Only enables tracing if RUST_LOG is set or `verbose` is requested, so
/// trace output on stdout stays clean.
pub fn init_tracing(verbose: bool) {
    if let Some(filter) = resolve_filter(verbose, std::env::var("RUST_LOG").ok()) {
        init_tracing_with_filter(&filter);
    }
}

/// `--verbose` wins over RUST_LOG; with neither, tracing stays off.
pub fn resolve_filter(verbose: bool, rust_log: Option<String>) -> Option<String> {
    if verbose {
        Some(VERBOSE_FILTER.to_string())
    } else {
        rust_log.filter(|f| !f.is_empty())
    }
}

/// Initialize with custom filter string
pub fn init_tracing_with_filter(filter: &str) {
    // Skip if already initialized
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_file(false)
            .with_line_number(false)
            .with_level(true)
            .compact()
            .with_writer(std::io::stderr);

        let filter_layer = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

        let _ = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init();
    });
}
