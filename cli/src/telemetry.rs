#![deny(missing_docs)]

//! # Telemetry
//!
//! Installs the `tracing` subscriber. Logs go to stderr so stdout only ever
//! carries the dump.

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Initializes stderr logging with `filter` (an `EnvFilter` directive such as
/// `warn` or `typegen_core=debug`).
pub fn init_tracing(filter: &str) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}
