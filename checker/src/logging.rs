//! Tracing setup for the checker binary.
//!
//! - `debug`: one event per evaluated pattern (id, classification, rule) and
//!   the size of the selection being checked.
//! - `info`: the effective config and the per-classification summary.
//! - `warn`: a default `checker.toml` that failed to load and was ignored.
//!
//! Everything goes to stderr; stdout carries only the report.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr subscriber. `RUST_LOG` selects the level, `warn` if unset.
///
/// # Example
/// ```bash
/// RUST_LOG=checker=debug cargo run -- check
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
