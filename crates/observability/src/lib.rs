//! Tracing/logging setup shared by the service binary and tests.
//!
//! The engine itself stays free of observability concerns; the api layer
//! records rejected operations and placed orders through `tracing`, and
//! this crate wires the subscriber.

use tracing_subscriber::EnvFilter;

/// Initialize process-wide tracing/logging.
///
/// JSON lines to stdout, filtered via `RUST_LOG` (default `info`). Safe to
/// call multiple times; subsequent calls become no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
