//! Tracing initialization for the server binary.

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// Respects `RUST_LOG`; defaults to `info` for the workspace crates when
/// unset.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,curator_server=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
