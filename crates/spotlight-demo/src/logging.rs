//! Log output for the demo binary.

use tracing_subscriber::EnvFilter;

/// Install a stderr fmt subscriber.
///
/// `RUST_LOG` wins over `default_level`. Returns `false` if a global
/// subscriber was already installed.
pub fn init(default_level: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .is_ok()
}

/// Install the JSON subscriber (filter from `RUST_LOG`, default `info`).
pub fn init_json() -> bool {
    spotlight::init_json()
}
