#![forbid(unsafe_code)]

//! Structured logging glue.
//!
//! With the `tracing` feature the usual macros are re-exported so call sites
//! can write `spotlight_core::debug!(..)`. With `tracing-json`, [`init_json`]
//! installs a JSON subscriber filtered by `RUST_LOG` (default `info`).

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Install a process-wide JSON subscriber.
///
/// Returns `false` if a global subscriber was already set.
#[cfg(feature = "tracing-json")]
pub fn init_json() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(true)
        .try_init()
        .is_ok()
}
