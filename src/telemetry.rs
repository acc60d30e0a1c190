//! Telemetry helpers for applications embedding `cartesian-rs`.
//!
//! Layout and marker code emits `tracing` events; nothing is printed unless
//! the host installs a subscriber. `init_default_tracing` is a convenience
//! for hosts that do not already have one.

/// Installs a compact `tracing` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Returns `false` when the `telemetry` feature is disabled or when the host
/// already registered a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
