//! Telemetry helpers for applications embedding `race-chart`.
//!
//! The engine only emits `tracing` events; installing a subscriber is left to
//! the host. With the `telemetry` feature enabled, `init_default_tracing`
//! installs a compact `fmt` subscriber driven by `RUST_LOG`.

/// Default filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_TRACING_FILTER: &str = "race_chart=info";

/// Installs a compact `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Returns `false` when the feature is disabled or a global subscriber is
/// already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback_filter(DEFAULT_TRACING_FILTER)
}

/// Same as [`init_default_tracing`] with a caller-provided fallback directive.
#[must_use]
pub fn init_tracing_with_fallback_filter(fallback_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_directive));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directive;
        false
    }
}
