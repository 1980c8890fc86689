//! Logging for Scribe
//!
//! Installs a `tracing-subscriber` registry with an env filter and either a
//! human-readable or a JSON formatter.

use scribe_config::{LogFormat, TelemetryConfig};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default directive when neither `RUST_LOG` nor the config sets one
const DEFAULT_FILTER: &str = "info";

/// Directive used when debug mode is on
const DEBUG_FILTER: &str = "debug,hyper=info,h2=info,rustls=info";

/// Pick the filter directive in priority order
///
/// `RUST_LOG` wins, then the configured filter, then the debug or default level.
pub fn filter_directive(config: &TelemetryConfig, debug: bool) -> String {
    if let Ok(from_env) = std::env::var(EnvFilter::DEFAULT_ENV)
        && !from_env.trim().is_empty()
    {
        return from_env;
    }

    match (&config.filter, debug) {
        (Some(filter), _) => filter.clone(),
        (None, true) => DEBUG_FILTER.to_string(),
        (None, false) => DEFAULT_FILTER.to_string(),
    }
}

/// Initialize the global subscriber
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: &TelemetryConfig, debug: bool) -> anyhow::Result<()> {
    let directive = filter_directive(config, debug);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(debug)
                    .with_line_number(debug),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_target(true),
            )
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    tracing::debug!(filter = %directive, format = ?config.format, "telemetry initialized");

    Ok(())
}
