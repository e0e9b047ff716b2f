//! Logging setup for prism
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and either
//! human-readable or JSON output.

use prism_config::{LogFormat, TelemetryConfig};
use tracing_subscriber::EnvFilter;

/// Pick the filter directive: `RUST_LOG`, then the override, then config
fn filter_directive(config: &TelemetryConfig, override_filter: Option<&str>) -> String {
    std::env::var(EnvFilter::DEFAULT_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .or_else(|| override_filter.map(str::to_owned))
        .unwrap_or_else(|| config.log_filter.clone())
}

/// Initialize logging from configuration
///
/// An unparsable directive falls back to `info`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: &TelemetryConfig, override_filter: Option<&str>) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let directive = filter_directive(config, override_filter);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(false),
            )
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_wins() {
        temp_env::with_var("RUST_LOG", Some("prism_proxy=trace"), || {
            let directive = filter_directive(&TelemetryConfig::default(), Some("debug"));
            assert_eq!(directive, "prism_proxy=trace");
        });
    }

    #[test]
    fn override_beats_config() {
        temp_env::with_var_unset("RUST_LOG", || {
            let directive = filter_directive(&TelemetryConfig::default(), Some("debug"));
            assert_eq!(directive, "debug");
        });
    }

    #[test]
    fn config_filter_is_the_fallback() {
        temp_env::with_var_unset("RUST_LOG", || {
            let config = TelemetryConfig {
                log_filter: "warn,stt=debug".to_owned(),
                ..TelemetryConfig::default()
            };
            assert_eq!(filter_directive(&config, None), "warn,stt=debug");
        });
    }
}
