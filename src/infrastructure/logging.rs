use tracing::Dispatch;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

use crate::config::{LogFormat, LoggingConfig};

/// Builds the level filter; `RUST_LOG` wins over the configured level
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Builds the subscriber for the configured format without installing it
fn build_dispatch(config: &LoggingConfig) -> Dispatch {
    let filter = build_filter(&config.level);

    match config.format {
        LogFormat::Json => Dispatch::new(
            tracing_subscriber::registry().with(filter).with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_events(FmtSpan::CLOSE),
            ),
        ),
        LogFormat::Pretty => Dispatch::new(
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(true).with_span_events(FmtSpan::CLOSE)),
        ),
    }
}

/// Installs the global subscriber
///
/// Fails if a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TryInitError> {
    build_dispatch(config).try_init()?;

    tracing::info!(level = %config.level, format = ?config.format, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(format: LogFormat) -> LoggingConfig {
        LoggingConfig {
            level: "info".to_string(),
            format,
        }
    }

    #[test]
    fn test_json_subscriber_applies_only_in_scope() {
        let dispatch = build_dispatch(&config(LogFormat::Json));

        tracing::dispatcher::with_default(&dispatch, || {
            assert!(tracing::enabled!(tracing::Level::ERROR));
        });

        assert!(!tracing::dispatcher::has_been_set());
    }

    #[test]
    fn test_pretty_subscriber_applies_only_in_scope() {
        let dispatch = build_dispatch(&config(LogFormat::Pretty));

        tracing::dispatcher::with_default(&dispatch, || {
            assert!(tracing::enabled!(tracing::Level::ERROR));
        });
    }
}
