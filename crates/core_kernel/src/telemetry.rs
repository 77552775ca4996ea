//! Tracing subscriber initialisation

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::CoreError;

/// Parses a log level such as `info` or `DEBUG`; `off` is accepted.
pub fn parse_level(level: &str) -> Result<LevelFilter, CoreError> {
    let trimmed = level.trim();
    if trimmed.is_empty() {
        return Err(CoreError::configuration("log level must not be blank"));
    }
    trimmed
        .parse()
        .map_err(|_| CoreError::configuration(format!("unknown log level '{}'", level)))
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `default_level`. An unknown
/// `default_level` falls back to `info`. Returns `false` when a subscriber
/// was already installed, in which case nothing changes.
pub fn init_tracing(default_level: &str) -> bool {
    let level = parse_level(default_level).unwrap_or(LevelFilter::INFO);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
        .is_ok()
}
