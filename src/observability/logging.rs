//! # Structured Logging
//!
//! Subscriber setup and span helpers built on the tracing ecosystem. Logs go
//! to stderr so that rendered validation reports on stdout stay parseable.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::{AppConfig, LoggingConfig};

/// Create a tracing span for one manifest file.
///
/// ```rust,ignore
/// let span = manifest_span!(path.display());
/// let span = manifest_span!(path.display(), format = "yaml");
/// ```
#[macro_export]
macro_rules! manifest_span {
    ($path:expr) => {
        tracing::info_span!("manifest", path = %$path)
    };
    ($path:expr, $($field:tt)*) => {
        tracing::info_span!("manifest", path = %$path, $($field)*)
    };
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level; `verbose` raises the
/// configured level to `debug`. Installing twice is not an error, the first
/// subscriber stays in place.
pub fn init_logging(config: &LoggingConfig, verbose: bool) -> bool {
    let level = if verbose { "debug" } else { config.level.as_str() };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(level),
    };

    let installed = if config.json {
        tracing::subscriber::set_global_default(
            FmtSubscriber::builder()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish(),
        )
    } else {
        tracing::subscriber::set_global_default(
            FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish(),
        )
    };

    installed.is_ok()
}

/// Log the effective configuration
pub fn log_config_info(config: &AppConfig) {
    let kinds = &config.validation.repeatable_filters;
    let repeatable: Vec<&str> = kinds.iter().map(|kind| kind.as_str()).collect();
    tracing::info!(
        repeatable_filters = ?repeatable,
        log_level = %config.logging.level,
        json_logging = config.logging.json,
        "routeguard configuration"
    );
}
