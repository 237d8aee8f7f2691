//! Logging setup built on `tracing`.
//!
//! The numeric kernels never log. Searches report their result at `debug`,
//! the pipeline reports each aligned pair at `info` and suspicious results
//! (undefined correlation, output made only of gaps) at `warn`.
//!
//! # Example
//!
//! ```no_run
//! use faa_core::logging::{init_tracing, LogLevel};
//!
//! init_tracing(LogLevel::Debug);
//! tracing::info!("ready");
//! ```

mod types;

pub use types::LogLevel;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingSettings;

/// Install the process-wide subscriber, writing to stderr.
///
/// Directives in `RUST_LOG` are applied on top of `default_level`. Panics if
/// a global subscriber is already set, so call it once from the binary.
pub fn init_tracing(default_level: LogLevel) {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.to_level_filter().into())
        .from_env_lossy();
    let stderr = fmt::layer().with_target(true).with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr)
        .with(filter)
        .init();
}

/// [`init_tracing`] at the level stored in the settings file.
pub fn init_from_settings(settings: &LoggingSettings) {
    init_tracing(settings.level);
}

/// Warnings and above, captured per test. Safe to call repeatedly.
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn settings_level_becomes_default_filter() {
        let settings: LoggingSettings = toml::from_str("level = \"debug\"").unwrap();
        assert_eq!(settings.level.to_level_filter(), LevelFilter::DEBUG);

        let fallback: LoggingSettings = toml::from_str("").unwrap();
        assert_eq!(fallback.level.to_level_filter(), LevelFilter::INFO);
    }

    #[test]
    fn test_subscriber_tolerates_repeated_setup() {
        init_test_tracing();
        init_test_tracing();
        tracing::warn!("visible in test output");
    }
}
