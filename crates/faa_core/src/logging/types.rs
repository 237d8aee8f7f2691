//! Log verbosity as stored in settings.

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

/// Minimum severity that gets printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Per-candidate search detail.
    Trace,
    /// Search results.
    Debug,
    /// One line per aligned pair.
    #[default]
    Info,
    /// Suspicious results only.
    Warn,
    Error,
}

impl LogLevel {
    /// Filter letting this level and everything more severe through.
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn converts_to_level_filter() {
        assert_eq!(LogLevel::Warn.to_level_filter(), LevelFilter::WARN);
        assert_eq!(LogLevel::default().to_level_filter(), LevelFilter::INFO);
        // More verbose levels map to wider filters.
        let (widest, narrowest) = (LogLevel::Trace, LogLevel::Error);
        assert!(widest.to_level_filter() > narrowest.to_level_filter());
    }
}
