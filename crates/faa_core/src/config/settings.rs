//! Alignment and logging settings.
//!
//! Sections map to TOML tables. Missing keys fall back to their defaults so a
//! partial file is always valid.

use serde::{Deserialize, Serialize};

use crate::alignment::{AlignMethod, AlignMode, FixLength};
use crate::logging::LogLevel;

/// Everything the settings file holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Offset search and alignment.
    #[serde(default)]
    pub alignment: AlignmentSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Offset search and alignment configuration.
///
/// Durations are in milliseconds and converted to samples at the sample rate
/// of the audio being aligned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentSettings {
    /// Search method.
    #[serde(default)]
    pub method: AlignMethod,

    /// Largest offset searched, in milliseconds.
    #[serde(default = "default_max_offset_ms")]
    pub max_offset_ms: f64,

    /// Samples compared per candidate offset, in milliseconds. Unset means
    /// the whole signal.
    #[serde(default)]
    pub lookahead_ms: Option<f64>,

    /// Also try the delayed signal with inverted polarity.
    #[serde(default)]
    pub consider_both_polarities: bool,

    /// How pairs are aligned once the offset is known.
    #[serde(default)]
    pub align_mode: AlignMode,

    /// How pair lengths are reconciled after alignment. Unset keeps them.
    #[serde(default)]
    pub fix_length: Option<FixLength>,
}

fn default_max_offset_ms() -> f64 {
    10.0
}

impl Default for AlignmentSettings {
    fn default() -> Self {
        Self {
            method: AlignMethod::default(),
            max_offset_ms: default_max_offset_ms(),
            lookahead_ms: None,
            consider_both_polarities: false,
            align_mode: AlignMode::default(),
            fix_length: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Level used when `RUST_LOG` is not set.
    #[serde(default)]
    pub level: LogLevel,
}

/// Tables of the settings file, in write order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Alignment,
    Logging,
}

impl ConfigSection {
    /// TOML table name.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Alignment => "alignment",
            ConfigSection::Logging => "logging",
        }
    }

    /// Header comment written above the section.
    pub fn comment(&self) -> &'static str {
        match self {
            ConfigSection::Alignment => "# Offset search and alignment",
            ConfigSection::Logging => "# Logging configuration",
        }
    }
}
