//! Persistent settings in a TOML file.
//!
//! A partial or hand-edited file is accepted; absent keys take their defaults.
//! Saving rewrites the whole file through a staging file and a rename.
//!
//! # Example
//!
//! ```no_run
//! use faa_core::config::ConfigManager;
//!
//! let mut config = ConfigManager::new(".config/align.toml");
//! config.load_or_create().unwrap();
//! faa_core::logging::init_from_settings(&config.settings().logging);
//!
//! println!("Max offset: {} ms", config.settings().alignment.max_offset_ms);
//!
//! config.settings_mut().alignment.consider_both_polarities = true;
//! config.save().unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{AlignmentSettings, ConfigSection, LoggingSettings, Settings};
