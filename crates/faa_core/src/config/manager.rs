//! Reading and writing the alignment settings file.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use super::settings::{ConfigSection, Settings};

const HEADER: &str = "# Audio alignment configuration\n# Durations are in milliseconds.\n";

/// Failure while reading or writing the settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot access settings file: {0}")]
    ReadError(#[from] io::Error),

    #[error("malformed settings file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("cannot encode settings: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("no settings file at {0}")]
    NotFound(PathBuf),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Owns the settings file on disk and its in-memory [`Settings`].
pub struct ConfigManager {
    path: PathBuf,
    settings: Settings,
}

impl ConfigManager {
    /// Starts with default settings; nothing is read until [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            settings: Settings::default(),
        }
    }

    /// Location of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Settings currently in memory.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Edits are in memory only until [`save`](Self::save).
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Replace the in-memory settings with the file contents.
    ///
    /// Keys missing from the file take their defaults.
    pub fn load(&mut self) -> ConfigResult<()> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(self.path.clone()));
            }
            Err(err) => return Err(err.into()),
        };
        self.settings = toml::from_str(&text)?;
        tracing::debug!(path = %self.path.display(), "settings loaded");
        Ok(())
    }

    /// [`load`](Self::load), or write the defaults if there is no file yet.
    pub fn load_or_create(&mut self) -> ConfigResult<()> {
        match self.load() {
            Err(ConfigError::NotFound(_)) => {
                self.settings = Settings::default();
                self.save()?;
                tracing::info!(path = %self.path.display(), "wrote default settings");
                Ok(())
            }
            other => other,
        }
    }

    /// Write every section, replacing the file in one rename.
    pub fn save(&self) -> ConfigResult<()> {
        let text = self.render()?;
        self.replace_file(&text)?;
        Ok(())
    }

    fn render(&self) -> ConfigResult<String> {
        let settings = &self.settings;
        let mut text = String::from(HEADER);
        write_section(&mut text, ConfigSection::Alignment, &settings.alignment)?;
        write_section(&mut text, ConfigSection::Logging, &settings.logging)?;
        Ok(text)
    }

    fn replace_file(&self, text: &str) -> io::Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        // Sibling path keeps the rename on one filesystem.
        let staging = self.path.with_extension("toml.tmp");
        let mut file = File::create(&staging)?;
        file.write_all(text.as_bytes())?;
        file.sync_all()?;
        drop(file);
        fs::rename(&staging, &self.path)
    }
}

fn write_section<T: Serialize>(
    text: &mut String,
    section: ConfigSection,
    value: &T,
) -> ConfigResult<()> {
    let body = toml::to_string_pretty(value)?;
    text.push('\n');
    text.push_str(section.comment());
    text.push('\n');
    text.push('[');
    text.push_str(section.table_name());
    text.push_str("]\n");
    text.push_str(&body);
    if !body.ends_with('\n') {
        text.push('\n');
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::AlignMethod;
    use tempfile::tempdir;

    #[test]
    fn first_run_writes_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("align.toml");

        let mut manager = ConfigManager::new(&path);
        manager.load_or_create().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# Audio alignment configuration"));
        assert!(text.contains("[alignment]"));
        assert!(text.contains("[logging]"));
        assert_eq!(manager.settings(), &Settings::default());
    }

    #[test]
    fn existing_file_is_not_overwritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("align.toml");
        fs::write(&path, "[alignment]\nmax_offset_ms = 50.0\n").unwrap();

        let mut manager = ConfigManager::new(&path);
        manager.load_or_create().unwrap();

        assert_eq!(manager.settings().alignment.max_offset_ms, 50.0);
        assert_eq!(manager.settings().alignment.method, AlignMethod::Mse);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[alignment]\nmax_offset_ms = 50.0\n"
        );
    }

    #[test]
    fn save_then_load_keeps_edits() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("align.toml");

        let mut manager = ConfigManager::new(&path);
        manager.settings_mut().alignment.method = AlignMethod::Corr;
        manager.settings_mut().alignment.lookahead_ms = Some(500.0);
        manager.save().unwrap();

        let mut reloaded = ConfigManager::new(&path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.settings(), manager.settings());
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempdir().unwrap();
        let mut manager = ConfigManager::new(dir.path().join("absent.toml"));
        assert!(matches!(manager.load(), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("align.toml");
        fs::write(&path, "[alignment\nmethod = ").unwrap();

        let mut manager = ConfigManager::new(&path);
        assert!(matches!(manager.load(), Err(ConfigError::ParseError(_))));
    }
}
