//! Host configuration.
//!
//! ## Learning: Serde for Serialization
//!
//! `#[serde(default)]` uses `Default::default()` for missing fields, so a
//! config file only needs the settings that differ from the defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::language::Language;
use crate::position::POSITION_KEY;
use crate::theme::{ColorScheme, ThemeChoice};

/// Main host configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial session settings
    pub session: SessionConfig,

    /// Scene storage settings
    pub storage: StorageConfig,
}

impl Config {
    /// Loads config from the default location, falling back to defaults.
    pub fn load() -> Self {
        match Self::load_from_default_path() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config file: {}", e);
                Self::default()
            }
        }
    }

    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    fn load_from_default_path() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("codeview").join("config.toml"))
    }

    /// Saves the config to a file, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Saves the config to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Self::default_path()?)
    }
}

/// Settings applied when a session starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Language used when it can't be detected from the file extension
    pub language: Language,

    /// Theme choice
    pub theme: ThemeChoice,

    /// Appearance assumed for the system when the theme follows it
    pub appearance: ColorScheme,

    /// Show the minimap
    pub show_minimap: bool,

    /// Soft-wrap long lines
    pub wrap_text: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            language: Language::Swift,
            theme: ThemeChoice::Default,
            appearance: ColorScheme::Dark,
            show_minimap: true,
            wrap_text: true,
        }
    }
}

/// Scene storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one JSON file per scene (None = platform default)
    pub state_dir: Option<PathBuf>,

    /// Key under which the view position is stored
    pub position_key: String,
}

impl StorageConfig {
    /// Returns the configured state directory or the platform default.
    pub fn state_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.state_dir {
            return Ok(dir.clone());
        }
        let data_dir = dirs::data_local_dir().ok_or(ConfigError::NoDataDir)?;
        Ok(data_dir.join("codeview").join("scenes"))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_dir: None,
            position_key: POSITION_KEY.to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("Data directory not found")]
    NoDataDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.session.language, Language::Swift);
        assert_eq!(config.session.theme, ThemeChoice::Default);
        assert!(config.session.show_minimap);
        assert!(config.session.wrap_text);
        assert_eq!(config.storage.position_key, "editPosition");
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str(
            r#"
            [session]
            language = "haskell"
            theme = "light"
            "#,
        )
        .unwrap();

        assert_eq!(config.session.language, Language::Haskell);
        assert_eq!(config.session.theme, ThemeChoice::Light);
        assert!(config.session.wrap_text);
        assert!(config.storage.state_dir.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.session.show_minimap = false;
        config.storage.state_dir = Some(dir.path().join("scenes"));
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(!loaded.session.show_minimap);
        assert_eq!(loaded.storage.state_dir().unwrap(), dir.path().join("scenes"));
    }
}
