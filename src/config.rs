//! Dashboard configuration.
//!
//! Persists the theme preference and a few client settings as JSON under the
//! user's home directory.

use crate::consts::cli_consts::refresh::DEFAULT_LOG_DAYS;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

/// Colour scheme of the dashboard.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Icon and label of the toggle, describing what pressing it does.
    pub fn toggle_indicator(self) -> (&'static str, &'static str) {
        match self {
            Theme::Dark => ("☀️", "切换亮色"),
            Theme::Light => ("🌙", "切换暗色"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub theme: Theme,
    pub log_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            log_days: DEFAULT_LOG_DAYS,
            base_url: None,
        }
    }
}

impl Config {
    /// Create Config with the given theme and default settings otherwise.
    pub fn new(theme: Theme) -> Self {
        Config {
            theme,
            ..Default::default()
        }
    }

    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Loads the configuration, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("Ignoring unreadable config {}: {}", path.display(), e);
                }
                Self::default()
            }
        }
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Path of the dashboard config file, `~/.openclaw-monitor/dashboard.json`.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home_path = home::home_dir().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "Home directory not found")
    })?;
    Ok(home_path.join(".openclaw-monitor").join("dashboard.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    // Loading a saved configuration file should return the same configuration.
    fn test_load_recovers_saved_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dashboard.json");

        let config = Config::new(Theme::Light);
        config.save(&path).unwrap();

        let loaded_config = Config::load_from_file(&path).unwrap();
        assert_eq!(config, loaded_config);
    }

    #[test]
    // Saving a configuration should create directories if they don't exist.
    fn test_save_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nonexistent_dir").join("dashboard.json");

        let result = Config::new(Theme::Dark).save(&path);

        assert!(result.is_ok(), "Failed to save config");
        assert!(path.exists());
    }

    #[test]
    // The theme should be stored under a plain "theme" key.
    fn test_theme_is_persisted_as_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dashboard.json");
        Config::new(Theme::Light).save(&path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains(r#""theme": "light""#));
    }

    #[test]
    // A missing or partial file should fall back to the dark theme.
    fn test_missing_theme_defaults_to_dark() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dashboard.json");
        assert_eq!(Config::load_or_default(&path).theme, Theme::Dark);

        fs::write(&path, r#"{"log_days": 3}"#).unwrap();
        let config = Config::load_or_default(&path);
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.log_days, 3);
    }

    #[test]
    // Loading an invalid JSON file should return an error.
    fn test_load_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid_config.json");

        let mut file = File::create(&path).unwrap();
        writeln!(file, "invalid json").unwrap();

        assert!(Config::load_from_file(&path).is_err());
        assert_eq!(Config::load_or_default(&path), Config::default());
    }
}
