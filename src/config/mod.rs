//! This module handles the application's configuration, including loading and
//! saving user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use toast_relay::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.language = Some("fr".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

use crate::error::Result;
use crate::notifications::Position;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "ToastRelay";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Preferred UI language (e.g. `"en-US"`, `"fr"`).
    pub language: Option<String>,
    /// Anchor for newly created toasts.
    #[serde(default)]
    pub toast_position: Option<Position>,
    /// Cap on simultaneously held toasts, clamped to `[1, 10]` when applied.
    #[serde(default)]
    pub max_toasts: Option<usize>,
    /// Default toast time-to-live in milliseconds, floored at 1000 when applied.
    #[serde(default)]
    pub default_duration_ms: Option<u64>,
    /// Whether failed API calls surface a global error toast.
    #[serde(default)]
    pub error_toasts: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            toast_position: Some(Position::BottomRight),
            max_toasts: Some(defaults::DEFAULT_MAX_TOASTS),
            default_duration_ms: Some(defaults::DEFAULT_TOAST_DURATION.as_millis() as u64),
            error_toasts: Some(true),
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            language: Some("fr".to_string()),
            toast_position: Some(Position::TopCenter),
            max_toasts: Some(3),
            default_duration_ms: Some(2500),
            error_toasts: Some(false),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded.language, config.language);
        assert_eq!(loaded.toast_position, config.toast_position);
        assert_eq!(loaded.max_toasts, config.max_toasts);
        assert_eq!(loaded.default_duration_ms, config.default_duration_ms);
        assert_eq!(loaded.error_toasts, config.error_toasts);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert!(loaded.language.is_none());
        assert_eq!(loaded.toast_position, Some(Position::BottomRight));
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("deep").join("path").join("settings.toml");
        let config = Config::default();

        save_to_path(&config, &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }

    #[test]
    fn default_config_matches_store_defaults() {
        let config = Config::default();
        assert_eq!(config.toast_position, Some(Position::BottomRight));
        assert_eq!(config.max_toasts, Some(defaults::DEFAULT_MAX_TOASTS));
        assert_eq!(config.error_toasts, Some(true));
    }
}
