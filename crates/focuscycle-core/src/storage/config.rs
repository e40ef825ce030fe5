//! TOML-based application configuration.
//!
//! Stores user preferences for cycle length bounds and display
//! behavior. Configuration is stored at `~/.config/focuscycle/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::cycle::DurationBounds;
use crate::error::{ConfigError, CoreError};

/// Timer-specific configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_min_minutes")]
    pub min_minutes: u32,
    #[serde(default = "default_max_minutes")]
    pub max_minutes: u32,
}

/// Display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Title shown when no cycle is active.
    #[serde(default = "default_idle_title")]
    pub idle_title: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/focuscycle/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

// Default functions
fn default_min_minutes() -> u32 {
    1
}
fn default_max_minutes() -> u32 {
    60
}
fn default_idle_title() -> String {
    "focuscycle".into()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            min_minutes: default_min_minutes(),
            max_minutes: default_max_minutes(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            idle_title: default_idle_title(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, CoreError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the default file first if none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, CoreError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path,
                    message: e.to_string(),
                })?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), CoreError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Cycle length bounds from the timer section.
    pub fn duration_bounds(&self) -> DurationBounds {
        DurationBounds {
            min_minutes: self.timer.min_minutes,
            max_minutes: self.timer.max_minutes,
        }
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "timer.min_minutes" => Some(self.timer.min_minutes.to_string()),
            "timer.max_minutes" => Some(self.timer.max_minutes.to_string()),
            "display.idle_title" => Some(self.display.idle_title.clone()),
            _ => None,
        }
    }

    /// Set a config value by key and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be
    /// parsed, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        match key {
            "timer.min_minutes" => self.timer.min_minutes = parse_minutes(key, value)?,
            "timer.max_minutes" => self.timer.max_minutes = parse_minutes(key, value)?,
            "display.idle_title" => self.display.idle_title = value.to_string(),
            _ => return Err(ConfigError::UnknownKey(key.to_string()).into()),
        }
        self.save()?;
        Ok(())
    }
}

fn parse_minutes(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("cannot parse '{value}' as a minute count"),
    })
}
