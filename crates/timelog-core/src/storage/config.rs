//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - The duration goal the progress ratio is measured against
//! - Which weekday opens the aggregation week
//!
//! Configuration is stored at `~/.config/timelog/config.toml`.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, CoreError};

use super::data_dir;

/// Which weekday opens the aggregation week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    Monday,
    Sunday,
    Saturday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Saturday => Weekday::Sat,
        }
    }
}

/// Duration goal configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalConfig {
    /// Target duration in seconds the progress ring fills toward.
    #[serde(default = "default_goal_secs")]
    pub duration_secs: u64,
}

/// Week aggregation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekConfig {
    #[serde(default = "default_week_start")]
    pub starts_on: WeekStart,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/timelog/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub goal: GoalConfig,
    #[serde(default)]
    pub week: WeekConfig,
}

fn default_goal_secs() -> u64 {
    1800 // 30 minutes
}

fn default_week_start() -> WeekStart {
    WeekStart::Monday
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            duration_secs: default_goal_secs(),
        }
    }
}

impl Default for WeekConfig {
    fn default() -> Self {
        Self {
            starts_on: default_week_start(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, CoreError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the defaults on first run.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be parsed, or
    /// if the default config cannot be written to disk.
    pub fn load() -> Result<Self, CoreError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| {
                    ConfigError::LoadFailed {
                        path,
                        message: e.to_string(),
                    }
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

    /// Load from disk, returning defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
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

    /// Get a config value as a string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "goal.duration_secs" => Some(self.goal.duration_secs.to_string()),
            "week.starts_on" => Some(format!("{:?}", self.week.starts_on).to_lowercase()),
            _ => None,
        }
    }

    /// Set a config value by dot-separated key and persist it.
    ///
    /// # Errors
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        match key {
            "goal.duration_secs" => {
                self.goal.duration_secs =
                    value.parse().map_err(|_| ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: format!("cannot parse '{value}' as seconds"),
                    })?;
            }
            "week.starts_on" => {
                self.week.starts_on = match value {
                    "monday" => WeekStart::Monday,
                    "sunday" => WeekStart::Sunday,
                    "saturday" => WeekStart::Saturday,
                    _ => {
                        return Err(ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: format!(
                                "expected monday, sunday, or saturday, got '{value}'"
                            ),
                        }
                        .into())
                    }
                };
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string()).into()),
        }
        self.save()?;
        Ok(())
    }
}
