//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Location of the settings document used when `--file` is not given
//! - Default output format for generated schedules
//! - Session rules and the initial daily window used for new documents
//!
//! Configuration is stored at `~/.config/studyplan/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use super::settings::{Settings, SettingsDocument};
use crate::error::{ConfigError, InputError};
use crate::model::{TimeWindow, WeeklyAvailability};
use crate::report::OutputFormat;

/// Output preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub format: String,
    /// Append the goal summary after the schedule
    #[serde(default)]
    pub summary: bool,
}

/// Values used to seed a new settings document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
    #[serde(default = "default_min_session")]
    pub min_session_minutes: u32,
    #[serde(default = "default_max_session")]
    pub max_session_minutes: u32,
    #[serde(default)]
    pub pomodoro_mode: bool,
    #[serde(default)]
    pub user_name: String,
    #[serde(default = "default_window_start")]
    pub window_start: String,
    #[serde(default = "default_window_end")]
    pub window_end: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studyplan/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_settings_file")]
    pub settings_file: String,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

// Default functions
fn default_settings_file() -> String {
    "study_settings.json".into()
}
fn default_format() -> String {
    "table".into()
}
fn default_break_minutes() -> u32 {
    10
}
fn default_min_session() -> u32 {
    30
}
fn default_max_session() -> u32 {
    120
}
fn default_window_start() -> String {
    "09:00".into()
}
fn default_window_end() -> String {
    "12:00".into()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            summary: false,
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            break_minutes: default_break_minutes(),
            min_session_minutes: default_min_session(),
            max_session_minutes: default_max_session(),
            pomodoro_mode: false,
            user_name: String::new(),
            window_start: default_window_start(),
            window_end: default_window_end(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings_file: default_settings_file(),
            output: OutputConfig::default(),
            defaults: DefaultsConfig::default(),
        }
    }
}

impl DefaultsConfig {
    /// The window every day starts with in a new document.
    pub fn window(&self) -> Result<TimeWindow, InputError> {
        Ok(TimeWindow::new(self.window_start.parse()?, self.window_end.parse()?))
    }

    pub fn settings(&self) -> Settings {
        Settings {
            break_minutes: self.break_minutes,
            min_session_minutes: self.min_session_minutes,
            max_session_minutes: self.max_session_minutes,
            pomodoro_mode: self.pomodoro_mode,
            user_name: self.user_name.clone(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    pub(crate) fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as a non-negative integer")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Path of the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be created.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default, writing the default if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// [`load`](Self::load) against an explicit path.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// [`save`](Self::save) against an explicit path.
    ///
    /// # Errors
    ///
    /// Same as [`save`](Self::save).
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default configuration");
            Self::default()
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the resulting configuration is invalid. `self` is left unchanged
    /// on error.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate().map_err(|message| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        })?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and persist. Returns error if key is unknown.
    ///
    /// # Errors
    ///
    /// See [`set_value`](Self::set_value); also fails if saving fails.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.set_value(key, value)?;
        self.save()
    }

    /// Check values that serde alone cannot.
    fn validate(&self) -> Result<(), String> {
        self.output
            .format
            .parse::<OutputFormat>()
            .map_err(|e| e.to_string())?;
        self.defaults.window().map_err(|e| e.to_string())?;
        self.defaults
            .settings()
            .schedule_config()
            .validate()
            .map_err(|e| e.to_string())
    }

    /// Fresh settings document seeded from [`DefaultsConfig`].
    pub fn new_document(&self) -> SettingsDocument {
        let available_time = match self.defaults.window() {
            Ok(window) => WeeklyAvailability::every_day(window),
            Err(e) => {
                tracing::warn!(error = %e, "invalid default window, starting without availability");
                WeeklyAvailability::new()
            }
        };
        SettingsDocument {
            subjects: Vec::new(),
            available_time,
            settings: self.defaults.settings(),
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output.format.parse().unwrap_or_default()
    }
}
