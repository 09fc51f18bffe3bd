//! JSON settings document: subjects, weekly availability and session rules.
//!
//! Shape:
//!
//! ```json
//! {
//!   "subjects": [{"name": "Math", "difficulty": 3, "priority": 1, "goal_hours": 0.0}],
//!   "available_time": {"Monday": [{"start": "09:00", "end": "12:00"}]},
//!   "settings": {"break_minutes": 10, "min_session_minutes": 30,
//!                "max_session_minutes": 120, "pomodoro_mode": false, "user_name": ""}
//! }
//! ```
//!
//! Every field is optional when loading. Loading either yields a complete
//! document or an error; callers keep their previous state on error.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Config;
use crate::error::{ConfigError, CoreError, InputError, Result, ValidationError};
use crate::model::{ensure_unique_names, Day, Subject, TimeWindow, WeeklyAvailability};
use crate::planner::{Planner, ScheduleConfig, StudyPlan};

/// Session rules plus the name printed on rendered documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
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
}

fn default_break_minutes() -> u32 {
    ScheduleConfig::default().break_minutes
}
fn default_min_session() -> u32 {
    ScheduleConfig::default().min_session_minutes
}
fn default_max_session() -> u32 {
    ScheduleConfig::default().max_session_minutes
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            break_minutes: default_break_minutes(),
            min_session_minutes: default_min_session(),
            max_session_minutes: default_max_session(),
            pomodoro_mode: false,
            user_name: String::new(),
        }
    }
}

impl Settings {
    pub fn schedule_config(&self) -> ScheduleConfig {
        ScheduleConfig {
            break_minutes: self.break_minutes,
            min_session_minutes: self.min_session_minutes,
            max_session_minutes: self.max_session_minutes,
            pomodoro_mode: self.pomodoro_mode,
        }
    }
}

/// Everything needed to generate a schedule, as persisted on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsDocument {
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub available_time: WeeklyAvailability,
    #[serde(default)]
    pub settings: Settings,
}

impl SettingsDocument {
    /// Parse a document.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` for invalid JSON, bad time strings or wrong
    /// field types.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|source| InputError::Document { path: None, source }.into())
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a document from disk.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read and `MalformedInput` if its
    /// content cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|source| {
            InputError::Document {
                path: Some(path.to_path_buf()),
                source,
            }
            .into()
        })
    }

    /// Write the document as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// Check subjects and session rules.
    ///
    /// # Errors
    ///
    /// Returns the first problem found as `InvalidConfiguration`.
    pub fn validate(&self) -> Result<()> {
        for subject in &self.subjects {
            subject.validate()?;
        }
        ensure_unique_names(&self.subjects)?;
        self.schedule_config().validate()?;
        Ok(())
    }

    pub fn schedule_config(&self) -> ScheduleConfig {
        self.settings.schedule_config()
    }

    /// Validate and run the planner over this document.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn plan(&self) -> Result<StudyPlan> {
        self.validate()?;
        Planner::new(self.schedule_config()).plan(&self.subjects, &self.available_time)
    }

    pub fn subject(&self, name: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.name == name)
    }

    /// Append a new subject.
    ///
    /// # Errors
    ///
    /// Rejects invalid attributes and names already present.
    pub fn add_subject(&mut self, subject: Subject) -> Result<(), ValidationError> {
        subject.validate()?;
        if self.subject(&subject.name).is_some() {
            return Err(ValidationError::DuplicateSubject(subject.name));
        }
        self.subjects.push(subject);
        Ok(())
    }

    /// Replace the subject with the same name, keeping its position.
    ///
    /// # Errors
    ///
    /// Rejects invalid attributes and unknown names.
    pub fn update_subject(&mut self, subject: Subject) -> Result<(), ValidationError> {
        subject.validate()?;
        let slot = self
            .subjects
            .iter_mut()
            .find(|s| s.name == subject.name)
            .ok_or_else(|| ValidationError::UnknownSubject(subject.name.clone()))?;
        *slot = subject;
        Ok(())
    }

    /// Remove a subject by name and return it.
    ///
    /// # Errors
    ///
    /// Returns `UnknownSubject` if no subject has that name.
    pub fn remove_subject(&mut self, name: &str) -> Result<Subject, ValidationError> {
        let index = self
            .subjects
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| ValidationError::UnknownSubject(name.to_string()))?;
        Ok(self.subjects.remove(index))
    }

    pub fn add_window(&mut self, day: Day, window: TimeWindow) {
        self.available_time.add_window(day, window);
    }

    /// # Errors
    ///
    /// Returns `WindowOutOfBounds` for an index past the day's windows.
    pub fn remove_window(&mut self, day: Day, index: usize) -> Result<TimeWindow, ValidationError> {
        self.available_time.remove_window(day, index)
    }

    pub fn clear_day(&mut self, day: Day) {
        self.available_time.clear_day(day);
    }

    /// Read a `settings` value by key (e.g. `break_minutes`).
    pub fn get_setting(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(&self.settings).ok()?;
        match json.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Update a `settings` value by key, keeping the field's type.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys, unparseable values or values that
    /// leave the session rules invalid. The document is unchanged on error.
    pub fn set_setting(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&self.settings)?;
        Config::set_json_value_by_path(&mut json, key, value)?;
        let updated: Settings = serde_json::from_value(json).map_err(|e| {
            CoreError::Config(ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })
        })?;
        updated.schedule_config().validate()?;
        self.settings = updated;
        Ok(())
    }
}
