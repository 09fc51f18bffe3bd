//! Study subjects and their weighting attributes.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 5;
pub const MIN_PRIORITY: u8 = 1;
pub const MAX_PRIORITY: u8 = 3;

/// A subject to be scheduled.
///
/// Missing fields in persisted documents fall back to difficulty 3,
/// priority 1 and no weekly goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
    #[serde(default = "default_priority")]
    pub priority: u8,
    /// Soft weekly target in hours; 0 means "fill proportionally".
    #[serde(default)]
    pub goal_hours: f64,
}

fn default_difficulty() -> u8 {
    3
}
fn default_priority() -> u8 {
    1
}

impl Subject {
    /// Create a subject with default attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            difficulty: default_difficulty(),
            priority: default_priority(),
            goal_hours: 0.0,
        }
    }

    pub fn with_difficulty(mut self, difficulty: u8) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_goal_hours(mut self, hours: f64) -> Self {
        self.goal_hours = hours;
        self
    }

    /// `difficulty * priority`, never below 1.
    pub fn weight(&self) -> u64 {
        (u64::from(self.difficulty) * u64::from(self.priority)).max(1)
    }

    /// Weekly goal in whole minutes (fractions truncated, negatives as 0).
    pub fn goal_minutes(&self) -> u32 {
        if self.goal_hours.is_finite() && self.goal_hours > 0.0 {
            (self.goal_hours * 60.0) as u32
        } else {
            0
        }
    }

    /// Check name and attribute ranges.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptySubjectName);
        }
        check_range(&self.name, "difficulty", self.difficulty, MIN_DIFFICULTY, MAX_DIFFICULTY)?;
        check_range(&self.name, "priority", self.priority, MIN_PRIORITY, MAX_PRIORITY)?;
        if !self.goal_hours.is_finite() || self.goal_hours < 0.0 {
            return Err(ValidationError::InvalidGoal {
                subject: self.name.clone(),
                value: self.goal_hours,
            });
        }
        Ok(())
    }
}

fn check_range(
    subject: &str,
    field: &'static str,
    value: u8,
    min: u8,
    max: u8,
) -> Result<(), ValidationError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            subject: subject.to_string(),
            field,
            value: i64::from(value),
            min: i64::from(min),
            max: i64::from(max),
        })
    }
}

/// Fail on the first repeated name.
pub fn ensure_unique_names(subjects: &[Subject]) -> Result<(), ValidationError> {
    let mut seen = std::collections::HashSet::new();
    for subject in subjects {
        if !seen.insert(subject.name.as_str()) {
            return Err(ValidationError::DuplicateSubject(subject.name.clone()));
        }
    }
    Ok(())
}
