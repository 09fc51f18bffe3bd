//! Weekly study session allocator.
//!
//! Fills each declared time window with study sessions:
//! - Computes a weekly minute target per subject (explicit goal plus a
//!   weight-proportional share of leftover capacity)
//! - Walks days Monday to Sunday and windows in declaration order
//! - Gives each next session to the subject furthest behind relative to its
//!   weight, sized between the minimum and maximum session length
//! - Inserts a break after every session
//!
//! Generation is a pure function of its inputs: the same subjects,
//! availability and configuration always yield the same schedule.

mod schedule;
mod targets;

pub use schedule::{Session, WeeklySchedule};
pub use targets::{compute_targets, SubjectAllocation};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, ValidationError};
use crate::model::{ensure_unique_names, ClockTime, Day, Subject, WeeklyAvailability};

/// Focus length of one pomodoro session (minutes)
pub const POMODORO_FOCUS_MINUTES: u32 = 50;
/// Break after each pomodoro session (minutes)
pub const POMODORO_BREAK_MINUTES: u32 = 10;

/// Session sizing rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Break inserted after every session (minutes)
    pub break_minutes: u32,
    /// Shortest session worth scheduling (minutes)
    pub min_session_minutes: u32,
    /// Longest single session (minutes)
    pub max_session_minutes: u32,
    /// Fixed 50/10 sessions, overriding the three fields above
    pub pomodoro_mode: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            break_minutes: 10,
            min_session_minutes: 30,
            max_session_minutes: 120,
            pomodoro_mode: false,
        }
    }
}

impl ScheduleConfig {
    /// Check the session bounds. Pomodoro mode does not bypass this.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_session_minutes == 0 {
            return Err(ValidationError::NotPositive {
                field: "min_session_minutes".into(),
            });
        }
        if self.min_session_minutes > self.max_session_minutes {
            return Err(ValidationError::SessionBounds {
                min: self.min_session_minutes,
                max: self.max_session_minutes,
            });
        }
        Ok(())
    }

    /// Effective sizing after applying pomodoro mode.
    pub fn sizing(&self) -> SessionSizing {
        if self.pomodoro_mode {
            SessionSizing {
                min_minutes: POMODORO_FOCUS_MINUTES,
                max_minutes: POMODORO_FOCUS_MINUTES,
                break_minutes: POMODORO_BREAK_MINUTES,
            }
        } else {
            SessionSizing {
                min_minutes: self.min_session_minutes,
                max_minutes: self.max_session_minutes,
                break_minutes: self.break_minutes,
            }
        }
    }
}

/// Bounds actually used while filling windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSizing {
    pub min_minutes: u32,
    pub max_minutes: u32,
    pub break_minutes: u32,
}

/// Result of one generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudyPlan {
    pub schedule: WeeklySchedule,
    /// One entry per input subject, in input order
    pub allocations: Vec<SubjectAllocation>,
    /// Usable minutes across all windows
    pub total_available_minutes: u32,
}

/// Allocates weekly availability among subjects.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: ScheduleConfig,
}

impl Planner {
    pub fn new(config: ScheduleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Generate the weekly schedule.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the session bounds are invalid or
    /// two subjects share a name. Missing subjects or time are not errors.
    pub fn generate(&self, subjects: &[Subject], availability: &WeeklyAvailability) -> Result<WeeklySchedule> {
        Ok(self.plan(subjects, availability)?.schedule)
    }

    /// Generate the schedule along with per-subject targets and totals.
    ///
    /// # Errors
    ///
    /// Same as [`generate`](Self::generate).
    pub fn plan(&self, subjects: &[Subject], availability: &WeeklyAvailability) -> Result<StudyPlan> {
        self.config.validate()?;
        ensure_unique_names(subjects)?;

        let sizing = self.config.sizing();
        let total_available = availability.total_minutes();
        let mut allocations = compute_targets(subjects, total_available);
        let mut schedule = WeeklySchedule::empty();

        if subjects.is_empty() || total_available == 0 {
            debug!(
                subjects = subjects.len(),
                total_available, "nothing to allocate, returning empty schedule"
            );
            return Ok(StudyPlan {
                schedule,
                allocations,
                total_available_minutes: total_available,
            });
        }

        let weights: Vec<u64> = allocations.iter().map(|a| a.weight).collect();
        let mut remain: Vec<u32> = allocations.iter().map(|a| a.target_minutes).collect();

        for day in Day::ALL {
            for (window_index, window) in availability.windows(day).iter().enumerate() {
                if window.is_empty() {
                    continue;
                }
                let end = window.end.minutes();
                let mut cursor = window.start.minutes();

                loop {
                    let left = end.saturating_sub(cursor);
                    if left < sizing.min_minutes {
                        break;
                    }
                    let Some(pick) = most_behind(&remain, &weights, sizing.min_minutes) else {
                        break;
                    };
                    let duration = remain[pick].min(sizing.max_minutes).min(left);
                    if duration < sizing.min_minutes {
                        break;
                    }
                    // cursor + duration <= window.end <= 23:59, so both always fit.
                    let (Some(start), Some(stop)) = (
                        ClockTime::from_minutes(cursor),
                        ClockTime::from_minutes(cursor + duration),
                    ) else {
                        debug_assert!(false, "session outside the day: {cursor}+{duration}");
                        break;
                    };

                    let subject = &allocations[pick].name;
                    debug!(%day, window_index, %subject, %start, end = %stop, duration, "scheduled session");
                    schedule.push(day, Session::new(subject.clone(), start, stop, window_index));

                    remain[pick] -= duration;
                    cursor += duration + sizing.break_minutes;
                }
            }
        }

        schedule.sort_by_start();

        for (allocation, left) in allocations.iter_mut().zip(&remain) {
            allocation.scheduled_minutes = allocation.target_minutes - left;
        }

        info!(
            sessions = schedule.session_count(),
            scheduled_minutes = schedule.total_minutes(),
            total_available,
            "generated weekly schedule"
        );

        Ok(StudyPlan {
            schedule,
            allocations,
            total_available_minutes: total_available,
        })
    }
}

/// Generate a schedule with a one-off planner.
///
/// # Errors
///
/// See [`Planner::generate`].
pub fn generate_schedule(
    subjects: &[Subject],
    availability: &WeeklyAvailability,
    config: &ScheduleConfig,
) -> Result<WeeklySchedule> {
    Planner::new(config.clone()).generate(subjects, availability)
}

/// Index of the eligible subject with the largest `remain / weight`.
///
/// Eligible means at least `min_minutes` remaining. Ties go to the lowest
/// index. Ratios are compared by cross-multiplication to stay in integers.
fn most_behind(remain: &[u32], weights: &[u64], min_minutes: u32) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, (&r, &w)) in remain.iter().zip(weights).enumerate() {
        if r < min_minutes {
            continue;
        }
        match best {
            Some(b) if u64::from(r) * weights[b] <= u64::from(remain[b]) * w => {}
            _ => best = Some(i),
        }
    }
    best
}
