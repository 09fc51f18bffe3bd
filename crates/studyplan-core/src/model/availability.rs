//! Declared free time: per-day lists of time windows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::clock::{ClockTime, Day};
use crate::error::ValidationError;

/// A contiguous available interval within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl TimeWindow {
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    /// Usable minutes; zero when `start >= end`.
    pub fn duration_minutes(&self) -> u32 {
        self.start.minutes_until(self.end)
    }

    pub fn is_empty(&self) -> bool {
        self.duration_minutes() == 0
    }

    /// Whether `[start, end)` lies inside this window.
    pub fn contains(&self, start: ClockTime, end: ClockTime) -> bool {
        self.start <= start && end <= self.end
    }
}

/// Windows for each day of the week. Days without an entry have no windows.
///
/// Window order within a day is preserved; it is the order the planner fills
/// them in. Unknown day keys in a persisted document are ignored; keys naming
/// the same day (`"Monday"`, `"monday"`) have their windows merged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, Vec<TimeWindow>>")]
pub struct WeeklyAvailability {
    days: BTreeMap<Day, Vec<TimeWindow>>,
}

impl Serialize for WeeklyAvailability {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.days.serialize(serializer)
    }
}

impl From<BTreeMap<String, Vec<TimeWindow>>> for WeeklyAvailability {
    fn from(raw: BTreeMap<String, Vec<TimeWindow>>) -> Self {
        let mut days = BTreeMap::new();
        for (key, windows) in raw {
            match key.parse::<Day>() {
                Ok(day) => {
                    let slot: &mut Vec<TimeWindow> = days.entry(day).or_default();
                    if !slot.is_empty() {
                        tracing::warn!(day = %key, %day, "merging windows from a repeated day key");
                    }
                    slot.extend(windows);
                }
                Err(_) => tracing::warn!(day = %key, "ignoring availability for unknown day"),
            }
        }
        Self { days }
    }
}

impl WeeklyAvailability {
    pub fn new() -> Self {
        Self::default()
    }

    /// The same single window on every day of the week.
    pub fn every_day(window: TimeWindow) -> Self {
        let days = Day::ALL.into_iter().map(|d| (d, vec![window])).collect();
        Self { days }
    }

    /// Builder-style variant of [`add_window`](Self::add_window).
    pub fn with_window(mut self, day: Day, window: TimeWindow) -> Self {
        self.add_window(day, window);
        self
    }

    /// Windows declared for `day`, in insertion order.
    pub fn windows(&self, day: Day) -> &[TimeWindow] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn add_window(&mut self, day: Day, window: TimeWindow) {
        self.days.entry(day).or_default().push(window);
    }

    /// Remove and return the window at `index` on `day`.
    pub fn remove_window(&mut self, day: Day, index: usize) -> Result<TimeWindow, ValidationError> {
        match self.days.get_mut(&day) {
            Some(windows) if index < windows.len() => Ok(windows.remove(index)),
            other => Err(ValidationError::WindowOutOfBounds {
                day: day.to_string(),
                index,
                len: other.map_or(0, |w| w.len()),
            }),
        }
    }

    /// Replace all windows of `day`.
    pub fn set_windows(&mut self, day: Day, windows: Vec<TimeWindow>) {
        self.days.insert(day, windows);
    }

    pub fn clear_day(&mut self, day: Day) {
        self.days.remove(&day);
    }

    /// Sum of usable minutes across the whole week.
    pub fn total_minutes(&self) -> u32 {
        self.days
            .values()
            .flatten()
            .map(TimeWindow::duration_minutes)
            .sum()
    }

    pub fn day_minutes(&self, day: Day) -> u32 {
        self.windows(day).iter().map(TimeWindow::duration_minutes).sum()
    }
}
