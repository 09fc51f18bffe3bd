//! Planner output types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{ClockTime, Day};

/// One block of study time for one subject inside one window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub subject: String,
    pub start: ClockTime,
    pub end: ClockTime,
    /// Minutes, always `end - start`.
    pub duration: u32,
    /// Index of the source window within its day's window list.
    pub window_index: usize,
}

impl Session {
    pub fn new(subject: impl Into<String>, start: ClockTime, end: ClockTime, window_index: usize) -> Self {
        Self {
            subject: subject.into(),
            start,
            end,
            duration: start.minutes_until(end),
            window_index,
        }
    }

    /// Check if this session overlaps with a time range
    pub fn overlaps(&self, start: ClockTime, end: ClockTime) -> bool {
        self.start < end && self.end > start
    }
}

/// Sessions for each day of the week. All seven days are always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklySchedule {
    days: BTreeMap<Day, Vec<Session>>,
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self::empty()
    }
}

impl WeeklySchedule {
    /// Every day present with no sessions.
    pub fn empty() -> Self {
        Self {
            days: Day::ALL.into_iter().map(|d| (d, Vec::new())).collect(),
        }
    }

    pub fn day(&self, day: Day) -> &[Session] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Days in canonical order with their sessions.
    pub fn iter(&self) -> impl Iterator<Item = (Day, &[Session])> + '_ {
        Day::ALL.into_iter().map(move |d| (d, self.day(d)))
    }

    /// All sessions, Monday first.
    pub fn sessions(&self) -> impl Iterator<Item = (Day, &Session)> + '_ {
        self.iter().flat_map(|(d, s)| s.iter().map(move |session| (d, session)))
    }

    pub fn session_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.session_count() == 0
    }

    /// Total scheduled minutes across the week.
    pub fn total_minutes(&self) -> u32 {
        self.sessions().map(|(_, s)| s.duration).sum()
    }

    /// Scheduled minutes for one subject across the week.
    pub fn minutes_for(&self, subject: &str) -> u32 {
        self.sessions()
            .filter(|(_, s)| s.subject == subject)
            .map(|(_, s)| s.duration)
            .sum()
    }

    pub(crate) fn push(&mut self, day: Day, session: Session) {
        self.days.entry(day).or_default().push(session);
    }

    pub(crate) fn sort_by_start(&mut self) {
        for sessions in self.days.values_mut() {
            sessions.sort_by_key(|s| s.start);
        }
    }
}

impl Serialize for WeeklySchedule {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.days.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for WeeklySchedule {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let parsed = BTreeMap::<Day, Vec<Session>>::deserialize(deserializer)?;
        let mut schedule = Self::empty();
        for (day, sessions) in parsed {
            schedule.days.insert(day, sessions);
        }
        Ok(schedule)
    }
}
