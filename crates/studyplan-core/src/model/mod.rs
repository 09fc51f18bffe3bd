//! Plain data types shared by the planner, storage and rendering layers.

mod availability;
mod clock;
mod subject;

pub use availability::{TimeWindow, WeeklyAvailability};
pub use clock::{ClockTime, Day, MINUTES_PER_DAY};
pub use subject::{
    ensure_unique_names, Subject, MAX_DIFFICULTY, MAX_PRIORITY, MIN_DIFFICULTY, MIN_PRIORITY,
};
