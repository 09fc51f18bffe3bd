//! # studyplan Core Library
//!
//! This library turns a learner's weekly free time into a concrete study
//! schedule. The CLI binary is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Planner**: Pure, stateless allocator that fills time windows with
//!   sessions according to subject weights and weekly goals
//! - **Model**: Subjects, wall-clock times and weekly availability
//! - **Storage**: JSON settings documents and TOML application configuration
//! - **Report**: Text, Markdown and CSV renderings plus goal summaries
//!
//! ## Key Components
//!
//! - [`Planner`]: Weekly session allocator
//! - [`SettingsDocument`]: Persisted subjects, availability and session rules
//! - [`Config`]: Application configuration management

pub mod error;
pub mod model;
pub mod planner;
pub mod report;
pub mod storage;

pub use error::{ConfigError, CoreError, InputError, Result, ValidationError};
pub use model::{ClockTime, Day, Subject, TimeWindow, WeeklyAvailability};
pub use planner::{
    generate_schedule, Planner, ScheduleConfig, Session, StudyPlan, SubjectAllocation,
    WeeklySchedule,
};
pub use report::{OutputFormat, PlanSummary};
pub use storage::{Config, Settings, SettingsDocument};
