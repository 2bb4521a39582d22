//! Timetable data models and types.

pub mod calendar;
pub mod types;

// Re-exports for convenience
pub use calendar::{day_name, parse_day_name, WeekdayFlags, DAY_NAMES};
pub use types::{DirectionId, Result, Schedule, Station, Stop, Train, TransitError};
