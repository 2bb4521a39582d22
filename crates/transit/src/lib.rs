//! # jogja-solo-transit
//!
//! Live train positions on the Yogyakarta - Solo line, computed purely from
//! the timetable and the clock.
//!
//! ## Features
//!
//! - **Position inference**: at a station or between two stops, with segment
//!   and whole-route progress
//! - **Active trains**: every train running right now, per direction
//! - **Departure board**: the next trains leaving a station
//! - **Serde support** (optional): read timetable JSON, emit results as JSON
//!
//! ## Example
//!
//! ```
//! use jogja_solo_transit::prelude::*;
//! use chrono::NaiveDate;
//!
//! let catalog = StationCatalog::new(vec![
//!     Station::new("YK", "Yogyakarta"),
//!     Station::new("KT", "Klaten"),
//!     Station::new("SLO", "Solo Balapan"),
//! ]);
//!
//! let train = Train::new(
//!     "KA 101",
//!     WeekdayFlags::daily(),
//!     DirectionId::Outbound,
//!     vec![
//!         Stop::origin("YK", "08:00"),
//!         Stop::intermediate("KT", "08:30", "08:32"),
//!         Stop::terminus("SLO", "09:00"),
//!     ],
//! );
//! let schedule = Schedule::new(vec![train], vec![]);
//!
//! let now = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(8, 15, 0).unwrap();
//! let active = active_trains(&schedule, &catalog, &now).unwrap();
//! assert_eq!(active.len(), 1);
//! assert_eq!(active[0].position.progress(), 25.0);
//!
//! let next = next_trains(&schedule, &StationCode::new("KT"), 5, &now);
//! assert_eq!(next[0].minutes_until, 17);
//! ```

pub mod catalog;
pub mod fleet;
pub mod identifiers;
pub mod models;
pub mod position;
pub mod provider;
pub mod time;

// Re-exports for convenience
pub mod prelude {
    pub use crate::catalog::StationCatalog;
    pub use crate::fleet::{
        active_trains, next_trains, ActiveTrain, NextTrain, TaggedTrain, DEFAULT_NEXT_TRAINS_LIMIT,
    };
    pub use crate::identifiers::*;
    pub use crate::models::{calendar::WeekdayFlags, types::*};
    pub use crate::position::{resolve_position, AtStation, InTransit, Position, StopState};
    pub use crate::provider::{ScheduleProvider, StaticScheduleProvider};
    pub use crate::time::{
        current_day_name, current_time_minutes, format_minutes_to_time, parse_time_to_minutes, Minutes,
    };
}

pub use prelude::*;
