//! Conversions between `"HH:MM"` timetable strings and minutes after midnight.
//!
//! All times live within a single service day (`0..=1439`); trains running
//! past midnight are not representable.

use chrono::{Datelike, Timelike};

use crate::models::calendar::day_name;

/// Minutes after midnight.
pub type Minutes = u32;

/// Parse `"HH:MM"` into minutes after midnight.
///
/// A missing, empty or malformed time yields `None`, meaning "no such
/// boundary" (e.g. the origin has no arrival).
pub fn parse_time_to_minutes(text: Option<&str>) -> Option<Minutes> {
    let (hours, minutes) = text?.trim().split_once(':')?;
    let hours: Minutes = hours.parse().ok()?;
    let minutes: Minutes = minutes.parse().ok()?;
    hours.checked_mul(60)?.checked_add(minutes)
}

/// Wall-clock minutes after midnight of the given instant.
pub fn current_time_minutes(now: &impl Timelike) -> Minutes {
    now.hour() * 60 + now.minute()
}

/// Format minutes after midnight as a zero-padded `"HH:MM"`.
///
/// Only meaningful for `0..=1439`.
pub fn format_minutes_to_time(minutes: Minutes) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Lowercase weekday name of the given instant, e.g. `"monday"`.
pub fn current_day_name(now: &impl Datelike) -> &'static str {
    day_name(now.weekday())
}
