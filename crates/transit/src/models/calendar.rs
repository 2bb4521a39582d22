//! Operating days for scheduled trains.
//!
//! Schedules list the days a train runs as lowercase English weekday names
//! (`"monday"`, `"saturday"`, ...). They are stored as a compact weekday bitset.

use chrono::Weekday;
use std::fmt;

use crate::models::types::{Result, TransitError};

/// Lowercase English weekday names, Sunday first.
pub const DAY_NAMES: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

/// Lowercase English name of a weekday.
pub fn day_name(weekday: Weekday) -> &'static str {
    DAY_NAMES[weekday.num_days_from_sunday() as usize]
}

/// Parse a lowercase English weekday name.
pub fn parse_day_name(name: &str) -> Option<Weekday> {
    match name {
        "sunday" => Some(Weekday::Sun),
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        _ => None,
    }
}

/// Compact representation of which weekdays a train runs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WeekdayFlags {
    pub(crate) flags: u8,
}

impl WeekdayFlags {
    pub fn new() -> Self {
        Self { flags: 0 }
    }

    /// Every day of the week.
    pub fn daily() -> Self {
        Self::from_bools(true, true, true, true, true, true, true)
    }

    pub fn set(&mut self, weekday: Weekday) {
        self.flags |= 1 << weekday.number_from_monday();
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        (self.flags & (1 << weekday.number_from_monday())) != 0
    }

    /// Check a lowercase day name; unknown names never match.
    pub fn contains_name(&self, name: &str) -> bool {
        parse_day_name(name).is_some_and(|weekday| self.contains(weekday))
    }

    pub fn is_empty(&self) -> bool {
        self.flags == 0
    }

    pub fn from_bools(mon: bool, tue: bool, wed: bool, thu: bool, fri: bool, sat: bool, sun: bool) -> Self {
        let mut flags = Self::new();
        if mon { flags.set(Weekday::Mon); }
        if tue { flags.set(Weekday::Tue); }
        if wed { flags.set(Weekday::Wed); }
        if thu { flags.set(Weekday::Thu); }
        if fri { flags.set(Weekday::Fri); }
        if sat { flags.set(Weekday::Sat); }
        if sun { flags.set(Weekday::Sun); }
        flags
    }

    /// Build from lowercase day names as they appear in schedule files.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut flags = Self::new();
        for name in names {
            let name = name.as_ref();
            let weekday = parse_day_name(name)
                .ok_or_else(|| TransitError::InvalidData(format!("Unknown operating day: {:?}", name)))?;
            flags.set(weekday);
        }
        Ok(flags)
    }

    /// Day names in Sunday-first order.
    pub fn names(&self) -> Vec<&'static str> {
        DAY_NAMES
            .iter()
            .copied()
            .filter(|name| self.contains_name(name))
            .collect()
    }
}

impl fmt::Display for WeekdayFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names().join(", "))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for WeekdayFlags {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq;

        let names = self.names();
        let mut seq = serializer.serialize_seq(Some(names.len()))?;
        for name in names {
            seq.serialize_element(name)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for WeekdayFlags {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        Self::from_names(&names).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_flags() {
        let mut flags = WeekdayFlags::new();
        flags.set(Weekday::Mon);
        flags.set(Weekday::Wed);
        flags.set(Weekday::Fri);

        assert!(flags.contains(Weekday::Mon));
        assert!(!flags.contains(Weekday::Tue));
        assert!(flags.contains(Weekday::Wed));
    }

    #[test]
    fn test_day_names() {
        assert_eq!(day_name(Weekday::Sun), "sunday");
        assert_eq!(day_name(Weekday::Sat), "saturday");
        for name in DAY_NAMES {
            assert_eq!(day_name(parse_day_name(name).unwrap()), name);
        }
        assert_eq!(parse_day_name("Monday"), None);
    }

    #[test]
    fn test_from_names() {
        let weekend = WeekdayFlags::from_names(["saturday", "sunday"]).unwrap();
        assert!(weekend.contains_name("sunday"));
        assert!(!weekend.contains_name("monday"));
        assert!(!weekend.contains_name("funday"));
        assert_eq!(weekend.names(), vec!["sunday", "saturday"]);
        assert_eq!(weekend.to_string(), "sunday, saturday");

        let err = WeekdayFlags::from_names(["monday", "someday"]).unwrap_err();
        assert!(matches!(err, TransitError::InvalidData(_)));
    }

    #[test]
    fn test_daily() {
        let daily = WeekdayFlags::daily();
        assert_eq!(daily.names().len(), 7);
        assert!(WeekdayFlags::new().is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_as_day_name_list() {
        let flags: WeekdayFlags = serde_json::from_str(r#"["friday", "monday"]"#).unwrap();
        assert!(flags.contains(Weekday::Fri));
        assert_eq!(serde_json::to_string(&flags).unwrap(), r#"["monday","friday"]"#);

        assert!(serde_json::from_str::<WeekdayFlags>(r#"["mon"]"#).is_err());
    }
}
