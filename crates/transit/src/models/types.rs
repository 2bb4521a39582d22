//! Core data types and enums for the timetable.

use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::identifiers::*;
use crate::models::calendar::WeekdayFlags;
use crate::time::{parse_time_to_minutes, Minutes};

// ============================================================================
// Enums
// ============================================================================

/// Which way along the line a train runs.
///
/// The station catalog is ordered from Yogyakarta to Solo, so `Outbound`
/// progress grows with the catalog index and `Inbound` progress mirrors it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum DirectionId {
    /// Yogyakarta → Solo
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "to_solo"))]
    Outbound = 0,
    /// Solo → Yogyakarta
    #[cfg_attr(feature = "serde", serde(rename = "to_yogyakarta"))]
    Inbound = 1,
}

impl DirectionId {
    /// Infer the direction from a train's departure station and the first
    /// station of the route.
    pub fn from_departure_station(departure_station: &StationCode, route_origin: &StationCode) -> Self {
        if departure_station == route_origin {
            Self::Outbound
        } else {
            Self::Inbound
        }
    }

    /// Machine tag, e.g. `to_solo`.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Outbound => "to_solo",
            Self::Inbound => "to_yogyakarta",
        }
    }

    /// Label used for trains on the map, e.g. `Yogyakarta → Solo`.
    pub fn route_label(self) -> &'static str {
        match self {
            Self::Outbound => "Yogyakarta → Solo",
            Self::Inbound => "Solo → Yogyakarta",
        }
    }

    /// Label used on a departure board, e.g. `ke Solo`.
    pub fn board_label(self) -> &'static str {
        match self {
            Self::Outbound => "ke Solo",
            Self::Inbound => "ke Yogyakarta",
        }
    }

    /// Fraction of the route covered at catalog index `index` of `span + 1` stations.
    pub(crate) fn route_fraction(self, index: usize, span: usize) -> f64 {
        let covered = match self {
            Self::Outbound => index,
            Self::Inbound => span.saturating_sub(index),
        };
        covered as f64 / span as f64
    }
}

// ============================================================================
// Data Structures
// ============================================================================

/// A station on the line
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Station {
    pub code: StationCode,
    pub name: Arc<str>,
    /// Any other display fields of the station list (coordinates, city, ...),
    /// passed through to results untouched.
    #[cfg(feature = "serde")]
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl Station {
    pub fn new(code: impl Into<StationCode>, name: impl AsRef<str>) -> Self {
        Self {
            code: code.into(),
            name: name.as_ref().into(),
            #[cfg(feature = "serde")]
            details: serde_json::Map::new(),
        }
    }

    /// Attach an extra display field.
    #[cfg(feature = "serde")]
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

/// One row of a train's itinerary.
///
/// Times are kept as the raw `"HH:MM"` strings from the timetable. The origin
/// has no arrival and the terminus has no departure.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Stop {
    pub station: StationCode,
    #[cfg_attr(feature = "serde", serde(default))]
    pub arrival: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub departure: Option<String>,
}

impl Stop {
    pub fn new(station: impl Into<StationCode>, arrival: Option<&str>, departure: Option<&str>) -> Self {
        Self {
            station: station.into(),
            arrival: arrival.map(str::to_owned),
            departure: departure.map(str::to_owned),
        }
    }

    pub fn origin(station: impl Into<StationCode>, departure: &str) -> Self {
        Self::new(station, None, Some(departure))
    }

    pub fn intermediate(station: impl Into<StationCode>, arrival: &str, departure: &str) -> Self {
        Self::new(station, Some(arrival), Some(departure))
    }

    pub fn terminus(station: impl Into<StationCode>, arrival: &str) -> Self {
        Self::new(station, Some(arrival), None)
    }

    pub fn arrival_minutes(&self) -> Option<Minutes> {
        parse_time_to_minutes(self.arrival.as_deref())
    }

    pub fn departure_minutes(&self) -> Option<Minutes> {
        parse_time_to_minutes(self.departure.as_deref())
    }
}

/// A scheduled train run
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Train {
    pub train_number: TrainNumber,
    pub operating_days: WeekdayFlags,
    pub departure_station: StationCode,
    pub stops: Vec<Stop>,
    /// Assigned by the [`Schedule`] list the train belongs to.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub direction: DirectionId,
}

impl Train {
    pub fn new(
        train_number: impl Into<TrainNumber>,
        operating_days: WeekdayFlags,
        direction: DirectionId,
        stops: Vec<Stop>,
    ) -> Self {
        let departure_station = stops
            .first()
            .map(|stop| stop.station.clone())
            .unwrap_or_else(|| StationCode::new(""));

        Self {
            train_number: train_number.into(),
            operating_days,
            departure_station,
            stops,
            direction,
        }
    }

    /// Check if the train runs on a lowercase day name (`"monday"`, ...)
    pub fn operates_on(&self, day_name: &str) -> bool {
        self.operating_days.contains_name(day_name)
    }

    /// First stop at the given station, if the train calls there
    pub fn stop_at(&self, station: &StationCode) -> Option<&Stop> {
        self.stops.iter().find(|stop| &stop.station == station)
    }

    /// Departure from the origin, in minutes after midnight
    pub fn first_departure(&self) -> Option<Minutes> {
        self.stops.first().and_then(Stop::departure_minutes)
    }

    /// Arrival at the terminus, in minutes after midnight
    pub fn last_arrival(&self) -> Option<Minutes> {
        self.stops.last().and_then(Stop::arrival_minutes)
    }
}

/// The full timetable: one list of trains per direction.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(from = "ScheduleRecord"))]
pub struct Schedule {
    pub yogyakarta_to_solo: Vec<Train>,
    pub solo_to_yogyakarta: Vec<Train>,
}

impl Schedule {
    /// Build a schedule, stamping each train with the direction of its list.
    pub fn new(mut yogyakarta_to_solo: Vec<Train>, mut solo_to_yogyakarta: Vec<Train>) -> Self {
        for train in &mut yogyakarta_to_solo {
            train.direction = DirectionId::Outbound;
        }
        for train in &mut solo_to_yogyakarta {
            train.direction = DirectionId::Inbound;
        }

        Self {
            yogyakarta_to_solo,
            solo_to_yogyakarta,
        }
    }

    pub fn trains(&self, direction: DirectionId) -> &[Train] {
        match direction {
            DirectionId::Outbound => &self.yogyakarta_to_solo,
            DirectionId::Inbound => &self.solo_to_yogyakarta,
        }
    }

    /// All trains, outbound first, each list in timetable order
    pub fn all_trains(&self) -> impl Iterator<Item = &Train> {
        self.yogyakarta_to_solo
            .iter()
            .chain(self.solo_to_yogyakarta.iter())
    }

    pub fn len(&self) -> usize {
        self.yogyakarta_to_solo.len() + self.solo_to_yogyakarta.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Schedule as stored on disk; either list may be missing.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct ScheduleRecord {
    #[serde(default)]
    yogyakarta_to_solo: Vec<Train>,
    #[serde(default)]
    solo_to_yogyakarta: Vec<Train>,
}

#[cfg(feature = "serde")]
impl From<ScheduleRecord> for Schedule {
    fn from(record: ScheduleRecord) -> Self {
        Self::new(record.yogyakarta_to_solo, record.solo_to_yogyakarta)
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    #[error("Station not found: {0}")]
    StationNotFound(StationCode),

    #[error("Station list needs at least 2 stations to compute progress, got {0}")]
    InsufficientStations(usize),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, TransitError>;
