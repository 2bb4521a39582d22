//! In-memory timetable provider.
//!
//! Holds the station catalog and the schedule loaded by the caller and
//! answers fleet queries against them.

use std::sync::Arc;

use crate::catalog::StationCatalog;
use crate::fleet::{active_trains, next_trains, ActiveTrain, NextTrain};
use crate::identifiers::{StationCode, TrainNumber};
use crate::models::types::*;

// ============================================================================
// Provider Trait
// ============================================================================

/// Source of the station list and the timetable, with the fleet queries on top
pub trait ScheduleProvider: Send + Sync {
    fn catalog(&self) -> &StationCatalog;
    fn schedule(&self) -> &Schedule;

    // ---- Lookups ----

    fn get_station(&self, code: &StationCode) -> Option<&Station> {
        self.catalog().get(code)
    }

    fn get_train(&self, number: &TrainNumber) -> Option<&Train> {
        self.schedule()
            .all_trains()
            .find(|train| &train.train_number == number)
    }

    // ---- Queries ----

    /// Trains running at `now`, see [`active_trains`]
    fn active_trains_at(&self, now: &chrono::NaiveDateTime) -> Result<Vec<ActiveTrain>> {
        active_trains(self.schedule(), self.catalog(), now)
    }

    /// Upcoming departures from `station`, see [`next_trains`]
    fn next_trains_at(&self, station: &StationCode, limit: usize, now: &chrono::NaiveDateTime) -> Result<Vec<NextTrain>> {
        self.catalog().station(station)?;
        Ok(next_trains(self.schedule(), station, limit, now))
    }
}

// ============================================================================
// Static Provider
// ============================================================================

/// In-memory provider
///
/// This type is cheap to clone since all data is stored in `Arc`s.
#[derive(Clone, Debug, Default)]
pub struct StaticScheduleProvider {
    catalog: Arc<StationCatalog>,
    schedule: Arc<Schedule>,
}

impl StaticScheduleProvider {
    /// Create a new empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Build provider from already loaded data
    pub fn from_data(stations: Vec<Station>, schedule: Schedule) -> Self {
        Self {
            catalog: Arc::new(StationCatalog::new(stations)),
            schedule: Arc::new(schedule),
        }
    }

    /// Stop codes that are missing from the station list, in first-seen order.
    ///
    /// Queries touching such a stop fail with [`TransitError::StationNotFound`].
    pub fn unknown_stations(&self) -> Vec<StationCode> {
        let mut missing: Vec<StationCode> = Vec::new();
        for train in self.schedule.all_trains() {
            for stop in &train.stops {
                if self.catalog.get(&stop.station).is_none() && !missing.contains(&stop.station) {
                    missing.push(stop.station.clone());
                }
            }
        }
        missing
    }
}

impl ScheduleProvider for StaticScheduleProvider {
    fn catalog(&self) -> &StationCatalog {
        &self.catalog
    }

    fn schedule(&self) -> &Schedule {
        &self.schedule
    }
}
