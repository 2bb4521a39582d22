//! Ordered station reference list.
//!
//! The catalog order is the physical order of the line from Yogyakarta to
//! Solo; route progress is computed from a station's position in it.

use std::collections::HashMap;

use crate::identifiers::StationCode;
use crate::models::types::{DirectionId, Result, Station, TransitError};

/// Stations in route order with a code lookup
#[derive(Clone, Debug, Default)]
pub struct StationCatalog {
    stations: Vec<Station>,
    index: HashMap<StationCode, usize>,
}

impl StationCatalog {
    /// Build the catalog. If a code repeats, lookups resolve to its first entry.
    pub fn new(stations: Vec<Station>) -> Self {
        let mut index = HashMap::with_capacity(stations.len());
        for (i, station) in stations.iter().enumerate() {
            index.entry(station.code.clone()).or_insert(i);
        }

        Self { stations, index }
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn get(&self, code: &StationCode) -> Option<&Station> {
        self.index.get(code).map(|&i| &self.stations[i])
    }

    /// Look up a station, failing on codes missing from the list.
    pub fn station(&self, code: &StationCode) -> Result<&Station> {
        self.get(code)
            .ok_or_else(|| TransitError::StationNotFound(code.clone()))
    }

    /// Position of a station along the line.
    pub fn route_index(&self, code: &StationCode) -> Result<usize> {
        self.index
            .get(code)
            .copied()
            .ok_or_else(|| TransitError::StationNotFound(code.clone()))
    }

    /// Number of inter-station segments on the line.
    ///
    /// Progress is undefined for fewer than two stations.
    pub fn route_span(&self) -> Result<usize> {
        match self.stations.len() {
            n if n >= 2 => Ok(n - 1),
            n => Err(TransitError::InsufficientStations(n)),
        }
    }

    /// First station of the line (the Yogyakarta end)
    pub fn origin(&self) -> Option<&Station> {
        self.stations.first()
    }

    /// Infer the direction of a train from the station it departs from.
    pub fn direction_of(&self, departure_station: &StationCode) -> Option<DirectionId> {
        self.origin()
            .map(|origin| DirectionId::from_departure_station(departure_station, &origin.code))
    }
}

impl FromIterator<Station> for StationCatalog {
    fn from_iter<T: IntoIterator<Item = Station>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
