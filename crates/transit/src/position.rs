//! Where is a train right now?
//!
//! A train's itinerary is scanned stop by stop. For each stop index the
//! transition function decides between three states:
//!
//! - **AtStation**: `arrival <= now <= departure` (closed interval). The origin
//!   only needs `now <= departure`, the terminus only `now >= arrival`.
//! - **InTransit**: `departure(i) < now < arrival(i + 1)` (open interval).
//! - **Absent**: neither, move on to the next stop.
//!
//! The at-station check runs before the in-transit check of the same index
//! and the first non-absent state wins, so instants that sit exactly on a
//! timetable boundary always resolve to the station.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::catalog::StationCatalog;
use crate::identifiers::StationCode;
use crate::models::types::{DirectionId, Result, Station, Stop, Train};
use crate::time::Minutes;

// ============================================================================
// Results
// ============================================================================

/// A train standing at a station
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub struct AtStation {
    pub station: Station,
    pub station_code: StationCode,
    pub arrival_time: Option<String>,
    pub departure_time: Option<String>,
    /// Route completion in percent (0..=100)
    pub progress: f64,
}

/// A train running between two consecutive stops
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub struct InTransit {
    pub from_station: Station,
    pub to_station: Station,
    pub from_station_code: StationCode,
    pub to_station_code: StationCode,
    /// Fraction of the current segment covered (0..=1)
    pub journey_progress: f64,
    pub eta_minutes: Minutes,
    /// Route completion in percent (0..=100)
    pub progress: f64,
}

/// Current position of a running train
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(tag = "status", rename_all = "snake_case"))]
pub enum Position {
    AtStation(AtStation),
    InTransit(InTransit),
}

impl Position {
    /// Route completion in percent
    pub fn progress(&self) -> f64 {
        match self {
            Self::AtStation(at) => at.progress,
            Self::InTransit(transit) => transit.progress,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            Self::AtStation(_) => "at_station",
            Self::InTransit(_) => "in_transit",
        }
    }

    pub fn is_at_station(&self) -> bool {
        matches!(self, Self::AtStation(_))
    }
}

// ============================================================================
// State machine
// ============================================================================

/// Where a train is relative to its own itinerary
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopState<'a> {
    Absent,
    AtStation(&'a Stop),
    InTransit { from: &'a Stop, to: &'a Stop },
}

impl<'a> StopState<'a> {
    /// Evaluate one stop (and the following one, if any) at `now`.
    pub fn transition(now: Minutes, stop: &'a Stop, next: Option<&'a Stop>) -> Self {
        let dwelling = match (stop.arrival_minutes(), stop.departure_minutes()) {
            (Some(arrival), Some(departure)) => arrival <= now && now <= departure,
            (Some(arrival), None) => now >= arrival,
            (None, Some(departure)) => now <= departure,
            (None, None) => false,
        };
        if dwelling {
            return Self::AtStation(stop);
        }

        if let Some(next) = next {
            if let (Some(departure), Some(arrival)) = (stop.departure_minutes(), next.arrival_minutes()) {
                if departure < now && now < arrival {
                    return Self::InTransit { from: stop, to: next };
                }
            }
        }

        Self::Absent
    }

    /// Scan an itinerary in order and return the first non-absent state.
    pub fn locate(stops: &'a [Stop], now: Minutes) -> Self {
        (0..stops.len())
            .map(|i| Self::transition(now, &stops[i], stops.get(i + 1)))
            .find(|state| *state != Self::Absent)
            .unwrap_or(Self::Absent)
    }
}

// ============================================================================
// Progress
// ============================================================================

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Fraction of a segment covered at `now`, clamped to `0..=1`.
///
/// Zero-length or inverted segments report 0 before the arrival and 1 from
/// the arrival on.
pub fn journey_progress(departure: Minutes, arrival: Minutes, now: Minutes) -> f64 {
    if arrival <= departure {
        return if now >= arrival { 1.0 } else { 0.0 };
    }
    let elapsed = now as f64 - departure as f64;
    clamp_unit(elapsed / (arrival - departure) as f64)
}

/// Route completion in percent for a train standing at `station`.
pub fn station_progress(catalog: &StationCatalog, station: &StationCode, direction: DirectionId) -> Result<f64> {
    let span = catalog.route_span()?;
    let index = catalog.route_index(station)?;
    Ok(clamp_unit(direction.route_fraction(index, span)) * 100.0)
}

/// Route completion in percent for a train that left `from` and has covered
/// `journey_progress` of the segment.
///
/// Every segment counts as `1 / (stations - 1)` of the line, whatever the
/// actual distance between the two stops.
pub fn transit_progress(
    catalog: &StationCatalog,
    from: &StationCode,
    journey_progress: f64,
    direction: DirectionId,
) -> Result<f64> {
    let span = catalog.route_span()?;
    let index = catalog.route_index(from)?;
    let base = direction.route_fraction(index, span);
    let segment = clamp_unit(journey_progress) / span as f64;
    Ok(clamp_unit(base + segment) * 100.0)
}

// ============================================================================
// Resolver
// ============================================================================

/// Resolve where `train` is at `now` (minutes after midnight).
///
/// Returns `Ok(None)` when the train is not running. Fails when the station
/// list is too short to compute progress or a stop references a station
/// missing from it.
pub fn resolve_position(train: &Train, now: Minutes, catalog: &StationCatalog) -> Result<Option<Position>> {
    catalog.route_span()?;

    let (Some(first_departure), Some(last_arrival)) = (train.first_departure(), train.last_arrival()) else {
        log::debug!("Train {} has no usable service window", train.train_number);
        return Ok(None);
    };
    if now < first_departure || now > last_arrival {
        return Ok(None);
    }

    match StopState::locate(&train.stops, now) {
        StopState::AtStation(stop) => {
            let station = catalog.station(&stop.station)?.clone();
            let progress = station_progress(catalog, &stop.station, train.direction)?;

            Ok(Some(Position::AtStation(AtStation {
                station,
                station_code: stop.station.clone(),
                arrival_time: stop.arrival.clone(),
                departure_time: stop.departure.clone(),
                progress,
            })))
        }
        StopState::InTransit { from, to } => {
            let from_station = catalog.station(&from.station)?.clone();
            let to_station = catalog.station(&to.station)?.clone();

            // Both bounds exist, otherwise the state machine would not have matched
            let departure = from.departure_minutes().unwrap_or(now);
            let arrival = to.arrival_minutes().unwrap_or(now);
            let journey = journey_progress(departure, arrival, now);
            let progress = transit_progress(catalog, &from.station, journey, train.direction)?;

            Ok(Some(Position::InTransit(InTransit {
                from_station,
                to_station,
                from_station_code: from.station.clone(),
                to_station_code: to.station.clone(),
                journey_progress: journey,
                eta_minutes: arrival.saturating_sub(now),
                progress,
            })))
        }
        StopState::Absent => {
            log::warn!(
                "Train {} is inside its service window at {} but matches no stop; check its timetable",
                train.train_number,
                crate::time::format_minutes_to_time(now)
            );
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::calendar::WeekdayFlags;
    use crate::models::types::TransitError;
    use crate::time::parse_time_to_minutes;
    use approx::assert_relative_eq;

    fn at(text: &str) -> Minutes {
        parse_time_to_minutes(Some(text)).unwrap()
    }

    fn catalog() -> StationCatalog {
        StationCatalog::new(vec![
            Station::new("A", "Alpha"),
            Station::new("B", "Bravo"),
            Station::new("C", "Charlie"),
        ])
    }

    fn train(direction: DirectionId) -> Train {
        Train::new(
            "T1",
            WeekdayFlags::daily(),
            direction,
            vec![
                Stop::origin("A", "08:00"),
                Stop::intermediate("B", "08:30", "08:32"),
                Stop::terminus("C", "09:00"),
            ],
        )
    }

    fn resolve(now: &str) -> Option<Position> {
        resolve_position(&train(DirectionId::Outbound), at(now), &catalog()).unwrap()
    }

    fn expect_station(now: &str) -> AtStation {
        match resolve(now) {
            Some(Position::AtStation(station)) => station,
            other => panic!("expected at-station at {}, got {:?}", now, other),
        }
    }

    fn expect_transit(now: &str) -> InTransit {
        match resolve(now) {
            Some(Position::InTransit(transit)) => transit,
            other => panic!("expected in-transit at {}, got {:?}", now, other),
        }
    }

    #[test]
    fn test_in_transit_midway() {
        let transit = expect_transit("08:15");
        assert_eq!(transit.from_station_code.as_str(), "A");
        assert_eq!(transit.to_station_code.as_str(), "B");
        assert_eq!(&*transit.to_station.name, "Bravo");
        assert_relative_eq!(transit.journey_progress, 0.5);
        assert_eq!(transit.eta_minutes, 15);
        assert_relative_eq!(transit.progress, 25.0);
    }

    #[test]
    fn test_boundaries_resolve_to_station() {
        for now in ["08:30", "08:31", "08:32"] {
            let station = expect_station(now);
            assert_eq!(station.station_code.as_str(), "B");
            assert_eq!(station.arrival_time.as_deref(), Some("08:30"));
            assert_eq!(station.departure_time.as_deref(), Some("08:32"));
            assert_relative_eq!(station.progress, 50.0);
        }

        let origin = expect_station("08:00");
        assert_eq!(origin.station_code.as_str(), "A");
        assert_eq!(origin.arrival_time, None);
    }

    #[test]
    fn test_leaving_intermediate_stop() {
        let transit = expect_transit("08:33");
        assert_eq!(transit.from_station_code.as_str(), "B");
        assert_eq!(transit.to_station_code.as_str(), "C");
        assert_eq!(transit.eta_minutes, 27);
    }

    #[test]
    fn test_service_window() {
        assert_eq!(resolve("07:59"), None);
        assert_eq!(resolve("09:01"), None);

        let terminus = expect_station("09:00");
        assert_eq!(terminus.station_code.as_str(), "C");
        assert_eq!(terminus.departure_time, None);
        assert_relative_eq!(terminus.progress, 100.0);
    }

    #[test]
    fn test_inbound_progress_is_mirrored() {
        let stops = vec![
            Stop::origin("C", "08:00"),
            Stop::intermediate("B", "08:30", "08:32"),
            Stop::terminus("A", "09:00"),
        ];
        let train = Train::new("T2", WeekdayFlags::daily(), DirectionId::Inbound, stops);
        let catalog = catalog();

        let origin = resolve_position(&train, at("07:30"), &catalog).unwrap();
        assert_eq!(origin, None);

        let start = resolve_position(&train, at("08:00"), &catalog).unwrap().unwrap();
        assert_relative_eq!(start.progress(), 0.0);

        let moving = resolve_position(&train, at("08:15"), &catalog).unwrap().unwrap();
        assert_eq!(moving.status(), "in_transit");
        assert_relative_eq!(moving.progress(), 25.0);

        let end = resolve_position(&train, at("09:00"), &catalog).unwrap().unwrap();
        assert!(end.is_at_station());
        assert_relative_eq!(end.progress(), 100.0);
    }

    #[test]
    fn test_two_station_route() {
        let catalog = StationCatalog::new(vec![Station::new("A", "Alpha"), Station::new("C", "Charlie")]);

        let first = station_progress(&catalog, &StationCode::new("A"), DirectionId::Outbound).unwrap();
        let last = station_progress(&catalog, &StationCode::new("C"), DirectionId::Outbound).unwrap();
        assert_relative_eq!(first, 0.0);
        assert_relative_eq!(last, 100.0);

        let halfway = transit_progress(&catalog, &StationCode::new("A"), 0.5, DirectionId::Outbound).unwrap();
        assert_relative_eq!(halfway, 50.0);
    }

    #[test]
    fn test_journey_progress_is_clamped() {
        assert_relative_eq!(journey_progress(480, 510, 495), 0.5);
        assert_eq!(journey_progress(480, 510, 470), 0.0);
        assert_eq!(journey_progress(480, 510, 520), 1.0);

        // Zero-length and inverted segments
        assert_eq!(journey_progress(500, 500, 500), 1.0);
        assert_eq!(journey_progress(520, 500, 490), 0.0);
        assert_eq!(journey_progress(520, 500, 510), 1.0);

        for now in 0..1440 {
            let p = journey_progress(600, 540, now);
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_transit_progress_never_exceeds_route() {
        let catalog = catalog();
        let p = transit_progress(&catalog, &StationCode::new("C"), 1.0, DirectionId::Outbound).unwrap();
        assert_relative_eq!(p, 100.0);
        let p = transit_progress(&catalog, &StationCode::new("A"), 5.0, DirectionId::Inbound).unwrap();
        assert_relative_eq!(p, 100.0);
    }

    #[test]
    fn test_state_machine_prefers_station() {
        let stop = Stop::intermediate("B", "08:30", "08:32");
        let next = Stop::terminus("C", "09:00");

        assert_eq!(StopState::transition(at("08:32"), &stop, Some(&next)), StopState::AtStation(&stop));
        assert_eq!(
            StopState::transition(at("08:40"), &stop, Some(&next)),
            StopState::InTransit { from: &stop, to: &next }
        );
        assert_eq!(StopState::transition(at("09:00"), &stop, Some(&next)), StopState::Absent);
        assert_eq!(StopState::transition(at("08:40"), &stop, None), StopState::Absent);
    }

    #[test]
    fn test_unknown_station_is_an_error() {
        let train = Train::new(
            "T3",
            WeekdayFlags::daily(),
            DirectionId::Outbound,
            vec![Stop::origin("A", "08:00"), Stop::terminus("Z", "08:40")],
        );

        let err = resolve_position(&train, at("08:40"), &catalog()).unwrap_err();
        assert!(matches!(err, TransitError::StationNotFound(code) if code.as_str() == "Z"));

        let err = resolve_position(&train, at("08:20"), &catalog()).unwrap_err();
        assert!(matches!(err, TransitError::StationNotFound(_)));
    }

    #[test]
    fn test_short_station_list_fails_fast() {
        let catalog = StationCatalog::new(vec![Station::new("A", "Alpha")]);
        let err = resolve_position(&train(DirectionId::Outbound), at("06:00"), &catalog).unwrap_err();
        assert!(matches!(err, TransitError::InsufficientStations(1)));
    }

    #[test]
    fn test_gap_in_timetable_is_absent() {
        // Missing arrival at B leaves 08:20 unmatched
        let train = Train::new(
            "T4",
            WeekdayFlags::daily(),
            DirectionId::Outbound,
            vec![
                Stop::origin("A", "08:00"),
                Stop::new("B", None, None),
                Stop::terminus("C", "09:00"),
            ],
        );
        assert_eq!(resolve_position(&train, at("08:20"), &catalog()).unwrap(), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_position_json_shape() {
        let json = serde_json::to_value(resolve("08:15").unwrap()).unwrap();
        assert_eq!(json["status"], "in_transit");
        assert_eq!(json["fromStationCode"], "A");
        assert_eq!(json["toStation"]["name"], "Bravo");
        assert_eq!(json["etaMinutes"], 15);
        assert_eq!(json["journeyProgress"], 0.5);

        let json = serde_json::to_value(resolve("08:31").unwrap()).unwrap();
        assert_eq!(json["status"], "at_station");
        assert_eq!(json["stationCode"], "B");
        assert_eq!(json["arrivalTime"], "08:30");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_position_carries_station_display_fields() {
        let stations: Vec<Station> = serde_json::from_str(
            r#"[
                {"code": "A", "name": "Alpha", "lat": -7.78, "lng": 110.36},
                {"code": "B", "name": "Bravo", "city": "Klaten"},
                {"code": "C", "name": "Charlie"}
            ]"#,
        )
        .unwrap();
        let catalog = StationCatalog::new(stations);
        let train = train(DirectionId::Outbound);

        let origin = resolve_position(&train, at("08:00"), &catalog).unwrap().unwrap();
        let json = serde_json::to_value(&origin).unwrap();
        assert_eq!(json["station"]["lat"], -7.78);
        assert_eq!(json["station"]["lng"], 110.36);
        assert_eq!(json["station"]["name"], "Alpha");

        let moving = resolve_position(&train, at("08:15"), &catalog).unwrap().unwrap();
        let json = serde_json::to_value(&moving).unwrap();
        assert_eq!(json["fromStation"]["lat"], -7.78);
        assert_eq!(json["toStation"]["city"], "Klaten");
        assert!(json["toStation"].get("lat").is_none());
    }
}
