//! Queries over the whole timetable: active trains and upcoming departures.

use chrono::{Datelike, Timelike};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::catalog::StationCatalog;
use crate::identifiers::{StationCode, TrainNumber};
use crate::models::types::{DirectionId, Result, Schedule, Train};
use crate::position::{resolve_position, Position};
use crate::time::{current_day_name, current_time_minutes, Minutes};

/// Number of departures returned when the caller has no preference
pub const DEFAULT_NEXT_TRAINS_LIMIT: usize = 5;

/// A train together with its direction and a display label
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TaggedTrain {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub base: Train,
    pub direction: DirectionId,
    #[cfg_attr(feature = "serde", serde(rename = "directionLabel"))]
    pub label: &'static str,
}

impl TaggedTrain {
    pub fn new(base: Train, label: &'static str) -> Self {
        Self {
            direction: base.direction,
            base,
            label,
        }
    }

    /// Tag with the route label, e.g. `Yogyakarta → Solo`
    pub fn with_route_label(base: &Train) -> Self {
        Self::new(base.clone(), base.direction.route_label())
    }
}

/// A running train and where it is
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ActiveTrain {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub train: TaggedTrain,
    pub position: Position,
}

/// An upcoming departure from a station
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub struct NextTrain {
    pub train_number: TrainNumber,
    /// Board label, e.g. `ke Yogyakarta`
    pub direction: &'static str,
    pub departure_time: String,
    pub minutes_until: Minutes,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub direction_id: DirectionId,
}

/// Every train running at `now` with its position.
///
/// Only trains operating on the weekday of `now` are considered. Outbound
/// trains come first, then inbound, each in timetable order.
pub fn active_trains<T>(schedule: &Schedule, catalog: &StationCatalog, now: &T) -> Result<Vec<ActiveTrain>>
where
    T: Datelike + Timelike,
{
    catalog.route_span()?;

    let minutes = current_time_minutes(now);
    let day = current_day_name(now);

    let mut active = Vec::new();
    for direction in [DirectionId::Outbound, DirectionId::Inbound] {
        for train in schedule.trains(direction) {
            if !train.operates_on(day) {
                continue;
            }

            if let Some(position) = resolve_position(train, minutes, catalog)? {
                active.push(ActiveTrain {
                    train: TaggedTrain::with_route_label(train),
                    position,
                });
            }
        }
    }

    log::debug!(
        "{} of {} trains active on {} at minute {}",
        active.len(),
        schedule.len(),
        day,
        minutes
    );

    Ok(active)
}

/// The next `limit` departures from `station` after `now`, earliest first.
///
/// A train that ends at `station` has no departure there and is skipped, as is
/// one leaving exactly at `now`.
pub fn next_trains<T>(schedule: &Schedule, station: &StationCode, limit: usize, now: &T) -> Vec<NextTrain>
where
    T: Datelike + Timelike,
{
    let minutes = current_time_minutes(now);
    let day = current_day_name(now);

    let mut upcoming: Vec<(Minutes, NextTrain)> = schedule
        .all_trains()
        .filter(|train| train.operates_on(day))
        .filter_map(|train| {
            let stop = train.stop_at(station)?;
            let departure = stop.departure_minutes()?;
            if departure <= minutes {
                return None;
            }

            let next = NextTrain {
                train_number: train.train_number.clone(),
                direction: train.direction.board_label(),
                departure_time: stop.departure.clone()?,
                minutes_until: departure - minutes,
                direction_id: train.direction,
            };
            Some((departure, next))
        })
        .collect();

    upcoming.sort_by_key(|(departure, _)| *departure);
    upcoming.truncate(limit);

    log::debug!("{} upcoming departures from {} on {}", upcoming.len(), station, day);

    upcoming.into_iter().map(|(_, next)| next).collect()
}
