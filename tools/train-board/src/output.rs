use anyhow::{Context, Result};
use jogja_solo_transit::{format_minutes_to_time, ActiveTrain, NextTrain, Position};
use serde::Serialize;

/// One line per active train
pub fn format_active_train(active: &ActiveTrain) -> String {
    let train = &active.train;
    let location = match &active.position {
        Position::AtStation(at) => format!(
            "at {} ({} - {})",
            at.station.name,
            at.arrival_time.as_deref().unwrap_or("--:--"),
            at.departure_time.as_deref().unwrap_or("--:--"),
        ),
        Position::InTransit(transit) => format!(
            "{} -> {} ({:.0}% of segment, arriving in {} min)",
            transit.from_station.name,
            transit.to_station.name,
            transit.journey_progress * 100.0,
            transit.eta_minutes,
        ),
    };

    format!(
        "{:<10} {:<20} {:>5.1}%  {}",
        train.base.train_number,
        train.label,
        active.position.progress(),
        location
    )
}

/// One line per upcoming departure
pub fn format_next_train(next: &NextTrain) -> String {
    format!(
        "{:<10} {:<15} {}  in {} min",
        next.train_number, next.direction, next.departure_time, next.minutes_until
    )
}

pub fn print_active_trains(active: &[ActiveTrain], now_minutes: u32) {
    println!("Trains running at {}", format_minutes_to_time(now_minutes));
    if active.is_empty() {
        println!("  (none)");
    }
    for train in active {
        println!("  {}", format_active_train(train));
    }
}

pub fn print_next_trains(station_name: &str, next: &[NextTrain]) {
    println!("Next departures from {}", station_name);
    if next.is_empty() {
        println!("  (none today)");
    }
    for train in next {
        println!("  {}", format_next_train(train));
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    println!("{}", json);
    Ok(())
}
