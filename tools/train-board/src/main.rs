use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use jogja_solo_transit::prelude::*;
use std::path::PathBuf;

mod input;
mod output;

use input::{read_schedule, read_stations};
use output::{print_active_trains, print_json, print_next_trains};

#[derive(Parser, Debug)]
#[command(
    name = "train-board",
    author,
    version,
    about = "Live train positions and departures for the Yogyakarta - Solo line",
    long_about = "Infers where every scheduled train on the Yogyakarta - Solo line is right now \
                  from the timetable alone, or lists the next departures from a station.\n\n\
                  The station list must be ordered from Yogyakarta to Solo; route progress \
                  is computed from each station's position in it."
)]
struct Args {
    /// Station list JSON file (array of {code, name})
    #[arg(long)]
    stations: PathBuf,

    /// Schedule JSON file (yogyakarta_to_solo / solo_to_yogyakarta)
    #[arg(long)]
    schedule: PathBuf,

    /// Local date and time to query, e.g. 2024-05-01T08:15 (defaults to now)
    #[arg(long, value_parser = parse_instant)]
    at: Option<NaiveDateTime>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show every train running at the query time
    Active,

    /// Show the next departures from a station
    Next {
        /// Station code, e.g. YK
        #[arg(short, long)]
        station: String,

        /// Maximum number of departures
        #[arg(short, long, default_value_t = DEFAULT_NEXT_TRAINS_LIMIT)]
        limit: usize,
    },
}

fn parse_instant(text: &str) -> std::result::Result<NaiveDateTime, String> {
    ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .ok_or_else(|| format!("expected YYYY-MM-DDTHH:MM, got {:?}", text))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    let now = args.at.unwrap_or_else(|| chrono::Local::now().naive_local());
    log::info!("Query time: {} ({})", now.format("%Y-%m-%d %H:%M"), current_day_name(&now));

    log::info!("Loading stations from {}", args.stations.display());
    let stations = read_stations(&args.stations)?;
    log::info!("Loading schedule from {}", args.schedule.display());
    let schedule = read_schedule(&args.schedule)?;

    let provider = StaticScheduleProvider::from_data(stations, schedule);
    let unknown = provider.unknown_stations();
    if !unknown.is_empty() {
        let codes: Vec<_> = unknown.iter().map(StationCode::as_str).collect();
        log::warn!("Schedule references stations missing from the station list: {}", codes.join(", "));
    }

    match args.command {
        Command::Active => {
            let active = provider
                .active_trains_at(&now)
                .context("Failed to compute train positions")?;

            if args.json {
                print_json(&active)?;
            } else {
                print_active_trains(&active, current_time_minutes(&now));
            }
        }
        Command::Next { station, limit } => {
            if limit == 0 {
                bail!("--limit must be at least 1");
            }

            let code = StationCode::new(&station);
            let Some(station) = provider.get_station(&code) else {
                bail!("Unknown station code: {}", code);
            };
            let next = provider.next_trains_at(&code, limit, &now)?;

            if args.json {
                print_json(&next)?;
            } else {
                print_next_trains(&station.name, &next);
            }
        }
    }

    Ok(())
}
