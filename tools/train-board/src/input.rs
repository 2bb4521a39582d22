use anyhow::{Context, Result};
use jogja_solo_transit::{Schedule, Station};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read the station list (a JSON array ordered from Yogyakarta to Solo)
pub fn read_stations(path: &Path) -> Result<Vec<Station>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let stations: Vec<Station> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse station list {}", path.display()))?;

    log::info!("  Loaded {} stations", stations.len());
    Ok(stations)
}

/// Read the timetable (`yogyakarta_to_solo` / `solo_to_yogyakarta` lists)
pub fn read_schedule(path: &Path) -> Result<Schedule> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let schedule: Schedule = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse schedule {}", path.display()))?;

    log::info!(
        "  Loaded {} trains ({} to Solo, {} to Yogyakarta)",
        schedule.len(),
        schedule.yogyakarta_to_solo.len(),
        schedule.solo_to_yogyakarta.len()
    );
    Ok(schedule)
}
