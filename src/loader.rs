use std::fs::File;
use std::path::Path;

use log::info;

use crate::error::{Error, Result};
use crate::models::{DayFilter, Filters, MonthFilter, RawTrip, Trip};

/// Load the trip export for `filters.city` from `data_dir` and apply the
/// month and day filters.
///
/// Rows are parsed strictly: a malformed timestamp or numeric field aborts
/// the load with [`Error::Parse`] naming the offending line, so a silently
/// truncated table can never misreport aggregates.
pub fn load_trips<P: AsRef<Path>>(data_dir: P, filters: &Filters) -> Result<Vec<Trip>> {
    let path = data_dir.as_ref().join(filters.city.csv_file());
    let file = File::open(&path).map_err(|source| Error::DataSource {
        path: path.clone(),
        source,
    })?;
    let mut rdr = csv::Reader::from_reader(file);

    let mut trips = Vec::new();
    let mut read = 0usize;
    for (idx, row) in rdr.deserialize::<RawTrip>().enumerate() {
        // The header occupies line 1, so data row `idx` sits at line idx + 2.
        let line = idx as u64 + 2;
        let raw = row.map_err(|e| Error::Parse {
            line: e.position().map_or(line, csv::Position::line),
            message: e.to_string(),
        })?;
        let trip = raw.into_trip().map_err(|e| Error::Parse {
            line,
            message: format!("invalid start time: {e}"),
        })?;
        read += 1;
        if filters.month.matches(trip.month) && filters.day.matches(trip.weekday) {
            trips.push(trip);
        }
    }

    info!(
        "{}: read {} rows, retained {} after filters",
        path.display(),
        read,
        trips.len()
    );
    Ok(trips)
}

/// Re-apply month/day filters to an already loaded table in memory.
///
/// Filtering an unfiltered load with (M, D) yields the same rows as loading
/// directly with (M, D).
pub fn apply_filters(trips: &[Trip], month: MonthFilter, day: DayFilter) -> Vec<Trip> {
    trips
        .iter()
        .filter(|t| month.matches(t.month) && day.matches(t.weekday))
        .cloned()
        .collect()
}
