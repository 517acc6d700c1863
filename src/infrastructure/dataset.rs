use crate::domain::demand::types::HistoricalRideRecord;
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// One CSV row as exported by the ride history pipeline. Unlisted columns
/// are ignored; an empty demand cell becomes `None`.
#[derive(Debug, Deserialize)]
struct RawRideRow {
    time_of_day: String,
    location: String,
    ride_demand: Option<f64>,
}

/// Accepted timestamp layouts, tried in order. RFC 3339 values keep their
/// wall-clock reading since demand is keyed by local hour of day.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(at.naive_local());
    }
    for layout in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(at) = NaiveDateTime::parse_from_str(trimmed, layout) {
            return Some(at);
        }
    }
    None
}

/// Reads historical rides from a CSV file with `time_of_day`, `location`
/// and `ride_demand` columns.
///
/// A missing demand value is kept as NaN so the trainer can report the
/// offending row instead of silently learning from a hole in the data. A
/// malformed timestamp fails the whole load with its row number.
pub fn load_history(path: impl AsRef<Path>) -> Result<Vec<HistoricalRideRecord>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Failed to open ride history at {:?}", path))?;
    let mut rdr = csv::Reader::from_reader(BufReader::new(file));

    let mut records = Vec::new();
    for (idx, result) in rdr.deserialize().enumerate() {
        let row: RawRideRow =
            result.with_context(|| format!("Failed to parse ride history row {}", idx + 1))?;

        let departs_at = parse_timestamp(&row.time_of_day).with_context(|| {
            format!(
                "Failed to parse time_of_day {:?} on ride history row {}",
                row.time_of_day,
                idx + 1
            )
        })?;

        records.push(HistoricalRideRecord::new(
            departs_at,
            row.location,
            row.ride_demand.unwrap_or(f64::NAN),
        ));
    }

    info!("Loaded {} historical ride records from {:?}", records.len(), path);
    Ok(records)
}
