// core/waypoints.rs

// Reads a global path from CSV. Columns `x`, `y` and `velocity` are required, `yaw`
// is optional; anything else is ignored. Without a yaw column each waypoint faces
// the next one so every loaded waypoint carries a usable heading.

use log::info;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use super::geometry::yaw_to_quaternion;
use super::Waypoint;
use crate::{PlannerError, PlannerResult};

#[derive(Debug, Deserialize)]
struct WaypointRecord {
    x: f64,
    y: f64,
    velocity: f64,
    #[serde(default)]
    yaw: Option<f64>,
}

/// Loads waypoints from a CSV file
pub fn load_csv<P: AsRef<Path>>(path: P) -> PlannerResult<Vec<Waypoint>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let waypoints = read_csv(file)?;
    info!("Loaded {} waypoints from {}", waypoints.len(), path.display());
    Ok(waypoints)
}

/// Reads waypoints from any CSV source with a header row
pub fn read_csv<R: Read>(source: R) -> PlannerResult<Vec<Waypoint>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut records = Vec::new();
    for (row, result) in reader.deserialize::<WaypointRecord>().enumerate() {
        let record = result?;
        if !(record.x.is_finite() && record.y.is_finite()) {
            return Err(PlannerError::ParseError(format!(
                "row {}: position must be finite",
                row + 1
            )));
        }
        if !(record.velocity.is_finite() && record.velocity >= 0.0) {
            return Err(PlannerError::ParseError(format!(
                "row {}: velocity must be a non-negative number, got {}",
                row + 1,
                record.velocity
            )));
        }
        records.push(record);
    }

    Ok(with_headings(&records))
}

fn with_headings(records: &[WaypointRecord]) -> Vec<Waypoint> {
    let mut last_yaw = 0.0;
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let yaw = match (record.yaw, records.get(i + 1)) {
                (Some(yaw), _) => yaw,
                (None, Some(next)) => (next.y - record.y).atan2(next.x - record.x),
                // last point keeps the heading of the segment leading into it
                (None, None) => last_yaw,
            };
            last_yaw = yaw;
            Waypoint::new(record.x, record.y, record.velocity).with_orientation(yaw_to_quaternion(yaw))
        })
        .collect()
}
