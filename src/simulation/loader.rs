//! CSV graph loading
//!
//! Builds a [`RoadMap`] from two CSV files, both with a header row:
//!
//! - points file: `x,y,congestion,name` — one intersection per row;
//! - roads file: `label,x1,y1,x2,y2` — one road per row, referencing
//!   intersections by their coordinates. Road weights are computed as
//!   the Euclidean distance between the endpoints.

use anyhow::{Context, Result};
use std::path::Path;

use super::road_map::RoadMap;
use super::types::Point;

/// Load a road map from points and roads CSV files.
///
/// Pass a seed to make the map's congestion updates reproducible.
pub fn load_road_map<P: AsRef<Path>>(
    points_path: P,
    roads_path: P,
    seed: Option<u64>,
) -> Result<RoadMap> {
    let mut map = match seed {
        Some(seed) => RoadMap::new_with_seed(seed),
        None => RoadMap::new(),
    };

    let points_path = points_path.as_ref();
    let mut points = csv::Reader::from_path(points_path)
        .with_context(|| format!("Points data file not found: {}", points_path.display()))?;

    for (line, record) in points.records().enumerate() {
        let record = record.with_context(|| {
            format!("Invalid data in points file at row {}", line + 2)
        })?;
        let context = || format!("Invalid data in points file at row {}", line + 2);

        let x: f64 = field(&record, 0).with_context(context)?;
        let y: f64 = field(&record, 1).with_context(context)?;
        let congestion: u8 = field(&record, 2).with_context(context)?;
        let name = record.get(3).map(str::trim).unwrap_or_default();

        map.add_node(Point::new(x, y), congestion, name)
            .with_context(context)?;
    }

    let roads_path = roads_path.as_ref();
    let mut roads = csv::Reader::from_path(roads_path)
        .with_context(|| format!("Roads data file not found: {}", roads_path.display()))?;

    for (line, record) in roads.records().enumerate() {
        let record = record
            .with_context(|| format!("Invalid data in roads file at row {}", line + 2))?;
        let context = || format!("Invalid data in roads file at row {}", line + 2);

        let x1: f64 = field(&record, 1).with_context(context)?;
        let y1: f64 = field(&record, 2).with_context(context)?;
        let x2: f64 = field(&record, 3).with_context(context)?;
        let y2: f64 = field(&record, 4).with_context(context)?;

        map.add_road(Point::new(x1, y1), Point::new(x2, y2))
            .with_context(context)?;
    }

    Ok(map)
}

fn field<T: std::str::FromStr>(record: &csv::StringRecord, index: usize) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = record
        .get(index)
        .with_context(|| format!("Missing column {}", index))?;
    raw.trim()
        .parse()
        .with_context(|| format!("Could not parse column {} value {:?}", index, raw))
}
