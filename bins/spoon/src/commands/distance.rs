//! Distance command - great-circle distance between two points

use anyhow::Result;
use spoon_geo::{format_distance, try_distance_miles, Coordinate, DistanceUnit};

/// Run distance command
pub fn run(lat1: f64, lon1: f64, lat2: f64, lon2: f64, unit: DistanceUnit) -> Result<()> {
    let from = Coordinate::new(lat1, lon1);
    let to = Coordinate::new(lat2, lon2);

    let miles = try_distance_miles(&from, &to).map_err(spoon_core::Error::from)?;
    println!("{}", format_distance(miles, unit));
    Ok(())
}
