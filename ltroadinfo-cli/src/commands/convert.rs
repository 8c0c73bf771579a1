//! Convert command - transform a single LKS-94 coordinate.

use ltroadinfo::transform::{GeoBounds, GridEnvelope};
use ltroadinfo::{DatumTransform, GridCoord};
use tracing::warn;

use crate::error::CliError;

/// Run the convert command. Prints `latitude longitude`.
pub fn run(easting: f64, northing: f64) -> Result<(), CliError> {
    let grid = GridCoord::new(easting, northing);
    if !GridEnvelope::LKS94.contains(grid) {
        warn!(easting, northing, "Input is outside the LKS-94 national envelope");
    }

    let result = DatumTransform::lks94().transform(grid);
    if !GeoBounds::LITHUANIA.contains(result) {
        warn!(lat = result.lat, lon = result.lon, "Result is outside Lithuania");
    }

    println!("{:.6} {:.6}", result.lat, result.lon);
    Ok(())
}
