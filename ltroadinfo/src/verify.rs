//! Coordinate verification for produced tracks.
//!
//! Checks that output points actually lie in Lithuania and that none of
//! them landed in the swapped-axis sentinel region.

use std::fmt;
use std::path::Path;

use thiserror::Error;
use tracing::warn;

use crate::output::{read_gpx, OutputError};
use crate::track::Track;
use crate::transform::{GeoBounds, GeoCoord};

/// Minimum share of points that must fall inside Lithuania.
pub const MIN_INSIDE_PERCENT: f64 = 90.0;

/// How many in-bounds points to keep as samples.
const SAMPLE_COUNT: usize = 3;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Outcome of a verification pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerifyReport {
    pub total: usize,
    pub inside: usize,
    /// Points in the swapped-axis sentinel region.
    pub swapped: Vec<GeoCoord>,
    /// First few points inside Lithuania.
    pub samples: Vec<GeoCoord>,
}

impl VerifyReport {
    fn record(&mut self, point: GeoCoord) {
        self.total += 1;
        if GeoBounds::LITHUANIA.contains(point) {
            self.inside += 1;
            if self.samples.len() < SAMPLE_COUNT {
                self.samples.push(point);
            }
        } else if GeoBounds::SWAPPED_AXIS_SENTINEL.contains(point) {
            warn!(lat = point.lat, lon = point.lon, "Point in swapped-axis region");
            self.swapped.push(point);
        } else {
            warn!(lat = point.lat, lon = point.lon, "Point outside Lithuania");
        }
    }

    pub fn inside_percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.inside as f64 / self.total as f64 * 100.0
        }
    }

    pub fn passed(&self) -> bool {
        self.total > 0 && self.swapped.is_empty() && self.inside_percent() >= MIN_INSIDE_PERCENT
    }
}

impl fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} points in Lithuania ({:.1}%)",
            self.inside,
            self.total,
            self.inside_percent()
        )?;
        if !self.swapped.is_empty() {
            write!(f, ", {} with swapped lat/lon", self.swapped.len())?;
        }
        Ok(())
    }
}

/// Verifies assembled tracks.
pub fn verify_tracks(tracks: &[Track]) -> VerifyReport {
    let mut report = VerifyReport::default();
    for point in tracks
        .iter()
        .flat_map(|t| &t.segments)
        .flat_map(|s| s.points())
    {
        report.record(*point);
    }
    report
}

/// Verifies every track point in a GPX file.
pub fn verify_gpx_file(path: &Path) -> Result<VerifyReport, VerifyError> {
    let document = read_gpx(path)?;
    let mut report = VerifyReport::default();
    for waypoint in document
        .tracks
        .iter()
        .flat_map(|t| &t.segments)
        .flat_map(|s| &s.points)
    {
        let point = waypoint.point();
        report.record(GeoCoord::new(point.y(), point.x()));
    }
    Ok(report)
}
