//! Validity envelopes used at the pipeline boundary.
//!
//! The transform engine accepts any finite input. These rectangles are how
//! callers decide whether an input grid point, or an output geographic
//! point, is plausible.

use super::types::{GeoCoord, GridCoord};

/// Axis-aligned rectangle in grid meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridEnvelope {
    pub min_easting: f64,
    pub max_easting: f64,
    pub min_northing: f64,
    pub max_northing: f64,
}

impl GridEnvelope {
    /// National extent of LKS-94. Every point inside maps into
    /// [`GeoBounds::LITHUANIA`].
    pub const LKS94: GridEnvelope = GridEnvelope {
        min_easting: 300_000.0,
        max_easting: 680_000.0,
        min_northing: 5_960_000.0,
        max_northing: 6_260_000.0,
    };

    #[inline]
    pub fn contains(&self, coord: GridCoord) -> bool {
        (self.min_easting..=self.max_easting).contains(&coord.easting)
            && (self.min_northing..=self.max_northing).contains(&coord.northing)
    }
}

/// Latitude/longitude rectangle in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl GeoBounds {
    /// Approximate bounding box of Lithuania.
    pub const LITHUANIA: GeoBounds = GeoBounds {
        min_lat: 53.5,
        max_lat: 56.5,
        min_lon: 20.5,
        max_lon: 27.0,
    };

    /// Where Lithuanian points with longitude 24..25 land when latitude and
    /// longitude are swapped (around Abu Dhabi). Any output in here means an
    /// axis-order defect.
    pub const SWAPPED_AXIS_SENTINEL: GeoBounds = GeoBounds {
        min_lat: 24.0,
        max_lat: 25.0,
        min_lon: 54.0,
        max_lon: 56.0,
    };

    #[inline]
    pub fn contains(&self, coord: GeoCoord) -> bool {
        (self.min_lat..=self.max_lat).contains(&coord.lat)
            && (self.min_lon..=self.max_lon).contains(&coord.lon)
    }
}
