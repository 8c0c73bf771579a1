//! Value types for the geodetic transform engine.

/// Reference ellipsoid described by its equatorial radius and inverse flattening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spheroid {
    /// Semi-major (equatorial) axis in meters.
    pub semi_major_axis: f64,
    /// Inverse flattening `1/f`.
    pub inverse_flattening: f64,
}

impl Spheroid {
    /// GRS 80, the ellipsoid of ETRS89 (EPSG:4258) and therefore of LKS-94.
    pub const GRS80: Spheroid = Spheroid {
        semi_major_axis: 6_378_137.0,
        inverse_flattening: 298.257_222_101,
    };

    /// WGS 84 (EPSG:4326).
    pub const WGS84: Spheroid = Spheroid {
        semi_major_axis: 6_378_137.0,
        inverse_flattening: 298.257_223_563,
    };

    /// Creates a spheroid from its semi-major axis and inverse flattening.
    pub const fn new(semi_major_axis: f64, inverse_flattening: f64) -> Self {
        Self {
            semi_major_axis,
            inverse_flattening,
        }
    }

    #[inline]
    pub fn flattening(&self) -> f64 {
        1.0 / self.inverse_flattening
    }

    /// First eccentricity squared, `e² = f(2 - f)`.
    #[inline]
    pub fn eccentricity_squared(&self) -> f64 {
        let f = self.flattening();
        f * (2.0 - f)
    }

    #[inline]
    pub fn semi_minor_axis(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.flattening())
    }

    /// Third flattening `n = f / (2 - f)`, the expansion parameter of the
    /// Krüger series.
    #[inline]
    pub fn third_flattening(&self) -> f64 {
        let f = self.flattening();
        f / (2.0 - f)
    }
}

/// Transverse Mercator projection parameters. Angles are in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParams {
    pub central_meridian: f64,
    pub latitude_of_origin: f64,
    pub scale_factor: f64,
    pub false_easting: f64,
    pub false_northing: f64,
}

impl ProjectionParams {
    /// Lithuanian national grid LKS-94 (EPSG:3346).
    pub const LKS94: ProjectionParams = ProjectionParams {
        central_meridian: 24.0,
        latitude_of_origin: 0.0,
        scale_factor: 0.9998,
        false_easting: 500_000.0,
        false_northing: 0.0,
    };
}

/// Planar position in a projected grid, meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCoord {
    pub easting: f64,
    pub northing: f64,
}

impl GridCoord {
    pub const fn new(easting: f64, northing: f64) -> Self {
        Self { easting, northing }
    }
}

/// Geographic position in decimal degrees.
///
/// Field order, constructor order and tuple conversions are always
/// latitude first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoord {
    pub lat: f64,
    pub lon: f64,
}

impl GeoCoord {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<GeoCoord> for (f64, f64) {
    fn from(coord: GeoCoord) -> Self {
        (coord.lat, coord.lon)
    }
}

/// Earth-centered, earth-fixed Cartesian position in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geocentric {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grs80_and_wgs84_differ_only_in_flattening() {
        assert_eq!(
            Spheroid::GRS80.semi_major_axis,
            Spheroid::WGS84.semi_major_axis
        );
        assert!(Spheroid::GRS80.flattening() > Spheroid::WGS84.flattening());
    }

    #[test]
    fn test_wgs84_semi_minor_axis() {
        let b = Spheroid::WGS84.semi_minor_axis();
        assert!((b - 6_356_752.314_245).abs() < 1e-3);
    }

    #[test]
    fn test_geo_coord_tuple_is_lat_lon() {
        let (lat, lon) = GeoCoord::new(54.9, 25.3).into();
        assert_eq!(lat, 54.9);
        assert_eq!(lon, 25.3);
    }
}
