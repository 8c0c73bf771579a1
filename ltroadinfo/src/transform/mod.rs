//! Geodetic transform engine
//!
//! Converts LKS-94 grid coordinates (EPSG:3346) to WGS-84 geographic
//! coordinates (EPSG:4326) through the chain
//!
//! ```text
//! grid --inverse TM--> GRS80 geodetic --> geocentric --(identity)--> geocentric --> WGS84 geodetic
//! ```
//!
//! ETRS89 and WGS-84 share a geocentric origin at the accuracy relevant
//! here, so the datum shift is an identity and only the ellipsoid changes.
//!
//! All results are `(latitude, longitude)`. Swapping the two places
//! Lithuanian roads near Abu Dhabi; see [`bounds::GeoBounds::SWAPPED_AXIS_SENTINEL`].

pub mod bounds;
mod types;

pub use bounds::{GeoBounds, GridEnvelope};
pub use types::{GeoCoord, Geocentric, GridCoord, ProjectionParams, Spheroid};

/// Maximum refinement steps when recovering latitude from geocentric coordinates.
const GEODETIC_MAX_ITERATIONS: usize = 10;

/// Convergence threshold for latitude refinement, radians.
const GEODETIC_EPSILON: f64 = 1e-14;

/// Immutable, precomputed grid to geographic transform.
///
/// Built once and passed by value; it is `Copy` and holds no interior
/// mutability, so it can be shared across threads freely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatumTransform {
    projection: ProjectionParams,
    source: Spheroid,
    target: Spheroid,
    /// Rectifying radius scaled by the projection scale factor, `k0 * A`.
    scaled_radius: f64,
    /// Meridian distance of the latitude of origin (already scaled by `k0`).
    origin_arc: f64,
    /// Krüger inverse series coefficients β1..β3.
    beta: [f64; 3],
    /// Conformal to geodetic latitude series coefficients δ1..δ3.
    delta: [f64; 3],
}

impl DatumTransform {
    /// Builds a transform from a projected grid on `source` to geographic
    /// coordinates on `target`.
    pub fn new(projection: ProjectionParams, source: Spheroid, target: Spheroid) -> Self {
        let n = source.third_flattening();
        let n2 = n * n;
        let n3 = n2 * n;

        let rectifying_radius =
            source.semi_major_axis / (1.0 + n) * (1.0 + n2 / 4.0 + n2 * n2 / 64.0);

        let beta = [
            n / 2.0 - 2.0 * n2 / 3.0 + 37.0 * n3 / 96.0,
            n2 / 48.0 + n3 / 15.0,
            17.0 * n3 / 480.0,
        ];

        let delta = [
            2.0 * n - 2.0 * n2 / 3.0 - 2.0 * n3,
            7.0 * n2 / 3.0 - 8.0 * n3 / 5.0,
            56.0 * n3 / 15.0,
        ];

        let scaled_radius = projection.scale_factor * rectifying_radius;
        let origin_arc = projection.scale_factor
            * meridian_arc(source, projection.latitude_of_origin.to_radians());

        Self {
            projection,
            source,
            target,
            scaled_radius,
            origin_arc,
            beta,
            delta,
        }
    }

    /// LKS-94 (EPSG:3346) to WGS-84 (EPSG:4326).
    pub fn lks94() -> Self {
        Self::new(ProjectionParams::LKS94, Spheroid::GRS80, Spheroid::WGS84)
    }

    pub fn projection(&self) -> &ProjectionParams {
        &self.projection
    }

    /// Transforms a grid coordinate to a geographic coordinate on the
    /// target spheroid.
    ///
    /// No range checking happens here; out-of-domain input yields a
    /// well-defined but meaningless result.
    #[inline]
    pub fn transform(&self, grid: GridCoord) -> GeoCoord {
        let on_source = self.inverse_projection(grid);
        let ecef = geodetic_to_geocentric(&self.source, on_source, 0.0);
        let (on_target, _height) = geocentric_to_geodetic(&self.target, ecef);
        on_target
    }

    /// Tuple form of [`DatumTransform::transform`]. Returns `(latitude, longitude)`.
    #[inline]
    pub fn to_wgs84(&self, easting: f64, northing: f64) -> (f64, f64) {
        self.transform(GridCoord::new(easting, northing)).into()
    }

    /// Inverse Transverse Mercator on the source spheroid (Krüger series).
    pub fn inverse_projection(&self, grid: GridCoord) -> GeoCoord {
        let p = &self.projection;
        let xi = (grid.northing - p.false_northing + self.origin_arc) / self.scaled_radius;
        let eta = (grid.easting - p.false_easting) / self.scaled_radius;

        let mut xi_prime = xi;
        let mut eta_prime = eta;
        for (j, b) in self.beta.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi_prime -= b * (k * xi).sin() * (k * eta).cosh();
            eta_prime -= b * (k * xi).cos() * (k * eta).sinh();
        }

        let chi = (xi_prime.sin() / eta_prime.cosh()).asin();
        let mut phi = chi;
        for (j, d) in self.delta.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            phi += d * (k * chi).sin();
        }

        let lambda =
            p.central_meridian.to_radians() + eta_prime.sinh().atan2(xi_prime.cos());

        GeoCoord::new(phi.to_degrees(), lambda.to_degrees())
    }
}

/// Meridian arc length from the equator to `phi` (radians), meters.
fn meridian_arc(spheroid: Spheroid, phi: f64) -> f64 {
    if phi == 0.0 {
        return 0.0;
    }
    let n = spheroid.third_flattening();
    let n2 = n * n;
    let n3 = n2 * n;
    let a = spheroid.semi_major_axis / (1.0 + n) * (1.0 + n2 / 4.0 + n2 * n2 / 64.0);

    // Forward series for the rectifying latitude.
    let mu = phi - (3.0 * n / 2.0 - 9.0 * n3 / 16.0) * (2.0 * phi).sin()
        + (15.0 * n2 / 16.0) * (4.0 * phi).sin()
        - (35.0 * n3 / 48.0) * (6.0 * phi).sin();
    a * mu
}

/// Geodetic (degrees, ellipsoidal height in meters) to geocentric Cartesian.
pub fn geodetic_to_geocentric(spheroid: &Spheroid, coord: GeoCoord, height: f64) -> Geocentric {
    let e2 = spheroid.eccentricity_squared();
    let phi = coord.lat.to_radians();
    let lambda = coord.lon.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let nu = spheroid.semi_major_axis / (1.0 - e2 * sin_phi * sin_phi).sqrt();

    Geocentric {
        x: (nu + height) * cos_phi * lambda.cos(),
        y: (nu + height) * cos_phi * lambda.sin(),
        z: (nu * (1.0 - e2) + height) * sin_phi,
    }
}

/// Geocentric Cartesian to geodetic. Returns the position and the
/// ellipsoidal height in meters.
pub fn geocentric_to_geodetic(spheroid: &Spheroid, ecef: Geocentric) -> (GeoCoord, f64) {
    let a = spheroid.semi_major_axis;
    let e2 = spheroid.eccentricity_squared();
    let p = ecef.x.hypot(ecef.y);
    let lambda = ecef.y.atan2(ecef.x);

    let mut phi = ecef.z.atan2(p * (1.0 - e2));
    let mut height = 0.0;
    for _ in 0..GEODETIC_MAX_ITERATIONS {
        let sin_phi = phi.sin();
        let nu = a / (1.0 - e2 * sin_phi * sin_phi).sqrt();
        height = p / phi.cos() - nu;
        let next = ecef.z.atan2(p * (1.0 - e2 * nu / (nu + height)));
        let converged = (next - phi).abs() < GEODETIC_EPSILON;
        phi = next;
        if converged {
            break;
        }
    }

    (GeoCoord::new(phi.to_degrees(), lambda.to_degrees()), height)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-4;

    fn assert_close(actual: GeoCoord, lat: f64, lon: f64) {
        assert!(
            (actual.lat - lat).abs() < TOLERANCE,
            "latitude {} differs from {}",
            actual.lat,
            lat
        );
        assert!(
            (actual.lon - lon).abs() < TOLERANCE,
            "longitude {} differs from {}",
            actual.lon,
            lon
        );
    }

    #[test]
    fn test_vilnius_area() {
        let t = DatumTransform::lks94();
        let result = t.transform(GridCoord::new(581_234.0, 6_095_678.0));
        assert_close(result, 54.990387, 25.269384);
    }

    #[test]
    fn test_kaunas_area() {
        let t = DatumTransform::lks94();
        let result = t.transform(GridCoord::new(568_123.0, 6_062_456.0));
        assert_close(result, 54.693908, 25.056723);
    }

    #[test]
    fn test_to_wgs84_returns_lat_then_lon() {
        let t = DatumTransform::lks94();
        let (lat, lon) = t.to_wgs84(581_234.0, 6_095_678.0);
        assert!(lat > 50.0 && lat < 60.0, "first value must be latitude");
        assert!(lon > 20.0 && lon < 30.0, "second value must be longitude");
        assert!(!GeoBounds::SWAPPED_AXIS_SENTINEL.contains(GeoCoord::new(lat, lon)));
    }

    #[test]
    fn test_central_meridian_keeps_longitude() {
        let t = DatumTransform::lks94();
        let result = t.transform(GridCoord::new(500_000.0, 6_100_000.0));
        assert!((result.lon - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_western_and_northern_points() {
        let t = DatumTransform::lks94();
        assert_close(
            t.transform(GridCoord::new(317_456.0, 6_196_543.0)),
            55.868612,
            21.083111,
        );
        assert_close(
            t.transform(GridCoord::new(486_789.0, 6_179_234.0)),
            55.747502,
            23.789588,
        );
    }

    #[test]
    fn test_transform_is_deterministic() {
        let t = DatumTransform::lks94();
        let a = t.transform(GridCoord::new(512_345.6, 6_123_456.7));
        let b = t.transform(GridCoord::new(512_345.6, 6_123_456.7));
        assert_eq!(a.lat.to_bits(), b.lat.to_bits());
        assert_eq!(a.lon.to_bits(), b.lon.to_bits());
    }

    #[test]
    fn test_same_spheroid_geocentric_roundtrip() {
        let coord = GeoCoord::new(55.1234, 23.9876);
        let ecef = geodetic_to_geocentric(&Spheroid::GRS80, coord, 125.0);
        let (back, height) = geocentric_to_geodetic(&Spheroid::GRS80, ecef);
        assert!((back.lat - coord.lat).abs() < 1e-10);
        assert!((back.lon - coord.lon).abs() < 1e-10);
        assert!((height - 125.0).abs() < 1e-5);
    }

    #[test]
    fn test_spheroid_change_shifts_latitude_slightly() {
        let t = DatumTransform::lks94();
        let grid = GridCoord::new(581_234.0, 6_095_678.0);
        let grs80 = t.inverse_projection(grid);
        let wgs84 = t.transform(grid);
        // GRS80 and WGS84 differ by ~0.1 mm in the semi-minor axis.
        assert!((grs80.lat - wgs84.lat).abs() < 1e-7);
        assert_eq!(grs80.lon, wgs84.lon);
    }

    #[test]
    fn test_alternate_parameters() {
        // A UTM-like grid on the same chain still places the central
        // meridian at the false easting.
        let params = ProjectionParams {
            central_meridian: 21.0,
            latitude_of_origin: 0.0,
            scale_factor: 0.9996,
            false_easting: 500_000.0,
            false_northing: 0.0,
        };
        let t = DatumTransform::new(params, Spheroid::WGS84, Spheroid::WGS84);
        let result = t.transform(GridCoord::new(500_000.0, 6_000_000.0));
        assert!((result.lon - 21.0).abs() < 1e-9);
        assert!(result.lat > 54.0 && result.lat < 54.2);
    }

    #[test]
    fn test_transform_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync + Copy>() {}
        assert_send_sync::<DatumTransform>();
    }

    #[test]
    fn test_concurrent_callers_agree() {
        let t = DatumTransform::lks94();
        let expected = t.transform(GridCoord::new(581_234.0, 6_095_678.0));
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(move || t.transform(GridCoord::new(581_234.0, 6_095_678.0))))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    // Property-based tests using proptest
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_envelope_maps_into_lithuania(
                easting in GridEnvelope::LKS94.min_easting..=GridEnvelope::LKS94.max_easting,
                northing in GridEnvelope::LKS94.min_northing..=GridEnvelope::LKS94.max_northing
            ) {
                let result = DatumTransform::lks94().transform(GridCoord::new(easting, northing));
                prop_assert!(
                    GeoBounds::LITHUANIA.contains(result),
                    "({}, {}) -> ({}, {}) outside Lithuania",
                    easting, northing, result.lat, result.lon
                );
            }

            #[test]
            fn test_never_lands_in_swapped_region(
                easting in GridEnvelope::LKS94.min_easting..=GridEnvelope::LKS94.max_easting,
                northing in GridEnvelope::LKS94.min_northing..=GridEnvelope::LKS94.max_northing
            ) {
                let (lat, lon) = DatumTransform::lks94().to_wgs84(easting, northing);
                prop_assert!(!GeoBounds::SWAPPED_AXIS_SENTINEL.contains(GeoCoord::new(lat, lon)));
            }

            #[test]
            fn test_idempotent(
                easting in 0.0..1_000_000.0_f64,
                northing in 5_000_000.0..7_000_000.0_f64
            ) {
                let t = DatumTransform::lks94();
                let a = t.transform(GridCoord::new(easting, northing));
                let b = t.transform(GridCoord::new(easting, northing));
                prop_assert_eq!(a.lat.to_bits(), b.lat.to_bits());
                prop_assert_eq!(a.lon.to_bits(), b.lon.to_bits());
            }

            #[test]
            fn test_easting_increases_longitude(
                easting in 300_000.0..679_000.0_f64,
                northing in 5_960_000.0..6_260_000.0_f64
            ) {
                let t = DatumTransform::lks94();
                let west = t.transform(GridCoord::new(easting, northing));
                let east = t.transform(GridCoord::new(easting + 1_000.0, northing));
                prop_assert!(east.lon > west.lon);
            }
        }
    }
}
