//! Conversions between geographic points and globe-space vectors
//!
//! The globe is rendered as a sphere centred on the origin with the polar
//! axis along +Y (see [`cartesian`] for the full axis convention). These
//! functions place markers on that sphere and interpret picks made on it.
//!
//! At the poles longitude is undefined. [`to_geo`] reports longitude 0.0
//! there rather than failing.

pub mod cartesian;
mod geo;

pub use cartesian::Cartesian3;
pub use geo::GeoPoint;

use log::debug;
use nalgebra::{UnitQuaternion, Vector3};

use crate::constants::{EARTH_MEAN_RADIUS_KM, RAD2DEG};
use crate::{MeteorfallError, Result};

/// Point on (or near) the unit globe
pub type CartesianPoint = Cartesian3;

/// Maps a geographic point onto the unit globe
///
/// ```rust
/// use meteorfall::{to_cartesian, GeoPoint};
///
/// let p = to_cartesian(GeoPoint::new(0.0, 0.0));
/// assert!((p.x - 1.0).abs() < 1e-12);
/// ```
pub fn to_cartesian(point: GeoPoint) -> CartesianPoint {
    to_cartesian_with_radius(point, 1.0)
}

/// Maps a geographic point onto a sphere of the given radius
///
/// `x = r·cos(lat)·cos(lon)`, `y = r·sin(lat)`, `z = r·cos(lat)·sin(lon)`.
/// NaN inputs propagate into the result.
pub fn to_cartesian_with_radius(point: GeoPoint, radius: f64) -> CartesianPoint {
    let lat = point.lat_radians();
    let lon = point.lon_radians();
    let cos_lat = lat.cos();

    Cartesian3 {
        x: radius * cos_lat * lon.cos(),
        y: radius * lat.sin(),
        z: radius * cos_lat * lon.sin(),
    }
}

/// Maps a point on the unit globe back to latitude and longitude
///
/// The point is expected to be unit length already; it is not normalized
/// here (use [`to_geo_normalized`] for arbitrary vectors). `y` is clamped to
/// [-1, 1] so slightly-off-sphere points still map to a valid latitude.
///
/// # Errors
///
/// [`MeteorfallError::InvalidInput`] for a zero-length or non-finite vector.
pub fn to_geo(point: CartesianPoint) -> Result<GeoPoint> {
    check_mappable(&point)?;

    let lat = point.y.clamp(-1.0, 1.0).asin() * RAD2DEG;
    let lon = if point.x == 0.0 && point.z == 0.0 {
        0.0
    } else {
        point.z.atan2(point.x) * RAD2DEG
    };

    Ok(GeoPoint { lat, lon })
}

/// Normalizes the vector, then maps it with [`to_geo`]
pub fn to_geo_normalized(point: CartesianPoint) -> Result<GeoPoint> {
    check_mappable(&point)?;
    let unit = point.normalize().ok_or_else(|| {
        MeteorfallError::InvalidInput(format!("cannot normalize vector {:?}", point))
    })?;
    to_geo(unit)
}

fn check_mappable(point: &CartesianPoint) -> Result<()> {
    if !point.is_finite() {
        return Err(MeteorfallError::InvalidInput(format!(
            "vector has non-finite components: {:?}",
            point
        )));
    }
    if point.magnitude() == 0.0 {
        return Err(MeteorfallError::InvalidInput(
            "zero-length vector has no geographic position".to_string(),
        ));
    }
    Ok(())
}

/// Rotation taking +Z onto the outward surface normal at `point`
///
/// Used to lay the impact ring flat on the globe.
pub fn marker_orientation(point: GeoPoint) -> UnitQuaternion<f64> {
    let normal = to_cartesian(point).to_vector3();
    let forward = Vector3::z();

    // rotation_between is undefined for opposite vectors (lat 0°, lon -90°)
    UnitQuaternion::rotation_between(&forward, &normal).unwrap_or_else(|| {
        debug!("marker normal opposes +Z at {}, flipping about X", point);
        UnitQuaternion::from_axis_angle(&Vector3::x_axis(), std::f64::consts::PI)
    })
}

/// Great-circle distance between two surface points on the mean Earth sphere
pub fn great_circle_distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    to_cartesian(a).angular_distance(&to_cartesian(b)) * EARTH_MEAN_RADIUS_KM
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    #[test]
    fn test_equator_and_pole() {
        let origin = to_cartesian(GeoPoint::new(0.0, 0.0));
        assert_abs_diff_eq!(origin.x, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(origin.y, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(origin.z, 0.0, epsilon = 1e-9);

        let pole = to_cartesian(GeoPoint::new(90.0, 0.0));
        assert_abs_diff_eq!(pole.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pole.y, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pole.z, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_radius_scales_output() {
        let p = to_cartesian_with_radius(GeoPoint::new(30.0, 45.0), 1.01);
        assert_abs_diff_eq!(p.magnitude(), 1.01, epsilon = 1e-12);
    }

    #[test]
    fn test_nan_propagates() {
        let p = to_cartesian(GeoPoint::new(f64::NAN, 0.0));
        assert!(p.x.is_nan());
        assert!(p.y.is_nan());
    }

    #[rstest]
    #[case(25.0, -100.0)] // Mexico
    #[case(-33.9, 18.4)]
    #[case(89.0, 179.0)]
    #[case(-89.0, -179.0)]
    #[case(0.0, 180.0)]
    #[case(45.0, 90.0)]
    fn test_round_trip(#[case] lat: f64, #[case] lon: f64) {
        let back = to_geo(to_cartesian(GeoPoint::new(lat, lon))).unwrap();
        assert_abs_diff_eq!(back.lat, lat, epsilon = 1e-2);
        // ±180° are the same meridian
        let dlon = (back.lon - lon).abs();
        assert!(dlon < 1e-2 || (dlon - 360.0).abs() < 1e-2, "lon {} -> {}", lon, back.lon);
    }

    #[test]
    fn test_east_is_greater_longitude() {
        let east = to_geo(to_cartesian(GeoPoint::new(25.0, -95.0))).unwrap();
        let west = to_geo(to_cartesian(GeoPoint::new(25.0, -105.0))).unwrap();
        assert!(east.lon > west.lon);
    }

    #[test]
    fn test_pole_reports_zero_longitude() {
        let north = to_geo(Cartesian3::new(0.0, 1.0, 0.0)).unwrap();
        assert_eq!(north.lat, 90.0);
        assert_eq!(north.lon, 0.0);

        let south = to_geo(Cartesian3::new(-0.0, -1.0, 0.0)).unwrap();
        assert_eq!(south.lat, -90.0);
        assert_eq!(south.lon, 0.0);
    }

    #[test]
    fn test_off_sphere_y_is_clamped() {
        let p = to_geo(Cartesian3::new(0.0, 1.5, 0.0)).unwrap();
        assert_eq!(p.lat, 90.0);
        let q = to_geo(Cartesian3::new(0.1, -2.0, 0.0)).unwrap();
        assert_eq!(q.lat, -90.0);
    }

    #[test]
    fn test_invalid_vectors() {
        assert!(matches!(
            to_geo(Cartesian3::zero()),
            Err(MeteorfallError::InvalidInput(_))
        ));
        assert!(matches!(
            to_geo(Cartesian3::new(f64::NAN, 0.0, 1.0)),
            Err(MeteorfallError::InvalidInput(_))
        ));
        assert!(to_geo_normalized(Cartesian3::zero()).is_err());
    }

    #[test]
    fn test_normalized_mapping() {
        let p = to_geo_normalized(Cartesian3::new(0.0, 2.0, 2.0)).unwrap();
        assert_abs_diff_eq!(p.lat, 45.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.lon, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_normalized_mapping_extreme_magnitudes() {
        let tiny = to_geo_normalized(Cartesian3::new(1e-170, 0.0, 0.0)).unwrap();
        assert_abs_diff_eq!(tiny.lat, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(tiny.lon, 0.0, epsilon = 1e-9);

        let huge = to_geo_normalized(Cartesian3::new(1e200, 0.0, 1e200)).unwrap();
        assert_abs_diff_eq!(huge.lat, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(huge.lon, 45.0, epsilon = 1e-9);
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(0.0, -90.0)]
    #[case(60.0, 30.0)]
    #[case(-90.0, 0.0)]
    fn test_marker_orientation_points_along_normal(#[case] lat: f64, #[case] lon: f64) {
        let point = GeoPoint::new(lat, lon);
        let rotated = marker_orientation(point) * Vector3::z();
        let normal = to_cartesian(point);
        assert_abs_diff_eq!(rotated.x, normal.x, epsilon = 1e-9);
        assert_abs_diff_eq!(rotated.y, normal.y, epsilon = 1e-9);
        assert_abs_diff_eq!(rotated.z, normal.z, epsilon = 1e-9);
    }

    #[test]
    fn test_great_circle_distance() {
        let quarter = great_circle_distance_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 90.0));
        assert_abs_diff_eq!(
            quarter,
            EARTH_MEAN_RADIUS_KM * std::f64::consts::FRAC_PI_2,
            epsilon = 1e-6
        );
        let same = great_circle_distance_km(GeoPoint::new(10.0, 10.0), GeoPoint::new(10.0, 10.0));
        assert_abs_diff_eq!(same, 0.0, epsilon = 1e-6);
    }
}
