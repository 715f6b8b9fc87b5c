//! Geographic latitude/longitude points

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::DEG2RAD;
use crate::{MeteorfallError, Result};

/// A point on the globe in geographic degrees
///
/// `lat` is positive north of the equator, `lon` positive east of Greenwich.
/// The serialized form (`{"lat": .., "lon": ..}`) is the one the simulation
/// service expects for `impact_location`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees [-90, 90]
    pub lat: f64,
    /// Longitude in degrees [-180, 180]
    pub lon: f64,
}

impl GeoPoint {
    /// Creates a point without range checks
    pub fn new(lat: f64, lon: f64) -> Self {
        GeoPoint { lat, lon }
    }

    /// Creates a point, rejecting non-finite or out-of-range values
    ///
    /// ```rust
    /// use meteorfall::GeoPoint;
    ///
    /// assert!(GeoPoint::try_new(25.0, -100.0).is_ok());
    /// assert!(GeoPoint::try_new(91.0, 0.0).is_err());
    /// ```
    pub fn try_new(lat: f64, lon: f64) -> Result<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(MeteorfallError::InvalidInput(format!(
                "latitude must be within [-90, 90] degrees, got {}",
                lat
            )));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(MeteorfallError::InvalidInput(format!(
                "longitude must be within [-180, 180] degrees, got {}",
                lon
            )));
        }
        Ok(GeoPoint { lat, lon })
    }

    /// Latitude in radians
    pub fn lat_radians(&self) -> f64 {
        self.lat * DEG2RAD
    }

    /// Longitude in radians
    pub fn lon_radians(&self) -> f64 {
        self.lon * DEG2RAD
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.lat >= 0.0 { 'N' } else { 'S' };
        let ew = if self.lon >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "{:.2}°{}, {:.2}°{}",
            self.lat.abs(),
            ns,
            self.lon.abs(),
            ew
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(90.5, 0.0)]
    #[case(-90.5, 0.0)]
    #[case(0.0, 180.1)]
    #[case(0.0, -181.0)]
    #[case(f64::NAN, 0.0)]
    #[case(0.0, f64::INFINITY)]
    fn test_try_new_rejects(#[case] lat: f64, #[case] lon: f64) {
        assert!(matches!(
            GeoPoint::try_new(lat, lon),
            Err(MeteorfallError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_try_new_accepts_bounds() {
        assert!(GeoPoint::try_new(90.0, 180.0).is_ok());
        assert!(GeoPoint::try_new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_radians() {
        let p = GeoPoint::new(90.0, -180.0);
        assert_eq!(p.lat_radians(), std::f64::consts::FRAC_PI_2);
        assert_eq!(p.lon_radians(), -std::f64::consts::PI);
    }

    #[test]
    fn test_display() {
        assert_eq!(GeoPoint::new(25.0, -100.0).to_string(), "25.00°N, 100.00°W");
        assert_eq!(GeoPoint::new(-33.5, 151.25).to_string(), "33.50°S, 151.25°E");
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&GeoPoint::new(1.5, -2.0)).unwrap();
        assert_eq!(json, r#"{"lat":1.5,"lon":-2.0}"#);
    }
}
