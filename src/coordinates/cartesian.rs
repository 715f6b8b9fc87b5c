//! # Globe-space Cartesian vectors
//!
//! `Cartesian3` is the 3D representation shared by the coordinate mapper, the
//! picking code and the trajectory stepper. Positions are expressed in globe
//! units: the rendered Earth is a sphere of radius 1.0 centred on the origin.
//!
//! ## Axis Convention
//!
//! The convention follows the renderer rather than the usual geodetic ECEF
//! frame:
//! - **X-axis**: toward latitude 0°, longitude 0°
//! - **Y-axis**: toward the north pole (latitude +90°)
//! - **Z-axis**: toward latitude 0°, longitude +90°
//!
//! ## Examples
//!
//! ```rust
//! use meteorfall::coordinates::cartesian::Cartesian3;
//!
//! let greenwich = Cartesian3::new(1.0, 0.0, 0.0);
//! let north_pole = Cartesian3::new(0.0, 1.0, 0.0);
//! assert_eq!(greenwich.dot(&north_pole), 0.0);
//! ```

use nalgebra::Vector3;
use std::f64::consts::PI;

/// Three-dimensional point or direction in globe space
///
/// The same type carries unit directions (surface normals, pick results),
/// positions off the surface (the incoming asteroid) and displacement
/// vectors. No normalization happens implicitly.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Cartesian3 {
    /// X-component (toward lat 0°, lon 0°)
    pub x: f64,
    /// Y-component (toward the north pole)
    pub y: f64,
    /// Z-component (toward lat 0°, lon 90°)
    pub z: f64,
}

impl Cartesian3 {
    /// Creates a new vector from its components
    ///
    /// # Examples
    ///
    /// ```rust
    /// use meteorfall::coordinates::cartesian::Cartesian3;
    ///
    /// let v = Cartesian3::new(1.0, 2.0, 3.0);
    /// assert_eq!(v.y, 2.0);
    /// ```
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Cartesian3 { x, y, z }
    }

    /// The origin (centre of the globe)
    pub fn zero() -> Self {
        Cartesian3::new(0.0, 0.0, 0.0)
    }

    /// Unit vector along +X
    pub fn unit_x() -> Self {
        Cartesian3::new(1.0, 0.0, 0.0)
    }

    /// Unit vector along +Y, the polar axis
    pub fn unit_y() -> Self {
        Cartesian3::new(0.0, 1.0, 0.0)
    }

    /// Unit vector along +Z
    pub fn unit_z() -> Self {
        Cartesian3::new(0.0, 0.0, 1.0)
    }

    /// Euclidean length of the vector
    ///
    /// Computed with `hypot`, so components near the limits of `f64` neither
    /// underflow to zero nor overflow to infinity when squared.
    ///
    /// ```rust
    /// use meteorfall::coordinates::cartesian::Cartesian3;
    ///
    /// assert_eq!(Cartesian3::new(3.0, 4.0, 0.0).magnitude(), 5.0);
    /// assert!(Cartesian3::new(1e-170, 0.0, 0.0).magnitude() > 0.0);
    /// ```
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y).hypot(self.z)
    }

    /// Returns true when every component is finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Returns a unit vector in the same direction
    ///
    /// `None` if the magnitude is zero or not finite.
    ///
    /// ```rust
    /// use meteorfall::coordinates::cartesian::Cartesian3;
    ///
    /// let unit = Cartesian3::new(0.0, 3.0, 4.0).normalize().unwrap();
    /// assert!((unit.magnitude() - 1.0).abs() < 1e-15);
    /// assert!(Cartesian3::zero().normalize().is_none());
    /// ```
    pub fn normalize(&self) -> Option<Cartesian3> {
        let mag = self.magnitude();
        if mag == 0.0 || !mag.is_finite() {
            None
        } else {
            Some(*self / mag)
        }
    }

    /// Dot product
    pub fn dot(&self, other: &Cartesian3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product, right-handed: x × y = z
    pub fn cross(&self, other: &Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Distance between two points
    pub fn distance_to(&self, other: &Cartesian3) -> f64 {
        (*other - *self).magnitude()
    }

    /// Angle between the two vectors as seen from the origin, in radians [0, π]
    ///
    /// Returns 0.0 when either vector has zero length.
    pub fn angular_distance(&self, other: &Cartesian3) -> f64 {
        let mag_product = self.magnitude() * other.magnitude();
        if mag_product == 0.0 {
            return 0.0;
        }

        let cos_angle = self.dot(other) / mag_product;
        if cos_angle >= 1.0 {
            0.0
        } else if cos_angle <= -1.0 {
            PI
        } else {
            cos_angle.acos()
        }
    }

    /// Converts to a nalgebra vector
    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Creates from a nalgebra vector
    pub fn from_vector3(vec: Vector3<f64>) -> Self {
        Cartesian3 {
            x: vec.x,
            y: vec.y,
            z: vec.z,
        }
    }
}

impl From<Vector3<f64>> for Cartesian3 {
    fn from(vec: Vector3<f64>) -> Self {
        Cartesian3::from_vector3(vec)
    }
}

impl From<Cartesian3> for Vector3<f64> {
    fn from(point: Cartesian3) -> Self {
        point.to_vector3()
    }
}

impl std::ops::Add for Cartesian3 {
    type Output = Cartesian3;

    fn add(self, other: Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl std::ops::Sub for Cartesian3 {
    type Output = Cartesian3;

    fn sub(self, other: Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl std::ops::Neg for Cartesian3 {
    type Output = Cartesian3;

    fn neg(self) -> Cartesian3 {
        Cartesian3 {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl std::ops::Mul<f64> for Cartesian3 {
    type Output = Cartesian3;

    fn mul(self, scalar: f64) -> Cartesian3 {
        Cartesian3 {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl std::ops::Div<f64> for Cartesian3 {
    type Output = Cartesian3;

    fn div(self, scalar: f64) -> Cartesian3 {
        Cartesian3 {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_magnitude_and_normalize() {
        let v = Cartesian3::new(0.0, 3.0, 4.0);
        assert_eq!(v.magnitude(), 5.0);

        let unit = v.normalize().unwrap();
        assert_abs_diff_eq!(unit.magnitude(), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(unit.y, 0.6, epsilon = 1e-15);
        assert_abs_diff_eq!(unit.z, 0.8, epsilon = 1e-15);

        assert!(Cartesian3::zero().normalize().is_none());
        assert!(Cartesian3::new(f64::NAN, 0.0, 0.0).normalize().is_none());
    }

    #[test]
    fn test_normalize_extreme_magnitudes() {
        let tiny = Cartesian3::new(1e-170, 0.0, 0.0);
        assert_eq!(tiny.magnitude(), 1e-170);
        let unit = tiny.normalize().unwrap();
        assert_abs_diff_eq!(unit.x, 1.0, epsilon = 1e-15);

        let huge = Cartesian3::new(1e200, 0.0, 1e200);
        assert!(huge.magnitude().is_finite());
        let unit = huge.normalize().unwrap();
        assert_abs_diff_eq!(unit.x, std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-15);
        assert_abs_diff_eq!(unit.z, std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-15);
    }

    #[test]
    fn test_cross_product_follows_axis_convention() {
        let z = Cartesian3::unit_x().cross(&Cartesian3::unit_y());
        assert_abs_diff_eq!(z.z, 1.0, epsilon = 1e-15);

        let x = Cartesian3::unit_y().cross(&Cartesian3::unit_z());
        assert_abs_diff_eq!(x.x, 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_angular_distance() {
        let east = Cartesian3::unit_z();
        let greenwich = Cartesian3::unit_x();
        assert_abs_diff_eq!(greenwich.angular_distance(&east), PI / 2.0, epsilon = 1e-15);
        assert_abs_diff_eq!(greenwich.angular_distance(&-greenwich), PI, epsilon = 1e-15);
        assert_eq!(greenwich.angular_distance(&Cartesian3::zero()), 0.0);

        // Magnitude does not matter
        let far = greenwich * 7.5;
        assert_abs_diff_eq!(greenwich.angular_distance(&far), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_arithmetic_operations() {
        let a = Cartesian3::new(1.0, 2.0, 3.0);
        let b = Cartesian3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Cartesian3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Cartesian3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Cartesian3::new(2.0, 4.0, 6.0));
        assert_eq!(a / 2.0, Cartesian3::new(0.5, 1.0, 1.5));
        assert_eq!(-a, Cartesian3::new(-1.0, -2.0, -3.0));
        assert_abs_diff_eq!(a.distance_to(&b), 27.0_f64.sqrt(), epsilon = 1e-15);
    }

    #[test]
    fn test_vector3_conversions() {
        let coord = Cartesian3::new(1.0, 2.0, 3.0);
        let vec: Vector3<f64> = coord.into();
        assert_eq!(vec.y, 2.0);
        assert_eq!(Cartesian3::from(vec), coord);
    }
}
