//! Hit testing on the rendered globe
//!
//! A pick starts as a pointer position in normalized device coordinates,
//! becomes a ray in globe space, and ends as the geographic point where the
//! ray first meets the globe. Selection requires a double click, which
//! [`DoubleClickDetector`] decides from click timestamps.

use log::debug;
use nalgebra::{Matrix4, Point3};
use std::time::{Duration, Instant};

use crate::constants::GLOBE_RADIUS;
use crate::coordinates::{to_geo, Cartesian3, GeoPoint};
use crate::{MeteorfallError, Result};

/// Maximum gap between the two clicks of a double click
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(500);

/// A half-line in globe space
///
/// The direction need not be unit length; [`intersect_sphere`] normalizes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start of the ray (the camera position for screen picks)
    pub origin: Cartesian3,
    /// Direction of travel
    pub direction: Cartesian3,
}

impl Ray {
    /// Creates a ray from its origin and direction
    ///
    /// # Arguments
    /// * `origin` - Start point in globe units
    /// * `direction` - Direction of travel, any non-zero length
    pub fn new(origin: Cartesian3, direction: Cartesian3) -> Self {
        Ray { origin, direction }
    }

    /// Builds the camera ray through a pointer position
    ///
    /// `ndc_x`/`ndc_y` are in [-1, 1] with +y up. `inverse_view_projection` is
    /// the inverse of `projection * view`. Returns `None` if the unprojected
    /// points coincide.
    pub fn from_screen(ndc_x: f64, ndc_y: f64, inverse_view_projection: &Matrix4<f64>) -> Option<Ray> {
        let near = inverse_view_projection.transform_point(&Point3::new(ndc_x, ndc_y, -1.0));
        let far = inverse_view_projection.transform_point(&Point3::new(ndc_x, ndc_y, 1.0));

        let origin = Cartesian3::new(near.x, near.y, near.z);
        let direction = (Cartesian3::new(far.x, far.y, far.z) - origin).normalize()?;
        Some(Ray { origin, direction })
    }

    /// Point at parameter `t` along the direction, in units of its length
    pub fn at(&self, t: f64) -> Cartesian3 {
        self.origin + self.direction * t
    }
}

/// Nearest intersection of the ray with a sphere, in front of the origin
///
/// A ray starting inside the sphere hits the far side. `None` on a miss or
/// a zero-length direction.
pub fn intersect_sphere(ray: &Ray, center: Cartesian3, radius: f64) -> Option<Cartesian3> {
    let dir = ray.direction.normalize()?;
    let oc = ray.origin - center;

    let b = oc.dot(&dir);
    let c = oc.dot(&oc) - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let t = if -b - root >= 0.0 {
        -b - root
    } else if -b + root >= 0.0 {
        -b + root
    } else {
        return None;
    };

    Some(Ray::new(ray.origin, dir).at(t))
}

/// Geographic point where the ray meets a globe of `radius` at the origin
///
/// `Ok(None)` when the ray misses.
///
/// # Errors
///
/// [`MeteorfallError::InvalidInput`] for non-finite rays or a non-positive
/// radius.
pub fn pick_geo(ray: &Ray, radius: f64) -> Result<Option<GeoPoint>> {
    if !ray.origin.is_finite() || !ray.direction.is_finite() {
        return Err(MeteorfallError::InvalidInput(format!(
            "pick ray has non-finite components: {:?}",
            ray
        )));
    }
    if !(radius.is_finite() && radius > 0.0) {
        return Err(MeteorfallError::InvalidInput(format!(
            "globe radius must be positive, got {}",
            radius
        )));
    }

    match intersect_sphere(ray, Cartesian3::zero(), radius) {
        Some(hit) => {
            let point = to_geo(hit / radius)?;
            debug!("pick hit {:?} -> {}", hit, point);
            Ok(Some(point))
        }
        None => Ok(None),
    }
}

/// [`pick_geo`] on the standard unit globe
pub fn pick_globe(ray: &Ray) -> Result<Option<GeoPoint>> {
    pick_geo(ray, GLOBE_RADIUS)
}

/// Recognizes double clicks from a stream of click timestamps
#[derive(Debug, Clone)]
pub struct DoubleClickDetector {
    window: Duration,
    pending: Option<Instant>,
}

impl DoubleClickDetector {
    /// Creates a detector with no pending click
    ///
    /// # Arguments
    /// * `window` - Longest gap (exclusive) that still counts as a double click
    pub fn new(window: Duration) -> Self {
        DoubleClickDetector {
            window,
            pending: None,
        }
    }

    /// Records a click; true if it completes a double click
    ///
    /// A completed double click clears the pending state, so a third quick
    /// click starts over. A first click older than the window is replaced,
    /// and so is one that comes after `at`.
    ///
    /// # Arguments
    /// * `at` - When the click happened
    ///
    /// # Examples
    ///
    /// ```rust
    /// use meteorfall::picking::DoubleClickDetector;
    /// use std::time::{Duration, Instant};
    ///
    /// let mut detector = DoubleClickDetector::default();
    /// let t0 = Instant::now();
    /// assert!(!detector.register(t0));
    /// assert!(detector.register(t0 + Duration::from_millis(200)));
    /// ```
    pub fn register(&mut self, at: Instant) -> bool {
        let gap = self.pending.and_then(|first| at.checked_duration_since(first));
        match gap {
            Some(gap) if gap < self.window => {
                self.pending = None;
                true
            }
            _ => {
                self.pending = Some(at);
                false
            }
        }
    }

    /// Forgets any pending first click
    pub fn reset(&mut self) {
        self.pending = None;
    }
}

impl Default for DoubleClickDetector {
    fn default() -> Self {
        Self::new(DOUBLE_CLICK_WINDOW)
    }
}
