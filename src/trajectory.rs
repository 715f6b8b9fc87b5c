//! Per-frame motion of the incoming asteroid toward its impact point
//!
//! Far from the globe the asteroid heads for the target but veers sideways
//! whenever the straight line would pass through the Earth; inside the near
//! zone it flies straight in. Speed eases off as the target gets close.

use log::debug;

use crate::constants::GLOBE_RADIUS;
use crate::coordinates::Cartesian3;
use crate::{MeteorfallError, Result};

/// Distance from the globe centre inside which steering is disabled
pub const NEAR_ZONE_RADIUS: f64 = 2.5;
/// Alignment with the globe centre above which the path is deflected
pub const EARTH_ALIGNMENT_LIMIT: f64 = 0.3;
/// Weight of the tangential component in a deflected heading
pub const DEFLECTION_WEIGHT: f64 = 0.3;
/// Scene speed per km/s of impact velocity
pub const SPEED_SCALE: f64 = 0.15;
/// Distance to the target at which speed starts to ease off
pub const EASE_DISTANCE: f64 = 3.0;
/// Lower bound of the easing multiplier
pub const MIN_SPEED_FACTOR: f64 = 0.3;
/// Altitude above the surface counted as an impact
pub const IMPACT_ALTITUDE: f64 = 0.05;

/// Result of one simulation frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryStep {
    /// Asteroid position after the frame, in globe units
    pub position: Cartesian3,
    /// True once the asteroid is within [`IMPACT_ALTITUDE`] of the surface
    pub impacted: bool,
}

fn has_impacted(position: &Cartesian3) -> bool {
    position.magnitude() - GLOBE_RADIUS <= IMPACT_ALTITUDE
}

/// Unit heading from `current` toward `target`, steering around the globe
///
/// `None` when the two points coincide.
pub fn heading(current: Cartesian3, target: Cartesian3) -> Option<Cartesian3> {
    let direct = (target - current).normalize()?;
    if current.magnitude() < NEAR_ZONE_RADIUS {
        return Some(direct);
    }

    let to_center = match (-current).normalize() {
        Some(dir) => dir,
        None => return Some(direct),
    };
    if direct.dot(&to_center) <= EARTH_ALIGNMENT_LIMIT {
        return Some(direct);
    }

    let mut tangent = direct.cross(&Cartesian3::unit_y());
    if tangent.magnitude() < 0.1 {
        tangent = direct.cross(&Cartesian3::unit_x());
    }
    let tangent = tangent.normalize()?;

    (direct * (1.0 - DEFLECTION_WEIGHT) + tangent * DEFLECTION_WEIGHT).normalize()
}

/// Advances the asteroid by one frame of `dt_s` seconds
///
/// # Errors
///
/// [`MeteorfallError::InvalidInput`] for non-finite positions, a negative
/// or non-finite time step, or a negative or non-finite velocity.
pub fn step(
    current: Cartesian3,
    target: Cartesian3,
    velocity_km_s: f64,
    dt_s: f64,
) -> Result<TrajectoryStep> {
    if !current.is_finite() || !target.is_finite() {
        return Err(MeteorfallError::InvalidInput(format!(
            "trajectory endpoints must be finite: {:?} -> {:?}",
            current, target
        )));
    }
    if !(velocity_km_s.is_finite() && velocity_km_s >= 0.0) || !(dt_s.is_finite() && dt_s >= 0.0) {
        return Err(MeteorfallError::InvalidInput(format!(
            "velocity and time step must be non-negative, got {} km/s over {} s",
            velocity_km_s, dt_s
        )));
    }

    let Some(direction) = heading(current, target) else {
        return Ok(TrajectoryStep {
            position: current,
            impacted: has_impacted(&current),
        });
    };

    let ease = (current.distance_to(&target) / EASE_DISTANCE).clamp(MIN_SPEED_FACTOR, 1.0);
    let speed = velocity_km_s * dt_s * SPEED_SCALE * ease;
    let position = current + direction * speed;

    Ok(TrajectoryStep {
        position,
        impacted: has_impacted(&position),
    })
}

/// Iterator over successive frames until impact or a frame cap
///
/// Yields every step including the impacting one, then stops.
#[derive(Debug, Clone)]
pub struct Trajectory {
    position: Cartesian3,
    target: Cartesian3,
    velocity_km_s: f64,
    dt_s: f64,
    remaining: usize,
    done: bool,
}

impl Trajectory {
    /// Creates a trajectory that has not taken any steps yet
    ///
    /// # Arguments
    /// * `start` - Initial asteroid position in globe units
    /// * `target` - Surface point being steered toward
    /// * `velocity_km_s` - Impact velocity, scaled down to scene speed by [`step`]
    /// * `dt_s` - Frame duration in seconds
    /// * `max_steps` - Frame cap; the iterator ends here even without impact
    ///
    /// # Examples
    ///
    /// ```rust
    /// use meteorfall::trajectory::Trajectory;
    /// use meteorfall::{to_cartesian, GeoPoint};
    ///
    /// let target = to_cartesian(GeoPoint::new(25.0, -100.0));
    /// let last = Trajectory::new(target * 6.0, target, 20.0, 1.0 / 60.0, 10_000)
    ///     .last()
    ///     .unwrap()
    ///     .unwrap();
    /// assert!(last.impacted);
    /// ```
    pub fn new(
        start: Cartesian3,
        target: Cartesian3,
        velocity_km_s: f64,
        dt_s: f64,
        max_steps: usize,
    ) -> Self {
        Trajectory {
            position: start,
            target,
            velocity_km_s,
            dt_s,
            remaining: max_steps,
            done: false,
        }
    }
}

impl Iterator for Trajectory {
    type Item = Result<TrajectoryStep>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        match step(self.position, self.target, self.velocity_km_s, self.dt_s) {
            Ok(frame) => {
                self.position = frame.position;
                if frame.impacted {
                    debug!("impact at {:?}", frame.position);
                    self.done = true;
                }
                Some(Ok(frame))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
