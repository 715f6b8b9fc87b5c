//! Constants module for impact and globe calculations

use std::f64::consts::PI;

// Angles
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;

// Earth constants
/// Earth's mean radius in kilometers
pub const EARTH_MEAN_RADIUS_KM: f64 = 6_371.0;
/// Radius of the rendered globe (scene units)
pub const GLOBE_RADIUS: f64 = 1.0;
/// Radius at which surface markers are drawn, slightly above the globe
pub const MARKER_RADIUS: f64 = 1.01;

// Energy
/// Joules per megaton of TNT
pub const MEGATON_TNT_J: f64 = 4.184e15;
/// Yield of the Hiroshima bomb in megatons of TNT
pub const HIROSHIMA_MT: f64 = 0.015;

// Fallback estimator coefficients
/// Reference energy (megatons) in the crater scaling law
pub const CRATER_REFERENCE_MT: f64 = 1_000.0;
/// Crater diameter per kilometer of impactor at the reference energy
pub const CRATER_SCALE: f64 = 20.0;
/// Ratio between the affected-zone radius and the crater diameter
pub const AFFECTED_RADIUS_FACTOR: f64 = 10.0;
/// Assumed population density in the affected zone (people/km²)
pub const POPULATION_DENSITY_KM2: f64 = 50.0;
/// Fraction of the affected population counted as casualties
pub const CASUALTY_RATE: f64 = 0.3;
/// Economic value lost per affected square kilometer (USD)
pub const DAMAGE_USD_PER_KM2: f64 = 1e8;

// Composition densities (kg/m³)
/// Rocky (stony) asteroid
pub const DENSITY_ROCKY: f64 = 2_500.0;
/// Metallic (iron-nickel) asteroid
pub const DENSITY_METALLIC: f64 = 7_800.0;
/// Icy (cometary) body
pub const DENSITY_ICY: f64 = 900.0;
