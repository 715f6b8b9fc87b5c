//! Asteroid compositions and well-known impact presets

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::AsteroidParams;
use crate::constants::{DENSITY_ICY, DENSITY_METALLIC, DENSITY_ROCKY};
use crate::{MeteorfallError, Result};

/// Bulk composition of an impactor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Composition {
    #[default]
    Rocky,
    Metallic,
    Icy,
}

impl Composition {
    /// Typical bulk density in kg/m³
    pub fn density_kg_m3(&self) -> f64 {
        match self {
            Composition::Rocky => DENSITY_ROCKY,
            Composition::Metallic => DENSITY_METALLIC,
            Composition::Icy => DENSITY_ICY,
        }
    }

    /// Lowercase identifier used by the simulation service
    pub fn as_str(&self) -> &'static str {
        match self {
            Composition::Rocky => "rocky",
            Composition::Metallic => "metallic",
            Composition::Icy => "icy",
        }
    }
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Composition {
    type Err = MeteorfallError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "rocky" | "stony" => Ok(Composition::Rocky),
            "metallic" | "iron" => Ok(Composition::Metallic),
            "icy" | "ice" => Ok(Composition::Icy),
            other => Err(MeteorfallError::InvalidParameter(format!(
                "unknown composition '{}'",
                other
            ))),
        }
    }
}

/// A historical or hypothetical impactor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactPreset {
    /// Display name
    pub name: &'static str,
    /// Diameter in km
    pub diameter_km: f64,
    /// Impact velocity in km/s
    pub velocity_km_s: f64,
    /// Bulk composition
    pub composition: Composition,
}

impl ImpactPreset {
    /// Parameters for the estimator, using the composition's density
    pub fn params(&self) -> AsteroidParams {
        AsteroidParams {
            diameter_km: self.diameter_km,
            velocity_km_s: self.velocity_km_s,
            density_kg_m3: self.composition.density_kg_m3(),
        }
    }
}

/// Built-in presets
pub const PRESETS: &[ImpactPreset] = &[
    ImpactPreset {
        name: "Tunguska (1908)",
        diameter_km: 0.06,
        velocity_km_s: 27.0,
        composition: Composition::Rocky,
    },
    ImpactPreset {
        name: "Chelyabinsk (2013)",
        diameter_km: 0.02,
        velocity_km_s: 19.0,
        composition: Composition::Rocky,
    },
    ImpactPreset {
        name: "Chicxulub",
        diameter_km: 10.0,
        velocity_km_s: 20.0,
        composition: Composition::Rocky,
    },
    ImpactPreset {
        name: "Apophis (hypothetical)",
        diameter_km: 0.34,
        velocity_km_s: 12.8,
        composition: Composition::Rocky,
    },
];

lazy_static! {
    /// Lookup by lowercase full name and by lowercase first word
    static ref PRESETS_BY_NAME: HashMap<String, &'static ImpactPreset> = {
        let mut m = HashMap::new();
        for preset in PRESETS.iter() {
            m.insert(preset.name.to_lowercase(), preset);
            if let Some(short) = preset.name.split_whitespace().next() {
                m.insert(short.to_lowercase(), preset);
            }
        }
        m
    };
}

/// Finds a preset by full name or first word, case-insensitively
///
/// ```rust
/// use meteorfall::impact::preset;
///
/// assert_eq!(preset("tunguska").unwrap().diameter_km, 0.06);
/// assert!(preset("vesta").is_none());
/// ```
pub fn preset(name: &str) -> Option<&'static ImpactPreset> {
    PRESETS_BY_NAME.get(&name.trim().to_lowercase()).copied()
}
