//! Coarse naming of impact sites
//!
//! Bounding boxes only; good enough for a caption, not for geography.

use serde::Serialize;
use std::fmt;

use crate::coordinates::GeoPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactRegion {
    AfricaEurope,
    Americas,
    AsiaOceania,
    Arctic,
    Antarctic,
    Ocean,
    Continent,
}

/// (lat_min, lat_max, lon_min, lon_max), inclusive
type Bounds = (f64, f64, f64, f64);

const AFRICA_EUROPE: Bounds = (-60.0, 70.0, -20.0, 50.0);
const AMERICAS: Bounds = (-55.0, 70.0, -170.0, -30.0);
const ASIA_OCEANIA: Bounds = (-50.0, 50.0, 60.0, 150.0);
const OCEANS: &[Bounds] = &[
    (-40.0, 40.0, -180.0, -60.0), // Pacific
    (-40.0, 60.0, -40.0, 20.0),   // Atlantic
    (-40.0, 30.0, 40.0, 120.0),   // Indian
];

fn contains(bounds: &Bounds, p: &GeoPoint) -> bool {
    let (lat_min, lat_max, lon_min, lon_max) = *bounds;
    (lat_min..=lat_max).contains(&p.lat) && (lon_min..=lon_max).contains(&p.lon)
}

impl ImpactRegion {
    /// Names the region containing `point`; earlier boxes win on overlap
    pub fn classify(point: GeoPoint) -> Self {
        if contains(&AFRICA_EUROPE, &point) {
            ImpactRegion::AfricaEurope
        } else if contains(&AMERICAS, &point) {
            ImpactRegion::Americas
        } else if contains(&ASIA_OCEANIA, &point) {
            ImpactRegion::AsiaOceania
        } else if point.lat.abs() > 60.0 {
            if point.lat > 0.0 {
                ImpactRegion::Arctic
            } else {
                ImpactRegion::Antarctic
            }
        } else if OCEANS.iter().any(|b| contains(b, &point)) {
            ImpactRegion::Ocean
        } else {
            ImpactRegion::Continent
        }
    }

    /// Human-readable region name, also used by `Display`
    pub fn label(&self) -> &'static str {
        match self {
            ImpactRegion::AfricaEurope => "Africa/Europe",
            ImpactRegion::Americas => "Americas",
            ImpactRegion::AsiaOceania => "Asia/Oceania",
            ImpactRegion::Arctic => "Arctic",
            ImpactRegion::Antarctic => "Antarctic",
            ImpactRegion::Ocean => "Ocean",
            ImpactRegion::Continent => "Continent",
        }
    }
}

impl fmt::Display for ImpactRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
