//! Severity classification and human-readable figures for impact results

use serde::Serialize;
use std::fmt;

use crate::constants::HIROSHIMA_MT;

/// Qualitative destruction scale keyed on released energy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DestructionLevel {
    MinorDamage,
    SignificantDamage,
    LocalDestruction,
    SevereDestruction,
    MassiveDestruction,
    RegionalDevastation,
    ContinentalDevastation,
    GlobalExtinction,
}

/// Lower energy bounds (exclusive, megatons), most severe first
const THRESHOLDS: &[(f64, DestructionLevel)] = &[
    (100_000.0, DestructionLevel::GlobalExtinction),
    (10_000.0, DestructionLevel::ContinentalDevastation),
    (1_000.0, DestructionLevel::RegionalDevastation),
    (100.0, DestructionLevel::MassiveDestruction),
    (10.0, DestructionLevel::SevereDestruction),
    (1.0, DestructionLevel::LocalDestruction),
    (0.1, DestructionLevel::SignificantDamage),
];

impl DestructionLevel {
    /// Classifies an energy release in megatons of TNT
    pub fn from_energy(megatons: f64) -> Self {
        THRESHOLDS
            .iter()
            .find(|(bound, _)| megatons > *bound)
            .map(|(_, level)| *level)
            .unwrap_or(DestructionLevel::MinorDamage)
    }

    /// Severity on a 1-10 scale (the lowest level is 3)
    pub fn severity(&self) -> u8 {
        match self {
            DestructionLevel::MinorDamage => 3,
            DestructionLevel::SignificantDamage => 4,
            DestructionLevel::LocalDestruction => 5,
            DestructionLevel::SevereDestruction => 6,
            DestructionLevel::MassiveDestruction => 7,
            DestructionLevel::RegionalDevastation => 8,
            DestructionLevel::ContinentalDevastation => 9,
            DestructionLevel::GlobalExtinction => 10,
        }
    }

    /// Title-case name shown in reports
    pub fn label(&self) -> &'static str {
        match self {
            DestructionLevel::MinorDamage => "Minor Damage",
            DestructionLevel::SignificantDamage => "Significant Damage",
            DestructionLevel::LocalDestruction => "Local Destruction",
            DestructionLevel::SevereDestruction => "Severe Destruction",
            DestructionLevel::MassiveDestruction => "Massive Destruction",
            DestructionLevel::RegionalDevastation => "Regional Devastation",
            DestructionLevel::ContinentalDevastation => "Continental Devastation",
            DestructionLevel::GlobalExtinction => "Global Extinction",
        }
    }

    /// Display colour as a hex string
    pub fn color(&self) -> &'static str {
        match self {
            DestructionLevel::MinorDamage => "#88ff00",
            DestructionLevel::SignificantDamage => "#ccff00",
            DestructionLevel::LocalDestruction => "#ffcc00",
            DestructionLevel::SevereDestruction => "#ffaa00",
            DestructionLevel::MassiveDestruction => "#ff8800",
            DestructionLevel::RegionalDevastation => "#ff6600",
            DestructionLevel::ContinentalDevastation => "#ff4400",
            DestructionLevel::GlobalExtinction => "#ff0000",
        }
    }
}

impl fmt::Display for DestructionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Number of Hiroshima bombs releasing the same energy
pub fn hiroshima_equivalents(megatons: f64) -> f64 {
    megatons / HIROSHIMA_MT
}

/// Formats a quantity with a K/M/B/T suffix and two decimals
///
/// ```rust
/// use meteorfall::impact::format_quantity;
///
/// assert_eq!(format_quantity(1_500.0), "1.50K");
/// assert_eq!(format_quantity(42.0), "42.00");
/// ```
pub fn format_quantity(value: f64) -> String {
    const SUFFIXES: &[(f64, &str)] = &[(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

    for &(scale, suffix) in SUFFIXES {
        if value >= scale {
            return format!("{:.2}{}", value / scale, suffix);
        }
    }
    format!("{:.2}", value)
}
