//! Closed-form fallback estimate of impact effects
//!
//! This is the local approximation used when the simulation service is
//! unavailable. It is an order-of-magnitude model: kinetic energy of a
//! uniform sphere, a quarter-power crater scaling law, and flat population
//! and economic densities over the affected zone.

use log::debug;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::Composition;
use crate::constants::{
    AFFECTED_RADIUS_FACTOR, CASUALTY_RATE, CRATER_REFERENCE_MT, CRATER_SCALE,
    DAMAGE_USD_PER_KM2, MEGATON_TNT_J, POPULATION_DENSITY_KM2,
};
use crate::{MeteorfallError, Result};

/// Physical parameters of the impactor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AsteroidParams {
    /// Diameter in kilometers
    pub diameter_km: f64,
    /// Velocity at impact in km/s
    pub velocity_km_s: f64,
    /// Bulk density in kg/m³
    pub density_kg_m3: f64,
}

impl AsteroidParams {
    /// Creates validated parameters
    ///
    /// # Errors
    ///
    /// [`MeteorfallError::InvalidParameter`] if any value is not a positive
    /// finite number.
    pub fn new(diameter_km: f64, velocity_km_s: f64, density_kg_m3: f64) -> Result<Self> {
        let params = AsteroidParams {
            diameter_km,
            velocity_km_s,
            density_kg_m3,
        };
        params.validate()?;
        Ok(params)
    }

    /// Creates validated parameters using a composition's typical density
    pub fn with_composition(
        diameter_km: f64,
        velocity_km_s: f64,
        composition: Composition,
    ) -> Result<Self> {
        Self::new(diameter_km, velocity_km_s, composition.density_kg_m3())
    }

    /// Checks that every field is positive and finite
    pub fn validate(&self) -> Result<()> {
        check_positive("diameter_km", self.diameter_km)?;
        check_positive("velocity_km_s", self.velocity_km_s)?;
        check_positive("density_kg_m3", self.density_kg_m3)?;
        Ok(())
    }

    /// Mass of a uniform sphere with these dimensions, in kg
    pub fn mass_kg(&self) -> f64 {
        let radius_m = self.diameter_km / 2.0 * 1000.0;
        let volume_m3 = 4.0 / 3.0 * PI * radius_m.powi(3);
        volume_m3 * self.density_kg_m3
    }

    /// Kinetic energy at impact, in joules
    pub fn kinetic_energy_j(&self) -> f64 {
        let velocity_m_s = self.velocity_km_s * 1000.0;
        0.5 * self.mass_kg() * velocity_m_s * velocity_m_s
    }
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(MeteorfallError::InvalidParameter(format!(
            "{} must be a positive finite number, got {}",
            name, value
        )))
    }
}

/// Destructive effects of an impact
///
/// Field names serialize as the simulation service's result fields, so a
/// local estimate and a remote result share one JSON shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactEstimate {
    /// Final crater diameter in km
    #[serde(rename = "crater_diameter", alias = "crater_diameter_km")]
    pub crater_diameter_km: f64,
    /// Released energy in megatons of TNT
    #[serde(rename = "energy_released", alias = "energy_megatons_tnt")]
    pub energy_megatons_tnt: f64,
    /// Area of the destruction zone in km²
    #[serde(rename = "affected_area", alias = "affected_area_km2")]
    pub affected_area_km2: f64,
    /// Estimated casualties (whole people)
    pub casualties_estimate: f64,
    /// Estimated economic damage in USD
    #[serde(rename = "economic_damage", alias = "economic_damage_usd")]
    pub economic_damage_usd: f64,
}

/// Estimates impact effects from the asteroid's parameters alone
///
/// ```rust
/// use meteorfall::{estimate, AsteroidParams};
///
/// let params = AsteroidParams::new(1.0, 20.0, 2500.0).unwrap();
/// let effects = estimate(&params).unwrap();
/// assert!(effects.energy_megatons_tnt > 10_000.0);
/// ```
///
/// # Errors
///
/// [`MeteorfallError::InvalidParameter`] for non-positive or non-finite
/// parameters, or parameters so large the result overflows.
pub fn estimate(params: &AsteroidParams) -> Result<ImpactEstimate> {
    params.validate()?;

    let energy_megatons_tnt = params.kinetic_energy_j() / MEGATON_TNT_J;
    let crater_diameter_km =
        (energy_megatons_tnt / CRATER_REFERENCE_MT).powf(0.25) * params.diameter_km * CRATER_SCALE;
    let affected_area_km2 = PI * (crater_diameter_km * AFFECTED_RADIUS_FACTOR).powi(2);
    let casualties_estimate = (affected_area_km2 * POPULATION_DENSITY_KM2 * CASUALTY_RATE).floor();
    let economic_damage_usd = affected_area_km2 * DAMAGE_USD_PER_KM2;

    let result = ImpactEstimate {
        crater_diameter_km,
        energy_megatons_tnt,
        affected_area_km2,
        casualties_estimate,
        economic_damage_usd,
    };

    if !result.economic_damage_usd.is_finite() || !result.energy_megatons_tnt.is_finite() {
        return Err(MeteorfallError::InvalidParameter(format!(
            "parameters {:?} overflow the estimate",
            params
        )));
    }

    debug!(
        "fallback estimate: {:.3e} Mt, crater {:.2} km, area {:.3e} km²",
        result.energy_megatons_tnt, result.crater_diameter_km, result.affected_area_km2
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn reference() -> AsteroidParams {
        AsteroidParams::new(1.0, 20.0, 2500.0).unwrap()
    }

    #[test]
    fn test_reference_impact() {
        let result = estimate(&reference()).unwrap();

        // 0.5 * (4/3 π 500³ · 2500) · 20000² / 4.184e15
        let expected_mt = 0.5 * (4.0 / 3.0 * PI * 500.0_f64.powi(3) * 2500.0) * 4e8 / 4.184e15;
        assert_relative_eq!(result.energy_megatons_tnt, expected_mt, max_relative = 1e-12);
        assert!(result.energy_megatons_tnt > 10_000.0);

        let expected_crater = (expected_mt / 1000.0).powf(0.25) * 20.0;
        assert_relative_eq!(result.crater_diameter_km, expected_crater, max_relative = 1e-12);

        let expected_area = PI * (expected_crater * 10.0).powi(2);
        assert_relative_eq!(result.affected_area_km2, expected_area, max_relative = 1e-12);
        assert_eq!(result.casualties_estimate, (expected_area * 15.0).floor());
        assert_relative_eq!(result.economic_damage_usd, expected_area * 1e8, max_relative = 1e-12);
    }

    #[test]
    fn test_outputs_non_negative() {
        let tiny = AsteroidParams::new(1e-6, 0.1, 1.0).unwrap();
        let result = estimate(&tiny).unwrap();
        assert!(result.crater_diameter_km >= 0.0);
        assert!(result.energy_megatons_tnt >= 0.0);
        assert!(result.affected_area_km2 >= 0.0);
        assert!(result.casualties_estimate >= 0.0);
        assert!(result.economic_damage_usd >= 0.0);
    }

    #[rstest]
    #[case(0.0, 20.0, 2500.0)]
    #[case(-1.0, 20.0, 2500.0)]
    #[case(1.0, 0.0, 2500.0)]
    #[case(1.0, -5.0, 2500.0)]
    #[case(1.0, 20.0, 0.0)]
    #[case(f64::NAN, 20.0, 2500.0)]
    #[case(1.0, f64::INFINITY, 2500.0)]
    fn test_invalid_parameters(#[case] d: f64, #[case] v: f64, #[case] rho: f64) {
        assert!(matches!(
            AsteroidParams::new(d, v, rho),
            Err(MeteorfallError::InvalidParameter(_))
        ));

        // Bypassing the constructor is caught by the estimator
        let raw = AsteroidParams {
            diameter_km: d,
            velocity_km_s: v,
            density_kg_m3: rho,
        };
        assert!(matches!(
            estimate(&raw),
            Err(MeteorfallError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_overflow_is_rejected() {
        let huge = AsteroidParams {
            diameter_km: 1e200,
            velocity_km_s: 20.0,
            density_kg_m3: 2500.0,
        };
        assert!(estimate(&huge).is_err());
    }

    #[test]
    fn test_composition_density() {
        let params = AsteroidParams::with_composition(1.0, 20.0, Composition::Metallic).unwrap();
        assert_eq!(params.density_kg_m3, 7800.0);
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(estimate(&reference()).unwrap()).unwrap();
        for key in [
            "crater_diameter",
            "energy_released",
            "affected_area",
            "casualties_estimate",
            "economic_damage",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }

        let remote: ImpactEstimate = serde_json::from_str(
            r#"{"crater_diameter": 2.5, "energy_released": 100.0, "affected_area": 10.0,
                "casualties_estimate": 350, "economic_damage": 1e10}"#,
        )
        .unwrap();
        assert_eq!(remote.casualties_estimate, 350.0);
        assert_eq!(remote.crater_diameter_km, 2.5);
    }
}
