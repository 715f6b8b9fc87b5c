//! Request and response bodies of the simulation service

use serde::{Deserialize, Serialize};

use crate::coordinates::GeoPoint;
use crate::impact::{AsteroidParams, Composition};

/// Asteroid id the service treats as "use the parameters in the request"
pub const CUSTOM_ASTEROID_ID: &str = "custom-asteroid";

/// Qualitative risk grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    #[serde(other)]
    Unknown,
}

/// Body of `POST /api/simulation`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub asteroid_id: String,
    pub impact_location: GeoPoint,
    /// Entry angle in degrees from the horizontal
    pub impact_angle: f64,
    /// km/s
    pub impact_velocity: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub asteroid_diameter: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub asteroid_composition: Option<Composition>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub asteroid_density: Option<f64>,
}

impl SimulationRequest {
    /// Request for a user-configured asteroid
    pub fn custom(
        location: GeoPoint,
        params: &AsteroidParams,
        impact_angle: f64,
        composition: Composition,
    ) -> Self {
        SimulationRequest {
            asteroid_id: CUSTOM_ASTEROID_ID.to_string(),
            impact_location: location,
            impact_angle,
            impact_velocity: params.velocity_km_s,
            asteroid_diameter: Some(params.diameter_km),
            asteroid_composition: Some(composition),
            asteroid_density: Some(params.density_kg_m3),
        }
    }

    /// Request for an asteroid from the service's catalog
    pub fn catalog(
        asteroid_id: &str,
        location: GeoPoint,
        impact_angle: f64,
        impact_velocity: f64,
    ) -> Self {
        SimulationRequest {
            asteroid_id: asteroid_id.to_string(),
            impact_location: location,
            impact_angle,
            impact_velocity,
            asteroid_diameter: None,
            asteroid_composition: None,
            asteroid_density: None,
        }
    }
}

/// Catalog entry from `GET /api/asteroids`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: String,
    pub name: String,
    /// km
    pub diameter: f64,
    /// km/s
    pub velocity: f64,
    /// km
    pub distance_from_earth: f64,
    pub risk_level: RiskLevel,
    pub impact_probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactors {
    pub size: f64,
    pub velocity: f64,
    pub proximity: f64,
}

/// Response of `GET /api/risk-analysis/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    pub asteroid_id: String,
    pub overall_risk_score: f64,
    pub risk_factors: RiskFactors,
    pub mitigation_urgency: RiskLevel,
    pub estimated_detection_time: String,
    #[serde(default)]
    pub recommended_actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MitigationStrategy {
    pub name: String,
    pub description: String,
    pub success_probability: f64,
    /// USD
    pub cost_estimate: f64,
    pub preparation_time: String,
    pub effectiveness: String,
}

/// Response of `GET /api/mitigation-strategies/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MitigationPlan {
    pub asteroid_id: String,
    #[serde(default)]
    pub available_strategies: Vec<MitigationStrategy>,
    pub recommended_strategy: String,
    pub decision_timeline: String,
}

/// FastAPI-style error body
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: serde_json::Value,
}
