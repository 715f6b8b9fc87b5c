//! Meteorfall: the computational core of an asteroid-impact visualizer
//!
//! This crate maps impact sites between latitude/longitude and the rendered
//! globe, estimates destructive effects locally when the simulation service
//! cannot be reached, and talks to that service when it can.

use thiserror::Error;

pub mod api;
pub mod config;
pub mod constants;
pub mod coordinates;
pub mod impact;
pub mod picking;
pub mod trajectory;

// Re-export commonly used types
pub use api::{simulate_or_estimate, SimulationClient, SimulationOutcome};
pub use config::Config;
pub use coordinates::{
    to_cartesian, to_cartesian_with_radius, to_geo, to_geo_normalized, Cartesian3,
    CartesianPoint, GeoPoint,
};
pub use impact::{estimate, AsteroidParams, Composition, ImpactEstimate};

/// Main error type for the meteorfall library
#[derive(Debug, Error)]
pub enum MeteorfallError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Simulation service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for meteorfall operations
pub type Result<T> = std::result::Result<T, MeteorfallError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MeteorfallError::InvalidParameter("diameter_km must be > 0".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: diameter_km must be > 0");

        let err = MeteorfallError::Api {
            status: 404,
            message: "Asteroid not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Simulation service returned 404: Asteroid not found"
        );
    }

    #[test]
    fn test_io_error_converts() {
        fn open_missing() -> Result<std::fs::File> {
            Ok(std::fs::File::open("/definitely/not/here.json")?)
        }
        assert!(matches!(open_missing(), Err(MeteorfallError::Io(_))));
    }
}
