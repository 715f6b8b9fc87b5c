//! Client for the external impact simulation service
//!
//! The service owns the real physics, risk scoring and mitigation planning;
//! this module only calls it. When a simulation call fails for any reason,
//! [`simulate_or_estimate`] substitutes the local fallback estimate.

mod models;

pub use models::{
    Asteroid, MitigationPlan, MitigationStrategy, RiskAnalysis, RiskFactors, RiskLevel,
    SimulationRequest, CUSTOM_ASTEROID_ID,
};

use log::{debug, warn};
use reqwest::blocking::{Client, Response};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::config::Config;
use crate::impact::{estimate, AsteroidParams, ImpactEstimate};
use crate::{MeteorfallError, Result};
use models::ErrorBody;

/// Blocking HTTP client bound to one service instance
#[derive(Debug, Clone)]
pub struct SimulationClient {
    http: Client,
    base_url: Url,
}

impl SimulationClient {
    /// Creates a client for the service at `base_url` (e.g. `http://localhost:8000`)
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            MeteorfallError::Config(format!("invalid service URL '{}': {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(MeteorfallError::Config(format!(
                "service URL '{}' cannot carry a path",
                base_url
            )));
        }

        let http = Client::builder().timeout(timeout).build()?;
        Ok(SimulationClient { http, base_url })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Self::new(&config.api_base_url, config.timeout())
    }

    /// Builds `{base}/api/{segments...}` with each segment percent-encoded
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    /// `GET /api/asteroids`
    pub fn asteroids(&self) -> Result<Vec<Asteroid>> {
        self.get(&["asteroids"])
    }

    /// `GET /api/asteroids/{id}`
    pub fn asteroid(&self, id: &str) -> Result<Asteroid> {
        self.get(&["asteroids", id])
    }

    /// `POST /api/simulation`
    pub fn run_simulation(&self, request: &SimulationRequest) -> Result<ImpactEstimate> {
        self.post(&["simulation"], request)
    }

    /// `GET /api/risk-analysis/{id}`
    pub fn risk_analysis(&self, id: &str) -> Result<RiskAnalysis> {
        self.get(&["risk-analysis", id])
    }

    /// `GET /api/mitigation-strategies/{id}`
    pub fn mitigation_strategies(&self, id: &str) -> Result<MitigationPlan> {
        self.get(&["mitigation-strategies", id])
    }

    fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.endpoint(segments);
        debug!("GET {}", url);
        let response = self.http.get(url).send()?;
        decode(response)
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, segments: &[&str], body: &B) -> Result<T> {
        let url = self.endpoint(segments);
        debug!("POST {}", url);
        let response = self.http.post(url).json(body).send()?;
        decode(response)
    }
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json()?);
    }

    let text = response.text().unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(detail),
        }) => detail,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) if text.is_empty() => status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_string(),
        Err(_) => text,
    };

    Err(MeteorfallError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Where a simulation result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateSource {
    /// Returned by the simulation service
    Remote,
    /// Computed locally by [`estimate`] after the service call failed
    LocalFallback,
}

impl EstimateSource {
    /// Identifier matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            EstimateSource::Remote => "remote",
            EstimateSource::LocalFallback => "local_fallback",
        }
    }
}

impl fmt::Display for EstimateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Impact estimate tagged with its source
///
/// Serializes flat: the estimate's fields plus `"source"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationOutcome {
    /// The effects, from the service or the local fallback
    #[serde(flatten)]
    pub estimate: ImpactEstimate,
    /// Which of the two produced `estimate`
    pub source: EstimateSource,
}

/// Runs the remote simulation, falling back to the local estimate on failure
///
/// Any transport, status or decoding error from the service is logged and
/// replaced by [`estimate`] on `params`. The parameters are validated first,
/// so invalid input fails without a network call.
pub fn simulate_or_estimate(
    client: &SimulationClient,
    request: &SimulationRequest,
    params: &AsteroidParams,
) -> Result<SimulationOutcome> {
    params.validate()?;

    match client.run_simulation(request) {
        Ok(estimate) => Ok(SimulationOutcome {
            estimate,
            source: EstimateSource::Remote,
        }),
        Err(e) => {
            warn!("simulation service unavailable ({}), using local estimate", e);
            Ok(SimulationOutcome {
                estimate: estimate(params)?,
                source: EstimateSource::LocalFallback,
            })
        }
    }
}
