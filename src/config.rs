//! Runtime configuration
//!
//! Values come from built-in defaults, optionally overlaid by a JSON file,
//! then by environment variables.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::constants::MARKER_RADIUS;
use crate::{MeteorfallError, Result};

/// Environment variable overriding the simulation service URL
pub const ENV_API_URL: &str = "METEORFALL_API_URL";
/// Environment variable overriding the request timeout, in seconds
pub const ENV_TIMEOUT_SECS: &str = "METEORFALL_TIMEOUT_SECS";

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the simulation service, without the `/api` prefix
    pub api_base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Radius at which impact markers are placed on the unit globe
    pub marker_radius: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            marker_radius: MARKER_RADIUS,
        }
    }
}

impl Config {
    /// Loads a JSON file; keys it omits keep their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, then the optional file, then the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_env()
    }

    /// Applies `METEORFALL_API_URL` and `METEORFALL_TIMEOUT_SECS` if set
    pub fn apply_env(self) -> Result<Self> {
        self.apply_overrides(env::var(ENV_API_URL).ok(), env::var(ENV_TIMEOUT_SECS).ok())
    }

    fn apply_overrides(mut self, api_url: Option<String>, timeout: Option<String>) -> Result<Self> {
        if let Some(url) = api_url {
            self.api_base_url = url;
        }
        if let Some(raw) = timeout {
            self.timeout_secs = raw.trim().parse().map_err(|_| {
                MeteorfallError::Config(format!("{} must be an integer, got '{}'", ENV_TIMEOUT_SECS, raw))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Rejects empty URLs, zero timeouts and non-positive marker radii
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(MeteorfallError::Config("api_base_url is empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(MeteorfallError::Config("timeout_secs must be at least 1".to_string()));
        }
        if !(self.marker_radius.is_finite() && self.marker_radius > 0.0) {
            return Err(MeteorfallError::Config(format!(
                "marker_radius must be positive, got {}",
                self.marker_radius
            )));
        }
        Ok(())
    }

    /// Per-request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
