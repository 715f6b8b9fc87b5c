//! Impact scenario tool
//!
//! Estimates impact effects, converts between globe and geographic
//! coordinates, and queries the simulation service.
//!
//! Usage:
//!   cargo run --bin meteorfall -- estimate --preset tunguska
//!   cargo run --bin meteorfall -- simulate --lat 25 --lon -100 --diameter 1 --velocity 20
//!   RUST_LOG=meteorfall=debug cargo run --bin meteorfall -- pick 0 2 2

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use meteorfall::api::{simulate_or_estimate, SimulationClient, SimulationRequest};
use meteorfall::coordinates::{marker_orientation, to_cartesian_with_radius, to_geo_normalized};
use meteorfall::impact::{
    format_quantity, hiroshima_equivalents, preset, ImpactEstimate, ImpactRegion, PRESETS,
};
use meteorfall::{estimate, AsteroidParams, Cartesian3, Composition, Config, GeoPoint};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Asteroid impact scenario tool
#[derive(Parser, Debug)]
#[command(author, version, about = "Estimates asteroid impact effects and queries the simulation service", long_about = None)]
struct Args {
    /// Emit JSON instead of formatted text
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    json: bool,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Simulation service base URL (overrides config and environment)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

/// Asteroid description shared by `estimate` and `simulate`
#[derive(clap::Args, Debug)]
struct AsteroidArgs {
    /// Start from a named preset (e.g. tunguska, chicxulub)
    #[arg(long)]
    preset: Option<String>,

    /// Diameter in km
    #[arg(long, default_value_t = 1.0)]
    diameter: f64,

    /// Impact velocity in km/s
    #[arg(long, default_value_t = 20.0)]
    velocity: f64,

    /// Composition: rocky, metallic or icy
    #[arg(long, default_value = "rocky")]
    composition: Composition,

    /// Density in kg/m³ (defaults to the composition's)
    #[arg(long)]
    density: Option<f64>,
}

impl AsteroidArgs {
    fn resolve(&self) -> Result<(AsteroidParams, Composition)> {
        if let Some(name) = &self.preset {
            let p = preset(name).ok_or_else(|| format!("unknown preset '{}'", name))?;
            return Ok((p.params(), p.composition));
        }
        let density = self
            .density
            .unwrap_or_else(|| self.composition.density_kg_m3());
        Ok((
            AsteroidParams::new(self.diameter, self.velocity, density)?,
            self.composition,
        ))
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate impact effects locally
    Estimate {
        #[command(flatten)]
        asteroid: AsteroidArgs,

        /// Impact latitude, for naming the region
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Impact longitude, for naming the region
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,
    },

    /// Place a geographic point on the globe
    Locate {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Sphere radius (defaults to the configured marker radius)
        #[arg(long)]
        radius: Option<f64>,
    },

    /// Convert a globe-space vector to latitude and longitude
    Pick {
        #[arg(allow_hyphen_values = true)]
        x: f64,
        #[arg(allow_hyphen_values = true)]
        y: f64,
        #[arg(allow_hyphen_values = true)]
        z: f64,
    },

    /// Run the remote simulation, estimating locally if it fails
    Simulate {
        #[command(flatten)]
        asteroid: AsteroidArgs,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Entry angle in degrees
        #[arg(long, default_value_t = 45.0)]
        angle: f64,
    },

    /// List the service's asteroid catalog
    Asteroids,

    /// Show the service's risk analysis for an asteroid
    Risk { id: String },

    /// Show the service's mitigation strategies for an asteroid
    Mitigation { id: String },

    /// List built-in impact presets
    Presets,
}

/// Prints a section header with a title and separator line
fn print_section_header(title: &str) {
    println!("\n{}:", title);
    println!("-------------------------------------------------------");
}

/// Helper to print named values in a formatted way
fn print_named_value(name: &str, value: impl std::fmt::Display) {
    println!("{:<24} {}", format!("{}:", name), value);
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_estimate(result: &ImpactEstimate, location: Option<GeoPoint>) {
    let level = result.destruction_level();

    print_section_header("Impact Effects");
    print_named_value(
        "Energy",
        format!("{} Mt TNT", format_quantity(result.energy_megatons_tnt)),
    );
    print_named_value(
        "Hiroshima equivalents",
        format_quantity(hiroshima_equivalents(result.energy_megatons_tnt)),
    );
    print_named_value(
        "Crater diameter",
        format!("{:.2} km", result.crater_diameter_km),
    );
    print_named_value(
        "Affected area",
        format!("{} km²", format_quantity(result.affected_area_km2)),
    );
    print_named_value("Casualties", format_quantity(result.casualties_estimate));
    print_named_value(
        "Economic damage",
        format!("${}", format_quantity(result.economic_damage_usd)),
    );
    print_named_value(
        "Destruction level",
        format!("{} ({}/10)", level, level.severity()),
    );
    if let Some(point) = location {
        print_named_value("Impact site", point);
        print_named_value("Region", ImpactRegion::classify(point));
    }
}

fn optional_location(lat: Option<f64>, lon: Option<f64>) -> Result<Option<GeoPoint>> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => Ok(Some(GeoPoint::try_new(lat, lon)?)),
        (None, None) => Ok(None),
        _ => Err("--lat and --lon must be given together".into()),
    }
}

#[derive(Serialize)]
struct LocateOutput {
    point: GeoPoint,
    cartesian: Cartesian3,
    /// Marker rotation quaternion as [i, j, k, w]
    orientation: [f64; 4],
}

fn run(args: Args) -> Result<()> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(url) = &args.api_url {
        config.api_base_url = url.clone();
        config.validate()?;
    }

    match args.command {
        Command::Estimate { asteroid, lat, lon } => {
            let (params, _) = asteroid.resolve()?;
            let location = optional_location(lat, lon)?;
            let result = estimate(&params)?;
            if args.json {
                print_json(&result)?;
            } else {
                print_estimate(&result, location);
            }
        }

        Command::Locate { lat, lon, radius } => {
            let point = GeoPoint::try_new(lat, lon)?;
            let cartesian = to_cartesian_with_radius(point, radius.unwrap_or(config.marker_radius));
            let q = marker_orientation(point);
            let output = LocateOutput {
                point,
                cartesian,
                orientation: [q.i, q.j, q.k, q.w],
            };
            if args.json {
                print_json(&output)?;
            } else {
                print_section_header("Globe Position");
                print_named_value("Point", point);
                print_named_value(
                    "Cartesian",
                    format!("({:.6}, {:.6}, {:.6})", cartesian.x, cartesian.y, cartesian.z),
                );
                print_named_value(
                    "Marker quaternion",
                    format!("[{:.6}, {:.6}, {:.6}, {:.6}]", q.i, q.j, q.k, q.w),
                );
            }
        }

        Command::Pick { x, y, z } => {
            let point = to_geo_normalized(Cartesian3::new(x, y, z))?;
            if args.json {
                print_json(&point)?;
            } else {
                print_named_value("Point", point);
                print_named_value("Region", ImpactRegion::classify(point));
            }
        }

        Command::Simulate {
            asteroid,
            lat,
            lon,
            angle,
        } => {
            let (params, composition) = asteroid.resolve()?;
            let location = GeoPoint::try_new(lat, lon)?;
            let client = SimulationClient::from_config(&config)?;
            let request = SimulationRequest::custom(location, &params, angle, composition);
            let outcome = simulate_or_estimate(&client, &request, &params)?;
            if args.json {
                print_json(&outcome)?;
            } else {
                print_estimate(&outcome.estimate, Some(location));
                print_named_value("Source", outcome.source);
            }
        }

        Command::Asteroids => {
            let asteroids = SimulationClient::from_config(&config)?.asteroids()?;
            if args.json {
                print_json(&asteroids)?;
            } else {
                print_section_header("Known Asteroids");
                println!(
                    "{:<14} {:<18} {:>10} {:>10} {:>8} {:>8}",
                    "ID", "Name", "Diam (km)", "Vel (km/s)", "Risk", "P(hit)"
                );
                for a in &asteroids {
                    println!(
                        "{:<14} {:<18} {:>10.3} {:>10.1} {:>8} {:>8.4}",
                        a.id,
                        a.name,
                        a.diameter,
                        a.velocity,
                        format!("{:?}", a.risk_level),
                        a.impact_probability
                    );
                }
            }
        }

        Command::Risk { id } => {
            let risk = SimulationClient::from_config(&config)?.risk_analysis(&id)?;
            if args.json {
                print_json(&risk)?;
            } else {
                print_section_header(&format!("Risk Analysis for {}", risk.asteroid_id));
                print_named_value("Overall score", format!("{:.3}", risk.overall_risk_score));
                print_named_value("Size factor", format!("{:.3}", risk.risk_factors.size));
                print_named_value("Velocity factor", format!("{:.3}", risk.risk_factors.velocity));
                print_named_value("Proximity factor", format!("{:.3}", risk.risk_factors.proximity));
                print_named_value("Urgency", format!("{:?}", risk.mitigation_urgency));
                print_named_value("Detection time", &risk.estimated_detection_time);
                for action in &risk.recommended_actions {
                    println!("  - {}", action);
                }
            }
        }

        Command::Mitigation { id } => {
            let plan = SimulationClient::from_config(&config)?.mitigation_strategies(&id)?;
            if args.json {
                print_json(&plan)?;
            } else {
                print_section_header(&format!("Mitigation Strategies for {}", plan.asteroid_id));
                for s in &plan.available_strategies {
                    println!(
                        "{} ({:.0}% success, ${}, {})",
                        s.name,
                        s.success_probability * 100.0,
                        format_quantity(s.cost_estimate),
                        s.preparation_time
                    );
                    println!("    {}", s.description);
                }
                print_named_value("Recommended", &plan.recommended_strategy);
                print_named_value("Timeline", &plan.decision_timeline);
            }
        }

        Command::Presets => {
            print_section_header("Impact Presets");
            for p in PRESETS {
                let energy = estimate(&p.params())?.energy_megatons_tnt;
                println!(
                    "{:<24} {:>7.3} km {:>6.1} km/s {:<9} {:>10} Mt",
                    p.name,
                    p.diameter_km,
                    p.velocity_km_s,
                    p.composition,
                    format_quantity(energy)
                );
            }
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
