//! Scenario manifest models and loaders.
//!
//! Manifests carry raw user-facing units (angles in degrees); conversion to
//! runtime radians and geometric validation happen in the mission crate.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Central body parameters.
#[derive(Debug, Deserialize, Clone)]
pub struct BodyConfig {
    pub radius_m: f64,
    pub mu_m3_s2: f64,
}

/// Service vehicle (tanker) parameters.
#[derive(Debug, Deserialize, Clone)]
pub struct VehicleConfig {
    pub name: String,
    pub dry_mass_kg: f64,
    pub fuel_kg: f64,
    #[serde(default)]
    pub fuel_capacity_kg: Option<f64>,
    #[serde(default = "default_isp")]
    pub isp_seconds: f64,
}

fn default_isp() -> f64 {
    300.0
}

/// Candidate launch site on the body surface.
#[derive(Debug, Deserialize, Clone)]
pub struct LaunchSiteConfig {
    pub angle_deg: f64,
}

/// A circular orbit and the satellites it holds.
#[derive(Debug, Deserialize, Clone)]
pub struct OrbitConfig {
    pub radius_m: f64,
    #[serde(default)]
    pub inclination_deg: f64,
    #[serde(default)]
    pub satellites: Vec<SatelliteConfig>,
}

/// A satellite parked on its orbit.
#[derive(Debug, Deserialize, Clone)]
pub struct SatelliteConfig {
    pub phase_deg: f64,
    /// Supplied angular velocity; derived from the orbit radius when absent.
    #[serde(default)]
    pub angular_velocity_rad_s: Option<f64>,
    #[serde(default)]
    pub fuel_kg: f64,
    #[serde(default = "default_sat_capacity")]
    pub fuel_capacity_kg: f64,
}

fn default_sat_capacity() -> f64 {
    100.0
}

/// Sequencing policy selector.
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PolicyConfig {
    /// Visit orbits in ascending radius order.
    Sequential,
    /// Cluster satellites and service the highest-value ones first.
    Greedy {
        #[serde(default)]
        depot_radius_m: Option<f64>,
        #[serde(default = "default_epsilon")]
        epsilon_m: f64,
        #[serde(default = "default_inclination_tolerance")]
        inclination_tolerance_rad: f64,
        #[serde(default = "default_service_fuel")]
        service_fuel_kg: f64,
        #[serde(default = "default_fuel_margin")]
        fuel_margin: f64,
    },
    /// Park the vehicle and relay shuttles to each satellite.
    Shuttle {
        parking_radius_m: f64,
        shuttle_dry_mass_kg: f64,
        shuttle_fuel_kg: f64,
        #[serde(default = "default_station_keeping")]
        station_keeping_kg_per_s: f64,
        #[serde(default = "default_refuel_time")]
        refuel_time_s: f64,
    },
    #[serde(other)]
    Unsupported,
}

fn default_epsilon() -> f64 {
    5.0e5
}

fn default_inclination_tolerance() -> f64 {
    0.1
}

fn default_service_fuel() -> f64 {
    5.0
}

fn default_fuel_margin() -> f64 {
    1.2
}

fn default_station_keeping() -> f64 {
    0.01
}

fn default_refuel_time() -> f64 {
    300.0
}

/// Optimization objective selector.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveConfig {
    #[default]
    Fuel,
    Time,
}

/// Complete scenario manifest.
#[derive(Debug, Deserialize, Clone)]
pub struct ScenarioConfig {
    pub body: BodyConfig,
    pub vehicle: VehicleConfig,
    pub launch_sites: Vec<LaunchSiteConfig>,
    pub orbits: Vec<OrbitConfig>,
    pub policy: PolicyConfig,
    #[serde(default)]
    pub objective: ObjectiveConfig,
}

/// Errors that can occur while loading scenario files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Load a scenario manifest, dispatching on the file extension.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioConfig, ConfigError> {
    let path = path.as_ref();
    if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

/// Parse a scenario manifest from a YAML string. Used by tests and
/// front ends that already hold the document in memory.
pub fn scenario_from_yaml(contents: &str) -> Result<ScenarioConfig, ConfigError> {
    Ok(serde_yaml::from_str(contents)?)
}
