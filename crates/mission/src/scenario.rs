//! Runtime scenario types and validation.
//!
//! Configuration is converted once from the serde manifests into SI/radian
//! form, then stays read-only for the whole planning run: every optimizer
//! candidate shares the same scenario by reference.

use refuel_config::{
    ObjectiveConfig, PolicyConfig, ScenarioConfig,
};
use refuel_core::point::{self, Point2};
use refuel_core::units::deg_to_rad;
use thiserror::Error;

/// Central body the mission orbits. Created once per scenario.
#[derive(Debug, Clone, Copy)]
pub struct CentralBody {
    pub radius_m: f64,
    pub mu_m3_s2: f64,
}

/// Candidate launch site on the body surface.
#[derive(Debug, Clone, Copy)]
pub struct LaunchSite {
    pub angle_rad: f64,
}

impl LaunchSite {
    /// Cartesian position of the site on the surface.
    pub fn position(&self, body: &CentralBody) -> Point2 {
        point::from_polar(body.radius_m, self.angle_rad)
    }
}

/// A satellite parked on a circular orbit. Its position at time t is a pure
/// function of phase, angular velocity, and t.
#[derive(Debug, Clone, Copy)]
pub struct SatelliteSpec {
    pub phase_rad: f64,
    pub angular_velocity_rad_s: f64,
    pub fuel_kg: f64,
    pub fuel_capacity_kg: f64,
}

impl SatelliteSpec {
    /// Angular position at time `t_s`.
    pub fn angle_at(&self, t_s: f64) -> f64 {
        refuel_core::angles::normalize(self.phase_rad + self.angular_velocity_rad_s * t_s)
    }

    /// Planar position at time `t_s` on an orbit of radius `radius_m`.
    pub fn position_at(&self, radius_m: f64, t_s: f64) -> Point2 {
        point::from_polar(radius_m, self.angle_at(t_s))
    }

    /// Fraction of fuel missing, in [0, 1]. Drives the greedy value metric.
    pub fn fuel_need(&self) -> f64 {
        if self.fuel_capacity_kg > 0.0 {
            1.0 - self.fuel_kg / self.fuel_capacity_kg
        } else {
            0.0
        }
    }
}

/// A circular orbit holding zero or more satellites.
#[derive(Debug, Clone)]
pub struct OrbitSpec {
    pub radius_m: f64,
    pub inclination_rad: f64,
    pub satellites: Vec<SatelliteSpec>,
}

/// Service vehicle parameters.
#[derive(Debug, Clone)]
pub struct VehicleSpec {
    pub name: String,
    pub dry_mass_kg: f64,
    pub fuel_kg: f64,
    pub fuel_capacity_kg: f64,
    pub isp_seconds: f64,
}

/// Parameters for the sequential-by-radius policy.
#[derive(Debug, Clone, Copy)]
pub struct SequentialPolicy {
    pub trajectory_steps: usize,
    pub max_mission_time_s: f64,
}

impl Default for SequentialPolicy {
    fn default() -> Self {
        Self {
            trajectory_steps: 50,
            max_mission_time_s: 1.0e7,
        }
    }
}

/// Parameters for the greedy cluster-aware servicing policy.
#[derive(Debug, Clone, Copy)]
pub struct GreedyPolicy {
    /// Orbit radius the vehicle launches to and returns from. Defaults to
    /// the lowest configured orbit.
    pub depot_radius_m: Option<f64>,
    pub epsilon_m: f64,
    pub inclination_tolerance_rad: f64,
    pub service_fuel_kg: f64,
    pub fuel_margin: f64,
    pub trajectory_steps: usize,
    pub max_mission_time_s: f64,
}

impl Default for GreedyPolicy {
    fn default() -> Self {
        Self {
            depot_radius_m: None,
            epsilon_m: 5.0e5,
            inclination_tolerance_rad: 0.1,
            service_fuel_kg: 5.0,
            fuel_margin: 1.2,
            trajectory_steps: 50,
            max_mission_time_s: 1.0e7,
        }
    }
}

/// Parameters for the shuttle relay policy.
#[derive(Debug, Clone, Copy)]
pub struct ShuttlePolicy {
    pub parking_radius_m: f64,
    pub shuttle_dry_mass_kg: f64,
    pub shuttle_fuel_kg: f64,
    pub station_keeping_kg_per_s: f64,
    pub refuel_time_s: f64,
    pub trajectory_steps: usize,
    pub max_mission_time_s: f64,
}

/// Sequencing policy selected for a scenario.
#[derive(Debug, Clone)]
pub enum MissionPolicy {
    Sequential(SequentialPolicy),
    Greedy(GreedyPolicy),
    Shuttle(ShuttlePolicy),
}

/// Optimization objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Objective {
    #[default]
    MinimumFuel,
    MinimumTime,
}

/// Validated, read-only mission configuration.
#[derive(Debug, Clone)]
pub struct MissionScenario {
    pub body: CentralBody,
    pub vehicle: VehicleSpec,
    pub launch_sites: Vec<LaunchSite>,
    pub orbits: Vec<OrbitSpec>,
    pub policy: MissionPolicy,
    pub objective: Objective,
}

/// Configuration rejected before any simulation begins.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("scenario defines no orbits")]
    NoOrbits,
    #[error("scenario defines no launch sites")]
    NoLaunchSites,
    #[error("central body radius must be positive, got {0} m")]
    NonPositiveBodyRadius(f64),
    #[error("gravitational parameter must be positive, got {0} m^3/s^2")]
    NonPositiveMu(f64),
    #[error("orbit radius {radius_m} m does not clear the body radius {body_radius_m} m")]
    OrbitBelowSurface { radius_m: f64, body_radius_m: f64 },
    #[error("vehicle fuel {fuel_kg} kg exceeds capacity {capacity_kg} kg")]
    FuelExceedsCapacity { fuel_kg: f64, capacity_kg: f64 },
    #[error("vehicle dry mass must be positive, got {0} kg")]
    NonPositiveDryMass(f64),
    #[error("specific impulse must be positive, got {0} s")]
    NonPositiveIsp(f64),
    #[error("parking/depot radius {radius_m} m does not clear the body radius {body_radius_m} m")]
    ParkingBelowSurface { radius_m: f64, body_radius_m: f64 },
    #[error("scenario policy is not supported")]
    UnsupportedPolicy,
}

impl MissionScenario {
    /// Convert a parsed manifest into runtime form and validate it.
    pub fn from_config(cfg: &ScenarioConfig) -> Result<Self, ValidationError> {
        let body = CentralBody {
            radius_m: cfg.body.radius_m,
            mu_m3_s2: cfg.body.mu_m3_s2,
        };

        let orbits = cfg
            .orbits
            .iter()
            .map(|orbit| OrbitSpec {
                radius_m: orbit.radius_m,
                inclination_rad: deg_to_rad(orbit.inclination_deg),
                satellites: orbit
                    .satellites
                    .iter()
                    .map(|sat| SatelliteSpec {
                        phase_rad: deg_to_rad(sat.phase_deg),
                        angular_velocity_rad_s: sat.angular_velocity_rad_s.unwrap_or_else(|| {
                            // Derived for a circular orbit; revalidated below.
                            if orbit.radius_m > 0.0 && body.mu_m3_s2 > 0.0 {
                                (body.mu_m3_s2 / orbit.radius_m.powi(3)).sqrt()
                            } else {
                                0.0
                            }
                        }),
                        fuel_kg: sat.fuel_kg,
                        fuel_capacity_kg: sat.fuel_capacity_kg,
                    })
                    .collect(),
            })
            .collect();

        let policy = match &cfg.policy {
            PolicyConfig::Sequential => MissionPolicy::Sequential(SequentialPolicy::default()),
            PolicyConfig::Greedy {
                depot_radius_m,
                epsilon_m,
                inclination_tolerance_rad,
                service_fuel_kg,
                fuel_margin,
            } => MissionPolicy::Greedy(GreedyPolicy {
                depot_radius_m: *depot_radius_m,
                epsilon_m: *epsilon_m,
                inclination_tolerance_rad: *inclination_tolerance_rad,
                service_fuel_kg: *service_fuel_kg,
                fuel_margin: *fuel_margin,
                ..GreedyPolicy::default()
            }),
            PolicyConfig::Shuttle {
                parking_radius_m,
                shuttle_dry_mass_kg,
                shuttle_fuel_kg,
                station_keeping_kg_per_s,
                refuel_time_s,
            } => MissionPolicy::Shuttle(ShuttlePolicy {
                parking_radius_m: *parking_radius_m,
                shuttle_dry_mass_kg: *shuttle_dry_mass_kg,
                shuttle_fuel_kg: *shuttle_fuel_kg,
                station_keeping_kg_per_s: *station_keeping_kg_per_s,
                refuel_time_s: *refuel_time_s,
                trajectory_steps: 50,
                max_mission_time_s: 1.0e7,
            }),
            PolicyConfig::Unsupported => return Err(ValidationError::UnsupportedPolicy),
        };

        let scenario = Self {
            body,
            vehicle: VehicleSpec {
                name: cfg.vehicle.name.clone(),
                dry_mass_kg: cfg.vehicle.dry_mass_kg,
                fuel_kg: cfg.vehicle.fuel_kg,
                fuel_capacity_kg: cfg.vehicle.fuel_capacity_kg.unwrap_or(cfg.vehicle.fuel_kg),
                isp_seconds: cfg.vehicle.isp_seconds,
            },
            launch_sites: cfg
                .launch_sites
                .iter()
                .map(|site| LaunchSite {
                    angle_rad: deg_to_rad(site.angle_deg),
                })
                .collect(),
            orbits,
            policy,
            objective: match cfg.objective {
                ObjectiveConfig::Fuel => Objective::MinimumFuel,
                ObjectiveConfig::Time => Objective::MinimumTime,
            },
        };
        scenario.validate()?;
        Ok(scenario)
    }

    /// Reject geometrically or physically invalid configuration. Invalid
    /// input is never clamped.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.body.radius_m <= 0.0 {
            return Err(ValidationError::NonPositiveBodyRadius(self.body.radius_m));
        }
        if self.body.mu_m3_s2 <= 0.0 {
            return Err(ValidationError::NonPositiveMu(self.body.mu_m3_s2));
        }
        if self.orbits.is_empty() {
            return Err(ValidationError::NoOrbits);
        }
        if self.launch_sites.is_empty() {
            return Err(ValidationError::NoLaunchSites);
        }
        for orbit in &self.orbits {
            if orbit.radius_m <= self.body.radius_m {
                return Err(ValidationError::OrbitBelowSurface {
                    radius_m: orbit.radius_m,
                    body_radius_m: self.body.radius_m,
                });
            }
        }
        if self.vehicle.fuel_kg > self.vehicle.fuel_capacity_kg {
            return Err(ValidationError::FuelExceedsCapacity {
                fuel_kg: self.vehicle.fuel_kg,
                capacity_kg: self.vehicle.fuel_capacity_kg,
            });
        }
        if self.vehicle.dry_mass_kg <= 0.0 {
            return Err(ValidationError::NonPositiveDryMass(self.vehicle.dry_mass_kg));
        }
        if self.vehicle.isp_seconds <= 0.0 {
            return Err(ValidationError::NonPositiveIsp(self.vehicle.isp_seconds));
        }
        match &self.policy {
            MissionPolicy::Greedy(policy) => {
                if let Some(depot) = policy.depot_radius_m {
                    if depot <= self.body.radius_m {
                        return Err(ValidationError::ParkingBelowSurface {
                            radius_m: depot,
                            body_radius_m: self.body.radius_m,
                        });
                    }
                }
            }
            MissionPolicy::Shuttle(policy) => {
                if policy.parking_radius_m <= self.body.radius_m {
                    return Err(ValidationError::ParkingBelowSurface {
                        radius_m: policy.parking_radius_m,
                        body_radius_m: self.body.radius_m,
                    });
                }
            }
            MissionPolicy::Sequential(_) => {}
        }
        Ok(())
    }

    /// Total satellite count across all orbits.
    pub fn total_satellites(&self) -> usize {
        self.orbits.iter().map(|o| o.satellites.len()).sum()
    }

    /// Global index of a satellite, stable across the scenario lifetime.
    /// Used as the subject id in event logs.
    pub fn satellite_index(&self, orbit_idx: usize, sat_idx: usize) -> usize {
        self.orbits[..orbit_idx]
            .iter()
            .map(|o| o.satellites.len())
            .sum::<usize>()
            + sat_idx
    }
}
