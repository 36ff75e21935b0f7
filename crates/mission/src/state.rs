//! Vehicle and shuttle state: a composed kinematic body plus capability
//! records, with append-only trajectory and event logs.

use refuel_astro::AstroError;
use refuel_core::angles;
use refuel_core::point::{self, Point2};
use refuel_propulsion::{BurnOutcome, FuelTank, Thruster, burn};

use crate::scenario::{CentralBody, LaunchSite, VehicleSpec};

/// Tolerance for deciding whether a burn delivered the requested delta-v.
pub const BURN_TOLERANCE_M_S: f64 = 1.0e-6;

/// One time-stamped position sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySample {
    pub time_s: f64,
    pub x_m: f64,
    pub y_m: f64,
}

/// Mission event: what happened, to whom, and when.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionEvent {
    pub time_s: f64,
    /// Global satellite index where the event concerns one.
    pub subject: Option<usize>,
    pub description: String,
}

/// Position and angular state of anything circling the body.
///
/// Angular velocity is recomputed from the current radius on every orbit
/// insertion; it is never carried over from a previous orbit.
#[derive(Debug, Clone)]
pub struct KinematicBody {
    pub radius_m: f64,
    pub angle_rad: f64,
    pub angular_velocity_rad_s: f64,
    pub trajectory: Vec<TrajectorySample>,
}

impl KinematicBody {
    /// A body at rest at the given polar coordinates.
    pub fn at(radius_m: f64, angle_rad: f64) -> Self {
        Self {
            radius_m,
            angle_rad: angles::normalize(angle_rad),
            angular_velocity_rad_s: 0.0,
            trajectory: Vec::new(),
        }
    }

    /// Current planar position.
    pub fn position(&self) -> Point2 {
        point::from_polar(self.radius_m, self.angle_rad)
    }

    /// Append the current position to the trajectory log.
    pub fn record(&mut self, time_s: f64) {
        let [x, y] = self.position();
        self.trajectory.push(TrajectorySample {
            time_s,
            x_m: x,
            y_m: y,
        });
    }

    /// Append an explicit point, used while tracing transfer arcs.
    pub fn record_point(&mut self, time_s: f64, p: Point2) {
        self.trajectory.push(TrajectorySample {
            time_s,
            x_m: p[0],
            y_m: p[1],
        });
    }

    /// Circularize at a new radius, recomputing the angular velocity.
    pub fn insert_into_orbit(&mut self, radius_m: f64, mu_m3_s2: f64) -> Result<(), AstroError> {
        self.angular_velocity_rad_s = refuel_astro::angular_velocity(radius_m, mu_m3_s2)?;
        self.radius_m = radius_m;
        Ok(())
    }

    /// Coast along the current orbit for `dt_s`.
    pub fn advance(&mut self, dt_s: f64) {
        self.angle_rad = angles::normalize(self.angle_rad + self.angular_velocity_rad_s * dt_s);
    }
}

/// Sub-vehicle deployed from the tanker. Burns through the parent's
/// thruster; it has no engine rating of its own.
#[derive(Debug, Clone)]
pub struct Shuttle {
    pub body: KinematicBody,
    pub tank: FuelTank,
    pub dry_mass_kg: f64,
    pub deployed: bool,
    pub collected: bool,
}

/// The service vehicle. Exactly one per simulation run: optimizer candidates
/// each construct their own.
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub name: String,
    pub body: KinematicBody,
    pub tank: FuelTank,
    pub thruster: Thruster,
    pub dry_mass_kg: f64,
    pub events: Vec<MissionEvent>,
    pub shuttles: Vec<Shuttle>,
}

impl Vehicle {
    /// A fresh vehicle sitting on the surface at the given launch site.
    pub fn at_site(spec: &VehicleSpec, site: &LaunchSite, body: &CentralBody) -> Self {
        Self {
            name: spec.name.clone(),
            body: KinematicBody::at(body.radius_m, site.angle_rad),
            tank: FuelTank {
                fuel_kg: spec.fuel_kg,
                capacity_kg: spec.fuel_capacity_kg,
            },
            thruster: Thruster {
                isp_seconds: spec.isp_seconds,
            },
            dry_mass_kg: spec.dry_mass_kg,
            events: Vec::new(),
            shuttles: Vec::new(),
        }
    }

    /// Execute an impulsive burn against this vehicle's tank.
    pub fn burn(&mut self, requested_dv_m_s: f64) -> BurnOutcome {
        burn(
            &mut self.tank,
            &self.thruster,
            self.dry_mass_kg,
            requested_dv_m_s,
        )
    }

    /// Append an event to the mission log.
    pub fn log_event(
        &mut self,
        time_s: f64,
        subject: Option<usize>,
        description: impl Into<String>,
    ) {
        self.events.push(MissionEvent {
            time_s,
            subject,
            description: description.into(),
        });
    }
}
