//! Mission outcome: leg reports, totals, and the logs handed to renderers.

use crate::state::{MissionEvent, TrajectorySample, Vehicle};

/// What kind of leg a report describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegKind {
    Launch,
    Transfer,
    Return,
    ShuttleSortie,
}

/// One mission leg and how it went.
#[derive(Debug, Clone)]
pub struct LegReport {
    pub kind: LegKind,
    pub from_radius_m: f64,
    pub to_radius_m: f64,
    pub dv_requested_m_s: f64,
    pub dv_achieved_m_s: f64,
    pub fuel_consumed_kg: f64,
    pub duration_s: f64,
    pub completed: bool,
}

/// Result of one simulated mission run.
///
/// Partial runs keep everything accumulated up to the failure; the logs are
/// never discarded. `total_fuel_consumed_kg` includes shuttle propellant for
/// the relay policy.
#[derive(Debug, Clone)]
pub struct MissionResult {
    pub legs: Vec<LegReport>,
    pub total_delta_v_m_s: f64,
    pub total_fuel_consumed_kg: f64,
    pub final_fuel_kg: f64,
    pub duration_s: f64,
    pub success: bool,
    pub satellites_serviced: usize,
    pub satellites_total: usize,
    pub trajectory: Vec<TrajectorySample>,
    pub shuttle_trajectories: Vec<Vec<TrajectorySample>>,
    pub events: Vec<MissionEvent>,
}

impl MissionResult {
    /// Assemble the outcome from a finished (or aborted) run.
    pub(crate) fn from_run(
        legs: Vec<LegReport>,
        vehicle: Vehicle,
        initial_fuel_kg: f64,
        shuttle_initial_fuel_kg: f64,
        satellites_serviced: usize,
        satellites_total: usize,
        duration_s: f64,
        success: bool,
    ) -> Self {
        let total_delta_v_m_s = legs.iter().map(|leg| leg.dv_achieved_m_s).sum();
        let shuttle_consumed: f64 = vehicle
            .shuttles
            .iter()
            .map(|s| shuttle_initial_fuel_kg - s.tank.fuel_kg)
            .sum();
        let total_fuel_consumed_kg =
            (initial_fuel_kg - vehicle.tank.fuel_kg) + shuttle_consumed;
        Self {
            legs,
            total_delta_v_m_s,
            total_fuel_consumed_kg,
            final_fuel_kg: vehicle.tank.fuel_kg,
            duration_s,
            success,
            satellites_serviced,
            satellites_total,
            shuttle_trajectories: vehicle
                .shuttles
                .iter()
                .map(|s| s.body.trajectory.clone())
                .collect(),
            trajectory: vehicle.body.trajectory,
            events: vehicle.events,
        }
    }
}
