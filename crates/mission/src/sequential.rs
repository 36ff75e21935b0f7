//! Sequential-by-radius policy: launch to the lowest orbit, Hohmann between
//! consecutive orbits ascending, Hohmann back to the surface at the end.

use log::debug;

use crate::MissionError;
use crate::legs::transfer_leg;
use crate::result::{LegKind, LegReport, MissionResult};
use crate::scenario::{MissionScenario, SequentialPolicy};
use crate::state::Vehicle;

/// Fly the simple multi-orbit visiting mission from one launch site.
pub fn fly_sequential(
    scenario: &MissionScenario,
    site_index: usize,
    policy: &SequentialPolicy,
) -> Result<MissionResult, MissionError> {
    let site = scenario
        .launch_sites
        .get(site_index)
        .ok_or(MissionError::InvalidSite {
            index: site_index,
            count: scenario.launch_sites.len(),
        })?;

    let mu = scenario.body.mu_m3_s2;
    let total_sats = scenario.total_satellites();
    let initial_fuel = scenario.vehicle.fuel_kg;

    let mut vehicle = Vehicle::at_site(&scenario.vehicle, site, &scenario.body);
    let mut clock = 0.0;
    let mut legs: Vec<LegReport> = Vec::new();
    let mut serviced = 0usize;

    vehicle.body.record(clock);
    vehicle.log_event(clock, None, format!("liftoff from launch site {site_index}"));

    // Visit orbits in ascending radius order.
    let mut order: Vec<usize> = (0..scenario.orbits.len()).collect();
    order.sort_by(|a, b| {
        scenario.orbits[*a]
            .radius_m
            .total_cmp(&scenario.orbits[*b].radius_m)
    });

    let mut aborted = false;
    for (visit, &orbit_idx) in order.iter().enumerate() {
        let orbit = &scenario.orbits[orbit_idx];
        let kind = if visit == 0 {
            LegKind::Launch
        } else {
            LegKind::Transfer
        };
        let leg = transfer_leg(
            &mut vehicle,
            mu,
            orbit.radius_m,
            kind,
            policy.trajectory_steps,
            &mut clock,
        )?;
        let completed = leg.completed;
        legs.push(leg);
        if !completed {
            aborted = true;
            break;
        }
        vehicle.log_event(
            clock,
            None,
            format!("circularized at {:.0} m", orbit.radius_m),
        );

        // Docking is a zero-duration, zero-cost event in this policy.
        for (sat_idx, sat) in orbit.satellites.iter().enumerate() {
            let global = scenario.satellite_index(orbit_idx, sat_idx);
            vehicle.log_event(
                clock,
                Some(global),
                format!(
                    "docked and refueled satellite at phase {:.3} rad",
                    sat.angle_at(clock)
                ),
            );
            serviced += 1;
        }

        if clock > policy.max_mission_time_s {
            vehicle.log_event(clock, None, "mission time budget exceeded");
            aborted = true;
            break;
        }
    }

    if !aborted {
        let leg = transfer_leg(
            &mut vehicle,
            mu,
            scenario.body.radius_m,
            LegKind::Return,
            policy.trajectory_steps,
            &mut clock,
        )?;
        let completed = leg.completed;
        legs.push(leg);
        if completed {
            vehicle.log_event(clock, None, "returned to surface");
        } else {
            aborted = true;
        }
    }

    let success = !aborted && serviced == total_sats;
    debug!(
        "sequential run from site {site_index}: serviced {serviced}/{total_sats}, success={success}"
    );

    Ok(MissionResult::from_run(
        legs,
        vehicle,
        initial_fuel,
        0.0,
        serviced,
        total_sats,
        clock,
        success,
    ))
}
