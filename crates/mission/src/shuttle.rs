//! Shuttle relay policy: the tanker parks once and a deployable shuttle
//! flies the per-satellite round trips.
//!
//! The shuttle carries its own tank and dry mass but burns through the
//! parent vehicle's thruster rating. While a sortie is out, the parked
//! vehicle coasts and pays a station-keeping fuel rate for the wait.

use log::debug;
use refuel_core::angles;
use refuel_propulsion::{FuelTank, burn};

use crate::MissionError;
use crate::legs::transfer_leg;
use crate::result::{LegKind, LegReport, MissionResult};
use crate::scenario::{MissionScenario, ShuttlePolicy};
use crate::state::{BURN_TOLERANCE_M_S, KinematicBody, Shuttle, Vehicle};

/// Fly one two-burn shuttle sortie from its current radius to `r_to_m`.
///
/// Mirrors the vehicle leg executor but draws on the shuttle's tank with the
/// parent's thruster. The sortie arc lands in the shuttle's own trajectory.
fn sortie_leg(
    shuttle: &mut Shuttle,
    thruster: &refuel_propulsion::Thruster,
    mu_m3_s2: f64,
    r_to_m: f64,
    steps: usize,
    clock_s: &mut f64,
) -> Result<LegReport, MissionError> {
    let r_from_m = shuttle.body.radius_m;
    let xfer = refuel_astro::hohmann(r_from_m, r_to_m, mu_m3_s2)?;

    let depart = burn(
        &mut shuttle.tank,
        thruster,
        shuttle.dry_mass_kg,
        xfer.dv_depart_m_s.abs(),
    );
    if !depart.is_complete(BURN_TOLERANCE_M_S) {
        return Ok(LegReport {
            kind: LegKind::ShuttleSortie,
            from_radius_m: r_from_m,
            to_radius_m: r_to_m,
            dv_requested_m_s: xfer.dv_total_m_s,
            dv_achieved_m_s: depart.achieved_m_s,
            fuel_consumed_kg: depart.fuel_consumed_kg,
            duration_s: 0.0,
            completed: false,
        });
    }

    let start_angle = shuttle.body.angle_rad;
    let arc = refuel_astro::transfer_trajectory(r_from_m, r_to_m, start_angle, mu_m3_s2, steps)?;
    let dt = xfer.tof_s / steps.max(1) as f64;
    for (i, p) in arc.iter().enumerate().skip(1) {
        shuttle.body.record_point(*clock_s + i as f64 * dt, *p);
    }
    *clock_s += xfer.tof_s;

    let insert = burn(
        &mut shuttle.tank,
        thruster,
        shuttle.dry_mass_kg,
        xfer.dv_insert_m_s.abs(),
    );
    let completed = insert.is_complete(BURN_TOLERANCE_M_S);

    shuttle.body.angle_rad = angles::normalize(start_angle + std::f64::consts::PI);
    shuttle.body.insert_into_orbit(r_to_m, mu_m3_s2)?;

    Ok(LegReport {
        kind: LegKind::ShuttleSortie,
        from_radius_m: r_from_m,
        to_radius_m: r_to_m,
        dv_requested_m_s: xfer.dv_total_m_s,
        dv_achieved_m_s: depart.achieved_m_s + insert.achieved_m_s,
        fuel_consumed_kg: depart.fuel_consumed_kg + insert.fuel_consumed_kg,
        duration_s: xfer.tof_s,
        completed,
    })
}

/// Coast the parked vehicle through a wait, paying station-keeping fuel.
fn keep_station(vehicle: &mut Vehicle, policy: &ShuttlePolicy, dt_s: f64, clock_s: f64) {
    let demand = policy.station_keeping_kg_per_s * dt_s;
    let drawn = vehicle.tank.withdraw(demand);
    if drawn + 1.0e-9 < demand {
        vehicle.log_event(clock_s, None, "station-keeping propellant exhausted");
    }
    vehicle.body.advance(dt_s);
    vehicle.body.record(clock_s);
}

/// Fly the shuttle relay mission from one launch site.
pub fn fly_shuttle(
    scenario: &MissionScenario,
    site_index: usize,
    policy: &ShuttlePolicy,
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

    let launch = transfer_leg(
        &mut vehicle,
        mu,
        policy.parking_radius_m,
        LegKind::Launch,
        policy.trajectory_steps,
        &mut clock,
    )?;
    let launched = launch.completed;
    legs.push(launch);
    if !launched {
        return Ok(MissionResult::from_run(
            legs, vehicle, initial_fuel, 0.0, 0, total_sats, clock, false,
        ));
    }
    vehicle.log_event(clock, None, "parked in relay orbit");
    debug!(
        "shuttle relay from site {site_index}: parked at {:.0} m with {:.1} kg",
        policy.parking_radius_m, vehicle.tank.fuel_kg
    );

    let mut shuttle = Shuttle {
        body: KinematicBody::at(vehicle.body.radius_m, vehicle.body.angle_rad),
        tank: FuelTank {
            fuel_kg: policy.shuttle_fuel_kg,
            capacity_kg: policy.shuttle_fuel_kg,
        },
        dry_mass_kg: policy.shuttle_dry_mass_kg,
        deployed: false,
        collected: false,
    };
    shuttle.body.insert_into_orbit(vehicle.body.radius_m, mu)?;

    let mut aborted = false;
    'orbits: for (orbit_idx, orbit) in scenario.orbits.iter().enumerate() {
        for sat_idx in 0..orbit.satellites.len() {
            if clock > policy.max_mission_time_s {
                vehicle.log_event(clock, None, "mission time budget exceeded");
                aborted = true;
                break 'orbits;
            }
            let global = scenario.satellite_index(orbit_idx, sat_idx);

            // The shuttle inherits the parked vehicle's state on deployment.
            shuttle.deployed = true;
            shuttle.collected = false;
            shuttle.body.angle_rad = vehicle.body.angle_rad;
            shuttle.body.record(clock);
            vehicle.log_event(clock, Some(global), "deployed shuttle");

            let thruster = vehicle.thruster;
            let out = sortie_leg(
                &mut shuttle,
                &thruster,
                mu,
                orbit.radius_m,
                policy.trajectory_steps,
                &mut clock,
            )?;
            keep_station(&mut vehicle, policy, out.duration_s, clock);
            let out_ok = out.completed;
            legs.push(out);
            if !out_ok {
                vehicle.log_event(clock, Some(global), "shuttle stranded en route, mission over");
                aborted = true;
                break 'orbits;
            }
            let sat = &orbit.satellites[sat_idx];
            vehicle.log_event(
                clock,
                Some(global),
                format!(
                    "shuttle docked and refueled satellite at phase {:.3} rad",
                    sat.angle_at(clock)
                ),
            );
            serviced += 1;

            clock += policy.refuel_time_s;
            shuttle.body.advance(policy.refuel_time_s);
            keep_station(&mut vehicle, policy, policy.refuel_time_s, clock);

            let back = sortie_leg(
                &mut shuttle,
                &thruster,
                mu,
                policy.parking_radius_m,
                policy.trajectory_steps,
                &mut clock,
            )?;
            keep_station(&mut vehicle, policy, back.duration_s, clock);
            let back_ok = back.completed;
            legs.push(back);
            if !back_ok {
                vehicle.log_event(
                    clock,
                    Some(global),
                    "shuttle failed rendezvous burn, mission over",
                );
                aborted = true;
                break 'orbits;
            }

            shuttle.deployed = false;
            shuttle.collected = true;
            vehicle.log_event(clock, Some(global), "recollected shuttle");
        }
    }

    if !aborted {
        let ret = transfer_leg(
            &mut vehicle,
            mu,
            scenario.body.radius_m,
            LegKind::Return,
            policy.trajectory_steps,
            &mut clock,
        )?;
        let done = ret.completed;
        legs.push(ret);
        if done {
            vehicle.log_event(clock, None, "returned to surface");
        } else {
            aborted = true;
        }
    }

    vehicle.shuttles.push(shuttle);
    let success = !aborted && serviced == total_sats;
    Ok(MissionResult::from_run(
        legs,
        vehicle,
        initial_fuel,
        policy.shuttle_fuel_kg,
        serviced,
        total_sats,
        clock,
        success,
    ))
}
