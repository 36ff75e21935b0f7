//! Greedy value-ranked, cluster-aware servicing policy.
//!
//! Used when many scattered satellites need individual visits and fuel is
//! scarce: satellites are grouped by (radius, inclination) proximity, each
//! cluster is sequenced by a need-per-fuel value metric, and clusters are
//! admitted in order of satellites serviced per kilogram of propellant until
//! the budget runs out. Servicing everything is not guaranteed; the result
//! reports how far the vehicle got.

use log::debug;
use refuel_propulsion::fuel_for_delta_v;

use crate::MissionError;
use crate::legs::transfer_leg;
use crate::result::{LegKind, LegReport, MissionResult};
use crate::scenario::{GreedyPolicy, MissionScenario};
use crate::state::Vehicle;

/// Satellite flattened out of the orbit list for planning.
#[derive(Debug, Clone, Copy)]
struct SatTarget {
    global: usize,
    radius_m: f64,
    inclination_rad: f64,
    fuel_need: f64,
}

/// Planned visiting order and estimated cost for one cluster.
#[derive(Debug, Clone)]
struct ClusterPlan {
    sequence: Vec<SatTarget>,
    cost_kg: f64,
}

/// Group satellites whose orbits are close in radius and inclination.
/// Membership is tested against the cluster's first member.
fn cluster_targets(targets: &[SatTarget], policy: &GreedyPolicy) -> Vec<Vec<SatTarget>> {
    let mut clusters: Vec<Vec<SatTarget>> = Vec::new();
    for sat in targets {
        let home = clusters.iter_mut().find(|members| {
            let first = members[0];
            (first.radius_m - sat.radius_m).abs() < policy.epsilon_m
                && (first.inclination_rad - sat.inclination_rad).abs()
                    < policy.inclination_tolerance_rad
        });
        match home {
            Some(members) => members.push(*sat),
            None => clusters.push(vec![*sat]),
        }
    }
    clusters
}

/// Sequence one cluster with the value-ranked greedy pick.
///
/// A satellite qualifies only while the round trip back to the depot fits
/// within the fuel margin; the value metric prefers emptier satellites that
/// are cheap to reach, with ties broken by iteration order.
fn plan_cluster(
    cluster: &[SatTarget],
    depot_radius_m: f64,
    planning_fuel_kg: f64,
    scenario: &MissionScenario,
    policy: &GreedyPolicy,
) -> Result<ClusterPlan, MissionError> {
    let mu = scenario.body.mu_m3_s2;
    let dry = scenario.vehicle.dry_mass_kg;
    let thruster = refuel_propulsion::Thruster {
        isp_seconds: scenario.vehicle.isp_seconds,
    };

    let mut remaining: Vec<SatTarget> = cluster.to_vec();
    let mut sequence: Vec<SatTarget> = Vec::new();
    let mut fuel = planning_fuel_kg;
    let mut r_cur = depot_radius_m;

    loop {
        let mut best: Option<(usize, f64)> = None;
        let mut best_value = f64::NEG_INFINITY;
        for (idx, sat) in remaining.iter().enumerate() {
            let dv_out = refuel_astro::hohmann(r_cur, sat.radius_m, mu)?.dv_total_m_s;
            let fuel_out = fuel_for_delta_v(dry, fuel, &thruster, dv_out);
            let dv_back = refuel_astro::hohmann(sat.radius_m, depot_radius_m, mu)?.dv_total_m_s;
            let fuel_back = fuel_for_delta_v(dry, fuel, &thruster, dv_back);
            if (fuel_out + fuel_back) * policy.fuel_margin > fuel {
                continue;
            }
            if fuel_out >= fuel {
                continue;
            }
            let value = sat.fuel_need / (fuel_out + 1.0);
            if value > best_value {
                best_value = value;
                best = Some((idx, fuel_out));
            }
        }

        let Some((idx, fuel_out)) = best else { break };
        let sat = remaining.remove(idx);
        fuel -= fuel_out + policy.service_fuel_kg;
        r_cur = sat.radius_m;
        sequence.push(sat);
    }

    // Re-walk the chosen order to estimate the full cost including the
    // return to the depot.
    let mut cost = 0.0;
    let mut fuel = planning_fuel_kg;
    let mut r_cur = depot_radius_m;
    for sat in &sequence {
        let dv = refuel_astro::hohmann(r_cur, sat.radius_m, mu)?.dv_total_m_s;
        let leg_fuel = fuel_for_delta_v(dry, fuel, &thruster, dv) + policy.service_fuel_kg;
        cost += leg_fuel;
        fuel -= leg_fuel;
        r_cur = sat.radius_m;
    }
    if !sequence.is_empty() {
        let dv_back = refuel_astro::hohmann(r_cur, depot_radius_m, mu)?.dv_total_m_s;
        cost += fuel_for_delta_v(dry, fuel, &thruster, dv_back);
    }

    Ok(ClusterPlan {
        sequence,
        cost_kg: cost,
    })
}

/// Fly the greedy servicing mission from one launch site.
pub fn fly_greedy(
    scenario: &MissionScenario,
    site_index: usize,
    policy: &GreedyPolicy,
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
    let depot_radius_m = policy.depot_radius_m.unwrap_or_else(|| {
        scenario
            .orbits
            .iter()
            .map(|o| o.radius_m)
            .fold(f64::INFINITY, f64::min)
    });

    let mut targets: Vec<SatTarget> = Vec::with_capacity(total_sats);
    for (orbit_idx, orbit) in scenario.orbits.iter().enumerate() {
        for (sat_idx, sat) in orbit.satellites.iter().enumerate() {
            targets.push(SatTarget {
                global: scenario.satellite_index(orbit_idx, sat_idx),
                radius_m: orbit.radius_m,
                inclination_rad: orbit.inclination_rad,
                fuel_need: sat.fuel_need(),
            });
        }
    }

    let mut vehicle = Vehicle::at_site(&scenario.vehicle, site, &scenario.body);
    let mut clock = 0.0;
    let mut legs: Vec<LegReport> = Vec::new();
    let mut serviced = 0usize;

    vehicle.body.record(clock);
    vehicle.log_event(clock, None, format!("liftoff from launch site {site_index}"));

    let launch = transfer_leg(
        &mut vehicle,
        mu,
        depot_radius_m,
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
    vehicle.log_event(clock, None, "parked at servicing depot radius");
    debug!(
        "depot reached with tank at {:.0}%",
        vehicle.tank.fill_fraction() * 100.0
    );

    // Plan every cluster against the post-launch fuel state, then admit the
    // best satellites-per-kilogram clusters while the budget lasts.
    let clusters = cluster_targets(&targets, policy);
    debug!(
        "greedy run from site {site_index}: {} satellites in {} clusters",
        targets.len(),
        clusters.len()
    );

    let mut plans: Vec<ClusterPlan> = Vec::new();
    for cluster in &clusters {
        let plan = plan_cluster(cluster, depot_radius_m, vehicle.tank.fuel_kg, scenario, policy)?;
        if !plan.sequence.is_empty() {
            plans.push(plan);
        }
    }
    plans.sort_by(|a, b| {
        let va = a.sequence.len() as f64 / a.cost_kg.max(f64::MIN_POSITIVE);
        let vb = b.sequence.len() as f64 / b.cost_kg.max(f64::MIN_POSITIVE);
        vb.total_cmp(&va)
    });

    let mut itinerary: Vec<SatTarget> = Vec::new();
    let mut budget = vehicle.tank.fuel_kg;
    for plan in plans {
        if plan.cost_kg > budget {
            continue;
        }
        budget -= plan.cost_kg;
        itinerary.extend(plan.sequence);
    }

    let mut aborted = false;
    for sat in &itinerary {
        let leg = transfer_leg(
            &mut vehicle,
            mu,
            sat.radius_m,
            LegKind::Transfer,
            policy.trajectory_steps,
            &mut clock,
        )?;
        let completed = leg.completed;
        legs.push(leg);
        if !completed {
            aborted = true;
            break;
        }
        let drawn = vehicle.tank.withdraw(policy.service_fuel_kg);
        if drawn + 1.0e-9 < policy.service_fuel_kg {
            vehicle.log_event(
                clock,
                Some(sat.global),
                "propellant exhausted during servicing",
            );
            aborted = true;
            break;
        }
        vehicle.log_event(clock, Some(sat.global), "docked and refueled satellite");
        serviced += 1;

        if clock > policy.max_mission_time_s {
            vehicle.log_event(clock, None, "mission time budget exceeded");
            aborted = true;
            break;
        }
    }

    if !aborted {
        if vehicle.body.radius_m != depot_radius_m {
            let leg = transfer_leg(
                &mut vehicle,
                mu,
                depot_radius_m,
                LegKind::Transfer,
                policy.trajectory_steps,
                &mut clock,
            )?;
            aborted = !leg.completed;
            legs.push(leg);
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
