//! Shared two-burn transfer leg executor.

use refuel_core::angles;

use crate::MissionError;
use crate::result::{LegKind, LegReport};
use crate::state::{BURN_TOLERANCE_M_S, Vehicle};

/// Fly a two-burn Hohmann leg from the vehicle's current radius to `r_to_m`.
///
/// Burn one is committed first; if the tank cannot deliver it in full the
/// leg aborts before burn two and the report comes back incomplete. The
/// transfer arc is traced into the vehicle's trajectory log with timestamps
/// interpolated across the time of flight, and `clock_s` is advanced by it.
pub(crate) fn transfer_leg(
    vehicle: &mut Vehicle,
    mu_m3_s2: f64,
    r_to_m: f64,
    kind: LegKind,
    steps: usize,
    clock_s: &mut f64,
) -> Result<LegReport, MissionError> {
    let r_from_m = vehicle.body.radius_m;
    let xfer = refuel_astro::hohmann(r_from_m, r_to_m, mu_m3_s2)?;

    let depart = vehicle.burn(xfer.dv_depart_m_s.abs());
    if !depart.is_complete(BURN_TOLERANCE_M_S) {
        vehicle.log_event(
            *clock_s,
            None,
            "departure burn starved of propellant, leg aborted",
        );
        return Ok(LegReport {
            kind,
            from_radius_m: r_from_m,
            to_radius_m: r_to_m,
            dv_requested_m_s: xfer.dv_total_m_s,
            dv_achieved_m_s: depart.achieved_m_s,
            fuel_consumed_kg: depart.fuel_consumed_kg,
            duration_s: 0.0,
            completed: false,
        });
    }

    let start_angle = vehicle.body.angle_rad;
    let arc = refuel_astro::transfer_trajectory(r_from_m, r_to_m, start_angle, mu_m3_s2, steps)?;
    let dt = xfer.tof_s / steps.max(1) as f64;
    for (i, p) in arc.iter().enumerate().skip(1) {
        vehicle.body.record_point(*clock_s + i as f64 * dt, *p);
    }
    *clock_s += xfer.tof_s;

    let insert = vehicle.burn(xfer.dv_insert_m_s.abs());
    let completed = insert.is_complete(BURN_TOLERANCE_M_S);

    // Half a revolution along the transfer ellipse.
    vehicle.body.angle_rad = angles::normalize(start_angle + std::f64::consts::PI);
    vehicle.body.insert_into_orbit(r_to_m, mu_m3_s2)?;

    if !completed {
        vehicle.log_event(
            *clock_s,
            None,
            "insertion burn starved of propellant, leg aborted",
        );
    }

    Ok(LegReport {
        kind,
        from_radius_m: r_from_m,
        to_radius_m: r_to_m,
        dv_requested_m_s: xfer.dv_total_m_s,
        dv_achieved_m_s: depart.achieved_m_s + insert.achieved_m_s,
        fuel_consumed_kg: depart.fuel_consumed_kg + insert.fuel_consumed_kg,
        duration_s: xfer.tof_s,
        completed,
    })
}
