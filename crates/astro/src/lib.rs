//! Analytic two-body primitives for coplanar circular orbits.
//!
//! Everything here is a pure function of its inputs: velocities, the
//! classical two-burn Hohmann transfer, and a sampled transfer ellipse for
//! renderers. Fuel accounting is deliberately somewhere else; a burn that
//! cannot be completed is a propulsion concern, not an orbital one.

use refuel_core::point::Point2;
use thiserror::Error;

/// Domain errors for the closed-form primitives.
///
/// These abort planning before any simulation begins; they are never
/// produced by a validated scenario.
#[derive(Debug, Error)]
pub enum AstroError {
    #[error("orbit radius must be positive, got {0} m")]
    NonPositiveRadius(f64),
    #[error("gravitational parameter must be positive, got {0} m^3/s^2")]
    NonPositiveMu(f64),
}

/// Result for a Hohmann transfer between circular, coplanar orbits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HohmannTransfer {
    /// Departure burn at r1 (signed: negative for inward transfers).
    pub dv_depart_m_s: f64,
    /// Insertion burn at r2 (signed: negative for inward capture).
    pub dv_insert_m_s: f64,
    /// |dv1| + |dv2|.
    pub dv_total_m_s: f64,
    /// Half-period of the transfer ellipse.
    pub tof_s: f64,
}

fn check_radius(r: f64) -> Result<(), AstroError> {
    if r > 0.0 {
        Ok(())
    } else {
        Err(AstroError::NonPositiveRadius(r))
    }
}

fn check_mu(mu: f64) -> Result<(), AstroError> {
    if mu > 0.0 {
        Ok(())
    } else {
        Err(AstroError::NonPositiveMu(mu))
    }
}

/// Circular orbit speed `sqrt(mu / r)` in m/s.
pub fn circular_velocity(r_m: f64, mu_m3_s2: f64) -> Result<f64, AstroError> {
    check_radius(r_m)?;
    check_mu(mu_m3_s2)?;
    Ok((mu_m3_s2 / r_m).sqrt())
}

/// Circular orbit angular velocity `sqrt(mu / r^3)` in rad/s.
pub fn angular_velocity(r_m: f64, mu_m3_s2: f64) -> Result<f64, AstroError> {
    check_radius(r_m)?;
    check_mu(mu_m3_s2)?;
    Ok((mu_m3_s2 / r_m.powi(3)).sqrt())
}

/// Compute the classical Hohmann transfer between two circular coplanar
/// orbits of radii `r1_m` and `r2_m` around a body with parameter `mu`.
///
/// Side-effect free: the caller applies the two burns to a fuel tank one at
/// a time, because a low-fuel vehicle may only manage the first.
pub fn hohmann(r1_m: f64, r2_m: f64, mu_m3_s2: f64) -> Result<HohmannTransfer, AstroError> {
    check_radius(r1_m)?;
    check_radius(r2_m)?;
    check_mu(mu_m3_s2)?;

    let v1 = (mu_m3_s2 / r1_m).sqrt();
    let v2 = (mu_m3_s2 / r2_m).sqrt();
    let a_t = 0.5 * (r1_m + r2_m);

    // Transfer periapsis speed (at r1) and apoapsis speed (at r2). The
    // vis-viva argument 2/r - 1/a is positive for both endpoints of the
    // transfer ellipse, so the square roots are always defined here.
    let v_t1 = (mu_m3_s2 * (2.0 / r1_m - 1.0 / a_t)).sqrt();
    let v_t2 = (mu_m3_s2 * (2.0 / r2_m - 1.0 / a_t)).sqrt();

    let dv1 = v_t1 - v1;
    let dv2 = v2 - v_t2;

    Ok(HohmannTransfer {
        dv_depart_m_s: dv1,
        dv_insert_m_s: dv2,
        dv_total_m_s: dv1.abs() + dv2.abs(),
        tof_s: std::f64::consts::PI * (a_t.powi(3) / mu_m3_s2).sqrt(),
    })
}

/// Time of flight of the half transfer ellipse, `pi * sqrt(a^3 / mu)`.
pub fn transfer_time(r1_m: f64, r2_m: f64, mu_m3_s2: f64) -> Result<f64, AstroError> {
    check_radius(r1_m)?;
    check_radius(r2_m)?;
    check_mu(mu_m3_s2)?;
    let a_t = 0.5 * (r1_m + r2_m);
    Ok(std::f64::consts::PI * (a_t.powi(3) / mu_m3_s2).sqrt())
}

/// Sample the transfer ellipse in polar form for rendering.
///
/// Uses the signed eccentricity (r2 - r1) / (r1 + r2) so the sampled path
/// starts at `r1_m` and ends at `r2_m` for inward as well as outward
/// transfers. Returns `steps + 1` Cartesian points rotated by `start_angle`.
pub fn transfer_trajectory(
    r1_m: f64,
    r2_m: f64,
    start_angle_rad: f64,
    mu_m3_s2: f64,
    steps: usize,
) -> Result<Vec<Point2>, AstroError> {
    check_radius(r1_m)?;
    check_radius(r2_m)?;
    check_mu(mu_m3_s2)?;

    let a = 0.5 * (r1_m + r2_m);
    let e_signed = (r2_m - r1_m) / (r1_m + r2_m);
    let p = a * (1.0 - e_signed * e_signed);

    let steps = steps.max(1);
    let mut points = Vec::with_capacity(steps + 1);
    for i in 0..=steps {
        let theta = i as f64 * std::f64::consts::PI / steps as f64;
        let r = p / (1.0 + e_signed * theta.cos());
        points.push([
            r * (theta + start_angle_rad).cos(),
            r * (theta + start_angle_rad).sin(),
        ]);
    }
    Ok(points)
}
