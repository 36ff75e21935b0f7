use refuel_mission_planner::astro::{
    circular_velocity, hohmann, transfer_time, transfer_trajectory,
};
use refuel_mission_planner::core::point::norm;

const MU_EARTH: f64 = 3.986e14; // m^3 / s^2
const R_LEO: f64 = 6.871e6; // m
const R_HIGH: f64 = 8.371e6; // m

#[test]
fn circular_velocity_leo_reasonable() {
    let v = circular_velocity(R_LEO, MU_EARTH).unwrap();
    // ~7.6 km/s for a 500 km orbit
    assert!((v - 7616.0).abs() < 5.0, "v = {}", v);
}

#[test]
fn hohmann_symmetry_and_time_match() {
    let up = hohmann(R_LEO, R_HIGH, MU_EARTH).unwrap();
    let down = hohmann(R_HIGH, R_LEO, MU_EARTH).unwrap();

    // Total dv symmetric under exchange of r1 and r2
    assert!((up.dv_total_m_s - down.dv_total_m_s).abs() < 1e-9);
    // Time of flight equal in both directions
    assert!((up.tof_s - down.tof_s).abs() < 1e-6);
    assert!((up.tof_s - transfer_time(R_LEO, R_HIGH, MU_EARTH).unwrap()).abs() < 1e-9);

    // Outward transfer burns prograde, inward retrograde
    assert!(up.dv_depart_m_s > 0.0 && up.dv_insert_m_s > 0.0);
    assert!(down.dv_depart_m_s < 0.0 && down.dv_insert_m_s < 0.0);
}

#[test]
fn hohmann_positive_for_any_ordered_pair() {
    for (r1, r2) in [(6.5e6, 7.0e6), (7.0e6, 4.2e7), (1.0e7, 1.0001e7)] {
        let h = hohmann(r1, r2, MU_EARTH).unwrap();
        assert!(h.dv_total_m_s > 0.0);
        assert!(h.tof_s > 0.0);
    }
}

#[test]
fn hohmann_rejects_bad_domain() {
    assert!(hohmann(-1.0, R_HIGH, MU_EARTH).is_err());
    assert!(hohmann(R_LEO, 0.0, MU_EARTH).is_err());
    assert!(hohmann(R_LEO, R_HIGH, -5.0).is_err());
    assert!(circular_velocity(0.0, MU_EARTH).is_err());
}

#[test]
fn trajectory_endpoints_match_orbits() {
    let steps = 64;
    let arc = transfer_trajectory(R_LEO, R_HIGH, 0.3, MU_EARTH, steps).unwrap();
    assert_eq!(arc.len(), steps + 1);

    let r_first = norm(&arc[0]);
    let r_last = norm(&arc[steps]);
    assert!((r_first - R_LEO).abs() < 1.0, "r_first = {}", r_first);
    assert!((r_last - R_HIGH).abs() < 1.0, "r_last = {}", r_last);
}

#[test]
fn trajectory_inward_starts_at_departure_radius() {
    // Sampling must start at r1 for descending transfers too.
    let arc = transfer_trajectory(R_HIGH, R_LEO, 0.0, MU_EARTH, 32).unwrap();
    let r_first = norm(&arc[0]);
    let r_last = norm(&arc[32]);
    assert!((r_first - R_HIGH).abs() < 1.0, "r_first = {}", r_first);
    assert!((r_last - R_LEO).abs() < 1.0, "r_last = {}", r_last);
}

#[test]
fn trajectory_is_pure() {
    let a = transfer_trajectory(R_LEO, R_HIGH, 1.0, MU_EARTH, 16).unwrap();
    let b = transfer_trajectory(R_LEO, R_HIGH, 1.0, MU_EARTH, 16).unwrap();
    assert_eq!(a, b);
}
