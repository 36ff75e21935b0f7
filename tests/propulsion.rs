use refuel_mission_planner::core::constants::G0;
use refuel_mission_planner::propulsion::{
    FuelTank, Thruster, burn, fuel_for_delta_v, max_delta_v,
};

const ISP: f64 = 300.0;

fn thruster() -> Thruster {
    Thruster { isp_seconds: ISP }
}

#[test]
fn full_burn_matches_rocket_equation() {
    let mut tank = FuelTank::full(1000.0);
    let dv = 500.0;
    let outcome = burn(&mut tank, &thruster(), 500.0, dv);

    let m0 = 1500.0;
    let expected = m0 - m0 / (dv / (ISP * G0)).exp();
    assert!(outcome.is_complete(1e-9));
    assert!((outcome.fuel_consumed_kg - expected).abs() < 1e-9);
    assert!((tank.fuel_kg - (1000.0 - expected)).abs() < 1e-9);
}

#[test]
fn starved_burn_drains_tank_and_degrades() {
    let mut tank = FuelTank::full(10.0);
    let outcome = burn(&mut tank, &thruster(), 500.0, 5000.0);

    assert!(!outcome.is_complete(1e-6));
    assert_eq!(tank.fuel_kg, 0.0);
    assert!((outcome.fuel_consumed_kg - 10.0).abs() < 1e-12);
    let expected_dv = ISP * G0 * (510.0_f64 / 500.0).ln();
    assert!((outcome.achieved_m_s - expected_dv).abs() < 1e-9);
}

#[test]
fn empty_tank_achieves_nothing() {
    let mut tank = FuelTank {
        fuel_kg: 0.0,
        capacity_kg: 100.0,
    };
    let outcome = burn(&mut tank, &thruster(), 500.0, 100.0);
    assert_eq!(outcome.achieved_m_s, 0.0);
    assert_eq!(outcome.fuel_consumed_kg, 0.0);
    assert_eq!(tank.fuel_kg, 0.0);
}

#[test]
fn zero_request_is_free() {
    let mut tank = FuelTank::full(100.0);
    let outcome = burn(&mut tank, &thruster(), 500.0, 0.0);
    assert!(outcome.is_complete(0.0));
    assert_eq!(outcome.fuel_consumed_kg, 0.0);
    assert_eq!(tank.fuel_kg, 100.0);
}

#[test]
fn planning_estimate_matches_actual_burn() {
    let mut tank = FuelTank::full(800.0);
    let estimate = fuel_for_delta_v(500.0, tank.fuel_kg, &thruster(), 350.0);
    let outcome = burn(&mut tank, &thruster(), 500.0, 350.0);
    assert!((estimate - outcome.fuel_consumed_kg).abs() < 1e-9);
}

#[test]
fn max_delta_v_bounds_every_burn() {
    let ceiling = max_delta_v(500.0, 1000.0, &thruster());
    let mut tank = FuelTank::full(1000.0);
    let outcome = burn(&mut tank, &thruster(), 500.0, ceiling + 1000.0);
    assert!((outcome.achieved_m_s - ceiling).abs() < 1e-9);
}

#[test]
fn withdraw_never_goes_negative() {
    let mut tank = FuelTank::full(7.0);
    assert_eq!(tank.withdraw(5.0), 5.0);
    assert_eq!(tank.withdraw(5.0), 2.0);
    assert_eq!(tank.fuel_kg, 0.0);
    assert_eq!(tank.withdraw(5.0), 0.0);
}
