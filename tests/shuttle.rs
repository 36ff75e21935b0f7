use refuel_mission_planner::config::scenario_from_yaml;
use refuel_mission_planner::mission::fly;
use refuel_mission_planner::mission::result::{LegKind, MissionResult};
use refuel_mission_planner::mission::scenario::MissionScenario;

const RELAY_YAML: &str = r#"
body:
  radius_m: 6.371e6
  mu_m3_s2: 3.986e14
vehicle:
  name: tanker
  dry_mass_kg: 800.0
  fuel_kg: 1200.0
launch_sites:
  - angle_deg: 0.0
orbits:
  - radius_m: 7.2e6
    satellites:
      - phase_deg: 0.0
        fuel_kg: 40.0
      - phase_deg: 200.0
        fuel_kg: 10.0
policy:
  type: shuttle
  parking_radius_m: 7.0e6
  shuttle_dry_mass_kg: 100.0
  shuttle_fuel_kg: 150.0
"#;

fn run(yaml: &str) -> MissionResult {
    let cfg = scenario_from_yaml(yaml).unwrap();
    let scenario = MissionScenario::from_config(&cfg).unwrap();
    fly(&scenario, 0).unwrap()
}

#[test]
fn relay_services_both_satellites() {
    let result = run(RELAY_YAML);

    assert!(result.success);
    assert_eq!(result.satellites_serviced, 2);

    // Launch, two out-and-back sorties, return home.
    let kinds: Vec<LegKind> = result.legs.iter().map(|l| l.kind).collect();
    assert_eq!(
        kinds,
        vec![
            LegKind::Launch,
            LegKind::ShuttleSortie,
            LegKind::ShuttleSortie,
            LegKind::ShuttleSortie,
            LegKind::ShuttleSortie,
            LegKind::Return,
        ]
    );

    // The parked vehicle never leaves the relay orbit mid-mission.
    assert!((result.legs[0].to_radius_m - 7.0e6).abs() < 1.0);
    assert!((result.legs[5].from_radius_m - 7.0e6).abs() < 1.0);
}

#[test]
fn shuttle_keeps_its_own_trajectory() {
    let result = run(RELAY_YAML);

    assert_eq!(result.shuttle_trajectories.len(), 1);
    let sorties = &result.shuttle_trajectories[0];
    assert!(!sorties.is_empty());
    assert!(sorties.windows(2).all(|w| w[0].time_s <= w[1].time_s));

    // Vehicle trajectory stays separate and time-ordered too.
    assert!(
        result
            .trajectory
            .windows(2)
            .all(|w| w[0].time_s <= w[1].time_s)
    );
}

#[test]
fn deployment_events_bracket_each_sortie() {
    let result = run(RELAY_YAML);

    let deployed = result
        .events
        .iter()
        .filter(|e| e.description.contains("deployed shuttle"))
        .count();
    let recollected = result
        .events
        .iter()
        .filter(|e| e.description.contains("recollected shuttle"))
        .count();
    assert_eq!(deployed, 2);
    assert_eq!(recollected, 2);

    let docked: Vec<usize> = result
        .events
        .iter()
        .filter(|e| e.description.contains("docked"))
        .map(|e| e.subject.unwrap())
        .collect();
    assert_eq!(docked, vec![0, 1]);
}

#[test]
fn total_fuel_includes_shuttle_propellant() {
    let result = run(RELAY_YAML);
    let vehicle_only = 1200.0 - result.final_fuel_kg;
    assert!(
        result.total_fuel_consumed_kg > vehicle_only + 1.0,
        "total = {}, vehicle only = {}",
        result.total_fuel_consumed_kg,
        vehicle_only
    );
}

#[test]
fn station_keeping_rate_drains_the_tanker() {
    let cheap = run(RELAY_YAML);
    let pricey = run(&RELAY_YAML.replace(
        "shuttle_fuel_kg: 150.0",
        "shuttle_fuel_kg: 150.0\n  station_keeping_kg_per_s: 0.05",
    ));
    assert!(pricey.final_fuel_kg < cheap.final_fuel_kg);
    // Same sortie schedule either way.
    assert_eq!(pricey.legs.len(), cheap.legs.len());
    assert_eq!(pricey.satellites_serviced, cheap.satellites_serviced);
}

#[test]
fn undersized_shuttle_strands_and_aborts() {
    let result = run(&RELAY_YAML.replace("shuttle_fuel_kg: 150.0", "shuttle_fuel_kg: 2.0"));

    assert!(!result.success);
    assert_eq!(result.satellites_serviced, 0);
    assert!(
        result
            .events
            .iter()
            .any(|e| e.description.contains("stranded"))
    );
    // No return leg after the stranding.
    assert_ne!(result.legs.last().unwrap().kind, LegKind::Return);
}
