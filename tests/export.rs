use refuel_mission_planner::config::scenario_from_yaml;
use refuel_mission_planner::export::{write_report_json, write_trajectory_csv};
use refuel_mission_planner::mission::scenario::MissionScenario;
use refuel_mission_planner::optimizer::optimize;

const YAML: &str = r#"
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
policy:
  type: shuttle
  parking_radius_m: 7.0e6
  shuttle_dry_mass_kg: 100.0
  shuttle_fuel_kg: 150.0
"#;

#[test]
fn trajectory_csv_holds_every_sample() {
    let cfg = scenario_from_yaml(YAML).unwrap();
    let scenario = MissionScenario::from_config(&cfg).unwrap();
    let report = optimize(&scenario).unwrap();
    let result = &report.best_result;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trajectory.csv");
    write_trajectory_csv(&path, result).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next().unwrap(), "craft,time_s,x_m,y_m");

    let shuttle_samples: usize = result.shuttle_trajectories.iter().map(Vec::len).sum();
    let rows = lines.count();
    assert_eq!(rows, result.trajectory.len() + shuttle_samples);
    assert!(contents.contains("shuttle_0"));
}

#[test]
fn report_json_carries_mission_and_candidates() {
    let cfg = scenario_from_yaml(YAML).unwrap();
    let scenario = MissionScenario::from_config(&cfg).unwrap();
    let report = optimize(&scenario).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    write_report_json(&path, &report).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("\"best_site\": 0"));
    assert!(contents.contains("\"satellites_serviced\": 1"));
    assert!(contents.contains("\"kind\": \"shuttle_sortie\""));
    assert!(contents.contains("\"candidates\""));
    assert!(contents.ends_with('\n'));
}

#[test]
fn exporters_create_missing_directories() {
    let cfg = scenario_from_yaml(YAML).unwrap();
    let scenario = MissionScenario::from_config(&cfg).unwrap();
    let report = optimize(&scenario).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("out").join("deep").join("trajectory.csv");
    write_trajectory_csv(&nested, &report.best_result).unwrap();
    assert!(nested.exists());
}
