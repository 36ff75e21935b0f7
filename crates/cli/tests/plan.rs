use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn config_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../configs")
        .join(name)
}

#[test]
fn plan_prints_a_mission_summary() {
    Command::cargo_bin("plan")
        .expect("plan bin")
        .arg(config_path("leo_roundtrip.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Mission Summary ==="))
        .stdout(predicate::str::contains("Best launch site : 0"))
        .stdout(predicate::str::contains(
            "success (2/2 satellites serviced)",
        ));
}

#[test]
fn plan_prints_the_event_log_on_request() {
    Command::cargo_bin("plan")
        .expect("plan bin")
        .arg(config_path("leo_roundtrip.yaml"))
        .arg("--events")
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Event Log ==="))
        .stdout(predicate::str::contains("liftoff"))
        .stdout(predicate::str::contains("returned to surface"));
}

#[test]
fn plan_writes_csv_and_json_exports() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("trajectory.csv");
    let json_path = dir.path().join("report.json");

    Command::cargo_bin("plan")
        .expect("plan bin")
        .arg(config_path("leo_roundtrip.yaml"))
        .arg("--trajectory-csv")
        .arg(&csv_path)
        .arg("--report-json")
        .arg(&json_path)
        .assert()
        .success();

    let csv = fs::read_to_string(&csv_path).expect("trajectory csv");
    assert!(csv.starts_with("craft,time_s,x_m,y_m"));

    let json = fs::read_to_string(&json_path).expect("report json");
    assert!(json.contains("\"best_site\": 0"));
    assert!(json.contains("\"candidates\""));
}

#[test]
fn plan_fails_on_a_missing_manifest() {
    Command::cargo_bin("plan")
        .expect("plan bin")
        .arg(config_path("no_such_scenario.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("rror"));
}
