use refuel_mission_planner::config::scenario_from_yaml;
use refuel_mission_planner::mission::scenario::MissionScenario;
use refuel_mission_planner::optimizer::{OptimizeError, optimize};

fn scenario(yaml: &str) -> MissionScenario {
    let cfg = scenario_from_yaml(yaml).unwrap();
    MissionScenario::from_config(&cfg).unwrap()
}

const MULTI_SITE_YAML: &str = r#"
body:
  radius_m: 6.371e6
  mu_m3_s2: 3.986e14
vehicle:
  name: tanker
  dry_mass_kg: 500.0
  fuel_kg: 1000.0
launch_sites:
  - angle_deg: 0.0
  - angle_deg: 90.0
  - angle_deg: 180.0
  - angle_deg: 270.0
orbits:
  - radius_m: 6.871e6
    satellites:
      - phase_deg: 0.0
        fuel_kg: 20.0
policy:
  type: sequential
"#;

#[test]
fn sweep_reports_every_candidate() {
    let report = optimize(&scenario(MULTI_SITE_YAML)).unwrap();

    assert_eq!(report.candidates.len(), 4);
    for (i, candidate) in report.candidates.iter().enumerate() {
        assert_eq!(candidate.site_index, i);
        assert!(candidate.result.is_some());
        assert!(candidate.error.is_none());
    }
    assert!(
        report
            .candidates
            .iter()
            .all(|c| report.best_score <= c.score)
    );
}

#[test]
fn ties_break_toward_the_first_site() {
    // Coplanar circular model: all sites cost the same, so the winner must
    // be the first one seen.
    let report = optimize(&scenario(MULTI_SITE_YAML)).unwrap();
    assert_eq!(report.best_site, 0);
}

#[test]
fn sweep_is_deterministic_across_runs() {
    let scenario = scenario(MULTI_SITE_YAML);
    let a = optimize(&scenario).unwrap();
    let b = optimize(&scenario).unwrap();

    assert_eq!(a.best_site, b.best_site);
    assert_eq!(a.best_score.to_bits(), b.best_score.to_bits());
    for (ca, cb) in a.candidates.iter().zip(&b.candidates) {
        assert_eq!(ca.score.to_bits(), cb.score.to_bits());
    }
}

#[test]
fn fuel_objective_scores_fuel() {
    let report = optimize(&scenario(MULTI_SITE_YAML)).unwrap();
    assert_eq!(
        report.best_score,
        report.best_result.total_fuel_consumed_kg
    );
}

#[test]
fn time_objective_scores_duration() {
    let yaml = format!("{MULTI_SITE_YAML}objective: time\n");
    let report = optimize(&scenario(&yaml)).unwrap();
    assert_eq!(report.best_score, report.best_result.duration_s);
}

#[test]
fn partial_missions_score_infinity_but_still_report() {
    let yaml = MULTI_SITE_YAML.replace("fuel_kg: 1000.0", "fuel_kg: 50.0");
    let report = optimize(&scenario(&yaml)).unwrap();

    assert!(report.best_score.is_infinite());
    assert!(!report.best_result.success);
    // The best attempt's logs are still there for inspection.
    assert!(!report.best_result.events.is_empty());
}

#[test]
fn all_failing_candidates_get_their_own_error() {
    // Bypass manifest validation so every simulation errors instead of
    // merely scoring infinity.
    let mut scenario = scenario(MULTI_SITE_YAML);
    scenario.body.mu_m3_s2 = -1.0;
    assert!(matches!(
        optimize(&scenario),
        Err(OptimizeError::AllCandidatesFailed)
    ));
}

#[test]
fn empty_candidate_set_is_an_error() {
    // Bypass manifest validation to hit the optimizer's own guard.
    let mut scenario = scenario(MULTI_SITE_YAML);
    scenario.launch_sites.clear();
    assert!(matches!(
        optimize(&scenario),
        Err(OptimizeError::NoCandidates)
    ));
}
