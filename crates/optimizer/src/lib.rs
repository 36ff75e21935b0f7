//! Launch-site optimizer.
//!
//! Every candidate site gets its own independent simulation run with a fresh
//! vehicle, so the sweep is embarrassingly parallel. Candidates are evaluated
//! on the rayon pool and reduced sequentially in site order, which keeps the
//! first-seen tie-breaking rule deterministic regardless of thread count.

use log::{debug, warn};
use rayon::prelude::*;
use thiserror::Error;

use refuel_mission::result::MissionResult;
use refuel_mission::scenario::{MissionScenario, Objective};

/// Errors from the sweep itself, as opposed to per-candidate failures.
#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("scenario defines no launch sites to sweep")]
    NoCandidates,
    #[error("every candidate simulation failed")]
    AllCandidatesFailed,
}

/// Outcome of one candidate site.
///
/// A candidate whose simulation errored carries no result and scores
/// infinity, so it never beats a flyable one.
#[derive(Debug, Clone)]
pub struct CandidateOutcome {
    pub site_index: usize,
    pub score: f64,
    pub result: Option<MissionResult>,
    pub error: Option<String>,
}

/// The winning site plus the full candidate table for reporting.
#[derive(Debug, Clone)]
pub struct OptimizationReport {
    pub best_site: usize,
    pub best_score: f64,
    pub best_result: MissionResult,
    pub candidates: Vec<CandidateOutcome>,
}

/// Score one finished run against the objective. Unsuccessful runs score
/// infinity so partial missions never win over complete ones.
fn score(result: &MissionResult, objective: Objective) -> f64 {
    if !result.success {
        return f64::INFINITY;
    }
    match objective {
        Objective::MinimumFuel => result.total_fuel_consumed_kg,
        Objective::MinimumTime => result.duration_s,
    }
}

/// Evaluate one candidate site, isolating its failure from the sweep.
fn evaluate(scenario: &MissionScenario, site_index: usize) -> CandidateOutcome {
    match refuel_mission::fly(scenario, site_index) {
        Ok(result) => CandidateOutcome {
            site_index,
            score: score(&result, scenario.objective),
            result: Some(result),
            error: None,
        },
        Err(err) => {
            warn!("candidate site {site_index} failed: {err}");
            CandidateOutcome {
                site_index,
                score: f64::INFINITY,
                result: None,
                error: Some(err.to_string()),
            }
        }
    }
}

/// Sweep every launch site and pick the best by the scenario's objective.
///
/// Returns the winning candidate even when every run scored infinity, as
/// long as at least one produced a result: callers can inspect `success` and
/// the event log to see how far the best attempt got. Only a scenario with
/// no sites, or one where every simulation errored, is an error here.
pub fn optimize(scenario: &MissionScenario) -> Result<OptimizationReport, OptimizeError> {
    let count = scenario.launch_sites.len();
    if count == 0 {
        return Err(OptimizeError::NoCandidates);
    }
    debug!("sweeping {count} launch sites");

    let candidates: Vec<CandidateOutcome> = (0..count)
        .into_par_iter()
        .map(|site_index| evaluate(scenario, site_index))
        .collect();

    // Strict less-than keeps the earliest site on ties.
    let mut best: Option<(usize, f64, MissionResult)> = None;
    for candidate in &candidates {
        let Some(result) = &candidate.result else {
            continue;
        };
        if best.as_ref().is_none_or(|(_, s, _)| candidate.score < *s) {
            best = Some((candidate.site_index, candidate.score, result.clone()));
        }
    }
    let (best_site, best_score, best_result) = best.ok_or(OptimizeError::AllCandidatesFailed)?;

    Ok(OptimizationReport {
        best_site,
        best_score,
        best_result,
        candidates,
    })
}
