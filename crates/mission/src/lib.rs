//! Mission simulation: scenario types, vehicle state, and the sequencing
//! policies that turn a validated scenario into a [`result::MissionResult`].

pub mod greedy;
pub mod result;
pub mod scenario;
pub mod sequential;
pub mod shuttle;
pub mod state;

mod legs;

use refuel_astro::AstroError;

use crate::result::MissionResult;
use crate::scenario::{MissionPolicy, MissionScenario};

/// Errors raised while flying a mission.
///
/// Fuel exhaustion is not among them: a starved burn degrades into a partial
/// leg recorded on the [`MissionResult`] instead.
#[derive(Debug, thiserror::Error)]
pub enum MissionError {
    #[error("orbital mechanics domain error: {0}")]
    Astro(#[from] AstroError),
    #[error("launch site index {index} out of range ({count} candidates)")]
    InvalidSite { index: usize, count: usize },
}

/// Fly the scenario's configured policy from the given launch site.
///
/// Constructs a fresh vehicle for this run; repeated calls with the same
/// inputs are independent and yield identical results.
pub fn fly(scenario: &MissionScenario, site_index: usize) -> Result<MissionResult, MissionError> {
    match &scenario.policy {
        MissionPolicy::Sequential(policy) => {
            sequential::fly_sequential(scenario, site_index, policy)
        }
        MissionPolicy::Greedy(policy) => greedy::fly_greedy(scenario, site_index, policy),
        MissionPolicy::Shuttle(policy) => shuttle::fly_shuttle(scenario, site_index, policy),
    }
}
