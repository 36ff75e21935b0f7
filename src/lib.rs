//! Orbital refueling mission planner.
//!
//! Thin facade over the workspace member crates so front-ends (CLI, future
//! GUI or web) depend on a single crate: orbital mechanics primitives,
//! rocket-equation propulsion, scenario configuration, mission simulation,
//! the launch-site optimizer, and artifact export.

pub use refuel_astro as astro;
pub use refuel_config as config;
pub use refuel_core as core;
pub use refuel_export as export;
pub use refuel_mission as mission;
pub use refuel_optimizer as optimizer;
pub use refuel_propulsion as propulsion;

/// Returns the version of the library for smoke tests while scaffolding.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
