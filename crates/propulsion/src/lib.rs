//! Tsiolkovsky rocket-equation fuel accounting.
//!
//! A burn never fails: when the tank cannot supply the requested delta-v the
//! tank is drained and the maximum achievable delta-v is reported instead.
//! Callers sequencing dependent burns must check [`BurnOutcome::is_complete`]
//! before committing the next one.

use refuel_core::constants::G0;

/// Propellant tank capability record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelTank {
    pub fuel_kg: f64,
    pub capacity_kg: f64,
}

impl FuelTank {
    /// A tank filled to `fuel_kg` with the same capacity.
    pub fn full(fuel_kg: f64) -> Self {
        Self {
            fuel_kg,
            capacity_kg: fuel_kg,
        }
    }

    /// Remaining fill fraction in [0, 1].
    pub fn fill_fraction(&self) -> f64 {
        if self.capacity_kg > 0.0 {
            self.fuel_kg / self.capacity_kg
        } else {
            0.0
        }
    }

    /// Withdraw up to `amount_kg` directly (service operations, station
    /// keeping). Returns the amount actually withdrawn; the tank never goes
    /// negative.
    pub fn withdraw(&mut self, amount_kg: f64) -> f64 {
        let taken = amount_kg.min(self.fuel_kg);
        self.fuel_kg -= taken;
        taken
    }
}

/// Engine capability record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thruster {
    pub isp_seconds: f64,
}

impl Thruster {
    /// Effective exhaust velocity `Isp * g0` in m/s.
    pub fn exhaust_velocity_m_s(&self) -> f64 {
        self.isp_seconds * G0
    }
}

/// Report of a single impulsive burn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurnOutcome {
    pub requested_m_s: f64,
    pub achieved_m_s: f64,
    pub fuel_consumed_kg: f64,
}

impl BurnOutcome {
    /// Whether the burn delivered the requested delta-v within `tol_m_s`.
    pub fn is_complete(&self, tol_m_s: f64) -> bool {
        (self.requested_m_s - self.achieved_m_s).abs() <= tol_m_s
    }
}

/// Execute an impulsive burn against the tank.
///
/// `m1 = m0 / exp(dv / (Isp * g0))`; when the propellant required exceeds the
/// tank contents the tank is emptied and the achieved delta-v degrades to
/// `Isp * g0 * ln(m0 / dry)`.
pub fn burn(
    tank: &mut FuelTank,
    thruster: &Thruster,
    dry_mass_kg: f64,
    requested_dv_m_s: f64,
) -> BurnOutcome {
    assert!(requested_dv_m_s >= 0.0, "requested delta-v must be non-negative");
    assert!(dry_mass_kg > 0.0, "dry mass must be positive");

    let ve = thruster.exhaust_velocity_m_s();
    let m0 = dry_mass_kg + tank.fuel_kg;
    let m1 = m0 / (requested_dv_m_s / ve).exp();
    let fuel_needed = m0 - m1;

    if fuel_needed <= tank.fuel_kg {
        tank.fuel_kg -= fuel_needed;
        BurnOutcome {
            requested_m_s: requested_dv_m_s,
            achieved_m_s: requested_dv_m_s,
            fuel_consumed_kg: fuel_needed,
        }
    } else {
        let consumed = tank.fuel_kg;
        let max_dv = ve * (m0 / dry_mass_kg).ln();
        tank.fuel_kg = 0.0;
        BurnOutcome {
            requested_m_s: requested_dv_m_s,
            achieved_m_s: max_dv,
            fuel_consumed_kg: consumed,
        }
    }
}

/// Propellant needed for `dv_m_s` from the given state, without mutating
/// anything. Planning estimate used by the greedy sequencer.
pub fn fuel_for_delta_v(
    dry_mass_kg: f64,
    fuel_kg: f64,
    thruster: &Thruster,
    dv_m_s: f64,
) -> f64 {
    let m0 = dry_mass_kg + fuel_kg;
    m0 - m0 / (dv_m_s / thruster.exhaust_velocity_m_s()).exp()
}

/// Largest delta-v the current tank can deliver.
pub fn max_delta_v(dry_mass_kg: f64, fuel_kg: f64, thruster: &Thruster) -> f64 {
    let m0 = dry_mass_kg + fuel_kg;
    thruster.exhaust_velocity_m_s() * (m0 / dry_mass_kg).ln()
}
