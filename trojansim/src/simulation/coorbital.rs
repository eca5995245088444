//! Co-orbital (Trojan) test-body placement.
//!
//! A fan of massless bodies is laid along the target's orbit, with
//! semi-major axes spanning the target's Hill-scaled band
//! `[a, a (1 + (m_t / 3 m_p)^(1/3))]` and the argument of periapsis shifted
//! ahead of the target (60° puts them near L4).

use std::f64::consts::PI;

use log::info;

use super::orbit::Elements;
use super::propagator::{BodySpec, InitialState, Propagator};
use super::runner::SimulationRun;
use super::sampling::linspace;
use super::states::BodyId;
use crate::error::{Result, SimError};

pub const DEFAULT_COUNT: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct CoorbitalPlacement {
    /// Name of the planet the fan follows
    pub target: String,
    /// Number of semi-major axis samples
    pub count: usize,
    /// Offset added to the target's argument of periapsis, radians
    pub offset: f64,
    /// Eccentricity given to every placed body
    pub eccentricity: f64,
}

impl CoorbitalPlacement {
    /// Twenty circular bodies leading the target by 60°.
    pub fn leading(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            count: DEFAULT_COUNT,
            offset: PI / 3.0,
            eccentricity: 0.0,
        }
    }
}

/// Outer edge of the band, `a (1 + (m_target / (3 m_primary))^(1/3))`.
pub fn hill_edge(a_start: f64, m_target: f64, m_primary: f64) -> Result<f64> {
    if !(m_target > 0.0) || !(m_primary > 0.0) {
        return Err(SimError::config(format!(
            "Hill radius undefined for m_target = {m_target}, m_primary = {m_primary}"
        )));
    }
    if !(a_start > 0.0) || !a_start.is_finite() {
        return Err(SimError::config(format!(
            "target semi-major axis must be positive, got {a_start}"
        )));
    }
    Ok(a_start * (1.0 + (m_target / (3.0 * m_primary)).cbrt()))
}

pub fn coorbital_name(target: &str, i: usize) -> String {
    format!("Trojan_{target}_{i}")
}

impl<P: Propagator> SimulationRun<P> {
    /// Place the co-orbital fan around `placement.target`.
    ///
    /// Must run after every active body is added and before the active
    /// count is frozen.
    pub fn place_coorbitals(&mut self, placement: &CoorbitalPlacement) -> Result<Vec<BodyId>> {
        if self.frozen {
            return Err(SimError::config(
                "co-orbitals must be placed before the active count is frozen",
            ));
        }
        if placement.count == 0 {
            return Err(SimError::config("co-orbital count must be at least 1"));
        }
        let target_id = self.registry.get(&placement.target).ok_or_else(|| {
            SimError::config(format!("unknown co-orbital target {}", placement.target))
        })?;
        let index = self
            .propagator
            .index_of(target_id)
            .filter(|&i| i > 0)
            .ok_or_else(|| {
                SimError::config(format!("{} cannot be a co-orbital target", placement.target))
            })?;

        let m_target = self.propagator.mass(index).unwrap_or(0.0);
        let m_primary = self.propagator.mass(0).unwrap_or(0.0);
        let target = self.propagator.orbits(0)?[index - 1];
        let a_end = hill_edge(target.a, m_target, m_primary)?;

        let names: Vec<String> = (0..placement.count)
            .map(|i| coorbital_name(&placement.target, i))
            .collect();
        if let Some(taken) = names.iter().find(|n| self.registry.contains(n)) {
            return Err(SimError::DuplicateName(taken.clone()));
        }

        let mut ids = Vec::with_capacity(placement.count);
        for (name, a) in names.into_iter().zip(linspace(target.a, a_end, placement.count)) {
            let elements = Elements {
                a,
                e: placement.eccentricity,
                inc: target.inc,
                omega: target.omega + placement.offset,
                Omega: target.Omega,
                f: target.f,
            };
            ids.push(self.add_test_body(&BodySpec {
                name,
                mass: 0.0,
                state: InitialState::Elements(elements),
            })?);
        }

        info!(
            "placed {} co-orbitals of {} over a = {}..{}",
            ids.len(),
            placement.target,
            target.a,
            a_end
        );
        Ok(ids)
    }
}
