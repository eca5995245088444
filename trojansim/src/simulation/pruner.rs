//! Escape pruning.
//!
//! Bodies are removed by position, so removal must go highest index first:
//! removing index `i` shifts every later body down by one. The central body
//! (index 0) is never removed.

use log::warn;
use serde::Serialize;

use super::orbit::Orbit;
use super::propagator::Propagator;
use super::runner::SimulationRun;
use super::states::BodyId;
use crate::error::Result;

/// When a body counts as escaped.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EscapePolicy {
    /// Optional upper bound on the semi-major axis
    pub a_max: Option<f64>,
}

impl EscapePolicy {
    /// Non-positive or non-finite `a` (unbound), or `a >= a_max` when set.
    pub fn has_escaped(&self, orbit: &Orbit) -> bool {
        let a = orbit.a;
        if !(a > 0.0) || !a.is_finite() {
            return true;
        }
        self.a_max.is_some_and(|max| a >= max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemovedBody {
    pub id: BodyId,
    pub name: String,
    pub t: f64,
}

/// Body indices of escaped bodies, given the orbit list relative to body 0
/// (`orbits[j]` belongs to body `j + 1`).
pub fn escaped_indices(orbits: &[Orbit], policy: &EscapePolicy) -> Vec<usize> {
    orbits
        .iter()
        .enumerate()
        .filter(|(_, o)| policy.has_escaped(o))
        .map(|(j, _)| j + 1)
        .collect()
}

/// Indices sorted highest first, duplicates dropped.
pub fn removal_order(indices: &[usize]) -> Vec<usize> {
    let mut order = indices.to_vec();
    order.sort_unstable_by(|a, b| b.cmp(a));
    order.dedup();
    order
}

/// Remove `indices` from `items` in descending order and return the removed
/// items in removal order. Out-of-range indices are ignored.
pub fn remove_descending<T>(items: &mut Vec<T>, indices: &[usize]) -> Vec<T> {
    let mut removed = Vec::with_capacity(indices.len());
    for i in removal_order(indices) {
        if i < items.len() {
            removed.push(items.remove(i));
        }
    }
    removed
}

impl<P: Propagator> SimulationRun<P> {
    /// Remove every escaped body at the current instant.
    pub fn prune(&mut self) -> Result<Vec<RemovedBody>> {
        let orbits = self.propagator.orbits(0)?;
        let t = self.propagator.time();
        self.prune_with(&orbits, t)
    }

    pub(crate) fn prune_with(&mut self, orbits: &[Orbit], t: f64) -> Result<Vec<RemovedBody>> {
        let escaped = escaped_indices(orbits, &self.escape);
        let mut removed = Vec::with_capacity(escaped.len());
        for index in removal_order(&escaped) {
            if index == 0 {
                continue;
            }
            let id = self.propagator.remove(index)?;
            let name = self.registry.remove(id).unwrap_or_default();
            warn!("t = {t}: removed escaped body {name} (a = {})", orbits[index - 1].a);
            removed.push(RemovedBody { id, name, t });
        }
        Ok(removed)
    }
}
