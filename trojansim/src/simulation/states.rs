//! Core state types for the N-body simulation.
//!
//! - `Body3`   one body: stable id, name, mass and Cartesian state
//! - `System3` the live body list, the current simulation time `t` and the
//!   number of active (gravitating) bodies
//!
//! Bodies at index `>= n_active` are massless test bodies: they feel gravity
//! but never exert it.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

pub type NVec3 = Vector3<f64>;

/// Stable body identity. Never reused within a run, survives removals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

#[derive(Debug, Clone)]
pub struct Body3 {
    pub id: BodyId,
    pub name: String,
    pub x: NVec3, // position
    pub v: NVec3, // velocity
    pub m: f64,   // mass (simulation units)
}

#[derive(Debug, Clone)]
pub struct System3 {
    pub bodies: Vec<Body3>,
    pub t: f64,
    /// `None` until frozen: every body gravitates.
    pub n_active: Option<usize>,
}

impl System3 {
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            t: 0.0,
            n_active: None,
        }
    }

    /// Number of bodies that contribute gravity.
    pub fn active_len(&self) -> usize {
        self.n_active
            .unwrap_or(self.bodies.len())
            .min(self.bodies.len())
    }

    pub fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.iter().position(|b| b.id == id)
    }

    pub fn is_finite(&self) -> bool {
        self.bodies
            .iter()
            .all(|b| b.x.iter().chain(b.v.iter()).all(|c| c.is_finite()))
    }
}

impl Default for System3 {
    fn default() -> Self {
        Self::new()
    }
}
