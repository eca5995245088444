//! Fixed-step time integrators for the N-body system
//!
//! Both schemes are built from the same kick and drift half-operations on a
//! [`System3`]. The step length is passed explicitly so the propagator can
//! shorten the last step onto an output or snapshot time.

use super::forces::AccelSet3;
use super::states::{System3, NVec3};
use crate::configuration::config::IntegratorConfig;

/// Advance the system by one step of length `dt` using the chosen scheme.
pub fn step(sys: &mut System3, forces: &AccelSet3, method: &IntegratorConfig, dt: f64) {
    if sys.bodies.is_empty() {
        return;
    }
    match method {
        IntegratorConfig::Verlet => kick_drift_kick(sys, forces, dt),
        IntegratorConfig::Leapfrog => drift_kick_drift(sys, forces, dt),
    }
}

fn accels(sys: &System3, forces: &AccelSet3, t: f64) -> Vec<NVec3> {
    let mut out = vec![NVec3::zeros(); sys.bodies.len()];
    forces.accumulate_accels(t, sys, &mut out);
    out
}

fn kick(sys: &mut System3, acc: &[NVec3], h: f64) {
    for (b, a) in sys.bodies.iter_mut().zip(acc) {
        b.v += h * *a;
    }
}

fn drift(sys: &mut System3, h: f64) {
    for b in sys.bodies.iter_mut() {
        b.x += h * b.v;
    }
}

/// Velocity Verlet: two force evaluations, state synchronised at both ends.
pub fn kick_drift_kick(sys: &mut System3, forces: &AccelSet3, dt: f64) {
    let half = 0.5 * dt;

    let a0 = accels(sys, forces, sys.t);
    kick(sys, &a0, half);
    drift(sys, dt);
    sys.t += dt;

    let a1 = accels(sys, forces, sys.t);
    kick(sys, &a1, half);
}

/// Leapfrog with a single force evaluation at the midpoint.
pub fn drift_kick_drift(sys: &mut System3, forces: &AccelSet3, dt: f64) {
    let half = 0.5 * dt;

    drift(sys, half);
    let a_mid = accels(sys, forces, sys.t + half);
    kick(sys, &a_mid, dt);
    drift(sys, half);

    sys.t += dt;
}
