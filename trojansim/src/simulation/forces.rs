//! Force / acceleration contributors for the n-body engine
//!
//! Direct Newtonian gravity between the active bodies of a [`System3`];
//! test bodies past the active prefix are pulled but pull nothing.

use crate::simulation::states::{System3, NVec3};

/// Collection of 3D acceleration terms.
/// Each term implements [`Acceleration3`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet3 {
    terms: Vec<Box<dyn Acceleration3 + Send + Sync>>,
}

impl AccelSet3 {
    /// Constructor
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
        }
    }

    /// Add an acceleration term
    pub fn with(mut self, term: impl Acceleration3 + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations at time `t` for all bodies in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, t: f64, sys: &System3, out: &mut [NVec3]) {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec3::zeros();
        }
        for term in &self.terms {
            term.acceleration(t, sys, out);
        }
    }
}

impl Default for AccelSet3 {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for 3D acceleration sources operating on [`System3`]
pub trait Acceleration3 {
    fn acceleration(&self, t: f64, sys: &System3, out: &mut [NVec3]);
}

/// 3D Newtonian gravity with softening (direct n^2 sum over active sources)
#[allow(non_snake_case)]
pub struct NewtonianGravity3 {
    pub G: f64,
    pub eps2: f64,
}

impl Acceleration3 for NewtonianGravity3 {
    fn acceleration(&self, _t: f64, sys: &System3, out: &mut [NVec3]) {
        let n = sys.bodies.len();
        let n_active = sys.active_len();
        if n == 0 {
            return;
        }

        // Sources are the active bodies only. Pairs where both are active get
        // the equal and opposite treatment, a test body j only receives.
        for i in 0..n_active {
            let bi = &sys.bodies[i];
            let xi = bi.x;
            let mi = bi.m;

            for j in (i + 1)..n {
                let bj = &sys.bodies[j];

                // r points from i to j: i is pulled along +r, j along -r
                let r = bj.x - xi;
                let d2 = r.dot(&r) + self.eps2;

                // G / |r_soft|^3
                let inv_r = d2.sqrt().recip();
                let coef = self.G * inv_r * inv_r * inv_r;

                out[j] -= coef * mi * r;
                if j < n_active {
                    out[i] += coef * bj.m * r;
                }
            }
        }
    }
}
