//! Osculating orbital elements.
//!
//! [`Orbit`] is derived from an instantaneous relative state and never
//! stored as a source of truth. [`Elements`] is the input form used to place
//! a body on an orbit around a primary.
//!
//! Angle conventions: `inc` in `[0, π]`, every other angle wrapped to
//! `[0, 2π)`. For circular orbits `omega` is 0 and `f` is measured from the
//! ascending node; for equatorial orbits `Omega` is 0 and the node is the
//! x-axis.

use std::f64::consts::TAU;

use nalgebra::{Rotation3, Vector3};
use serde::{Deserialize, Serialize};

use super::states::NVec3;
use crate::error::{Result, SimError};

/// Below this eccentricity (or relative node length) the orbit is treated
/// as circular (or equatorial).
const DEGENERATE: f64 = 1.0e-12;

/// Orbital elements relative to a primary, used when adding a body.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Elements {
    pub a: f64,
    pub e: f64,
    pub inc: f64,
    pub omega: f64,
    pub Omega: f64,
    pub f: f64,
}

/// Derived orbit of one body relative to a primary.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orbit {
    pub a: f64,
    pub e: f64,
    pub inc: f64,
    pub omega: f64,
    pub Omega: f64,
    pub f: f64,
    /// Mean anomaly.
    pub l: f64,
    /// `Omega + omega + l`, wrapped.
    pub mean_longitude: f64,
}

pub fn wrap_angle(x: f64) -> f64 {
    let w = x.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if w >= TAU {
        0.0
    } else {
        w
    }
}

/// Unsigned angle between two vectors in `[0, π]`.
fn angle_between(a: &NVec3, b: &NVec3) -> f64 {
    a.cross(b).norm().atan2(a.dot(b))
}

impl Elements {
    /// Position and velocity relative to the primary for gravitational
    /// parameter `mu = G (m_primary + m_body)`.
    ///
    /// Only bound orbits (`a > 0`, `0 <= e < 1`) can be placed.
    pub fn to_relative_state(&self, mu: f64) -> Result<(NVec3, NVec3)> {
        if !(mu > 0.0) || !mu.is_finite() {
            return Err(SimError::config(format!(
                "cannot place an orbit around a primary with mu = {mu}"
            )));
        }
        if !(self.a > 0.0) || !self.a.is_finite() {
            return Err(SimError::config(format!(
                "semi-major axis must be positive, got {}",
                self.a
            )));
        }
        if !(0.0..1.0).contains(&self.e) {
            return Err(SimError::config(format!(
                "eccentricity must be in [0, 1), got {}",
                self.e
            )));
        }

        let e = self.e;
        let p = self.a * (1.0 - e * e);
        let (sin_f, cos_f) = self.f.sin_cos();
        let r = p / (1.0 + e * cos_f);

        // Perifocal frame: x towards periapsis, z along angular momentum
        let pos_pf = Vector3::new(r * cos_f, r * sin_f, 0.0);
        let vel_pf = (mu / p).sqrt() * Vector3::new(-sin_f, e + cos_f, 0.0);

        let rot = Rotation3::from_axis_angle(&Vector3::z_axis(), self.Omega)
            * Rotation3::from_axis_angle(&Vector3::x_axis(), self.inc)
            * Rotation3::from_axis_angle(&Vector3::z_axis(), self.omega);

        Ok((rot * pos_pf, rot * vel_pf))
    }
}

impl Orbit {
    /// Elements of a body at relative position `r` and velocity `v`.
    ///
    /// Unbound states give a negative (or infinite) semi-major axis, which
    /// is what the escape pruner keys on.
    #[allow(non_snake_case)]
    pub fn from_relative_state(r: &NVec3, v: &NVec3, mu: f64) -> Self {
        let d = r.norm();
        let v2 = v.norm_squared();
        let rv = r.dot(v);

        // Specific orbital energy, 1/a = 2/r - v^2/mu
        let a = 1.0 / (2.0 / d - v2 / mu);

        let h = r.cross(v);
        let h_norm = h.norm();

        // Eccentricity (Laplace-Runge-Lenz) vector
        let e_vec = ((v2 - mu / d) * r - rv * v) / mu;
        let e = e_vec.norm();

        let inc = if h_norm > 0.0 {
            (h.z / h_norm).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };

        // Node vector z × h
        let node = Vector3::new(-h.y, h.x, 0.0);
        let equatorial = node.norm() <= DEGENERATE * h_norm.max(f64::MIN_POSITIVE);
        let circular = e <= DEGENERATE;

        let Omega = if equatorial {
            0.0
        } else {
            wrap_angle(node.y.atan2(node.x))
        };
        let reference = if equatorial { NVec3::x() } else { node };

        let omega = if circular {
            0.0
        } else {
            let w = angle_between(&reference, &e_vec);
            let below = if equatorial { e_vec.y * h.z.signum() < 0.0 } else { e_vec.z < 0.0 };
            if below { TAU - w } else { w }
        };

        let f = if circular {
            // Argument of latitude (or true longitude when equatorial)
            let u = angle_between(&reference, r);
            let below = if equatorial { r.y * h.z.signum() < 0.0 } else { r.z < 0.0 };
            if below { TAU - u } else { u }
        } else {
            let nu = angle_between(&e_vec, r);
            if rv < 0.0 { TAU - nu } else { nu }
        };

        let l = mean_anomaly(e, f);

        Self {
            a,
            e,
            inc,
            omega: wrap_angle(omega),
            Omega,
            f: wrap_angle(f),
            l,
            mean_longitude: wrap_angle(Omega + omega + l),
        }
    }
}

/// Mean anomaly from eccentricity and true anomaly.
fn mean_anomaly(e: f64, f: f64) -> f64 {
    let half = 0.5 * f;
    if e < 1.0 {
        let big_e = 2.0 * ((1.0 - e).sqrt() * half.sin()).atan2((1.0 + e).sqrt() * half.cos());
        wrap_angle(big_e - e * big_e.sin())
    } else if e > 1.0 {
        let big_f = 2.0 * (((e - 1.0) / (e + 1.0)).sqrt() * half.tan()).atanh();
        e * big_f.sinh() - big_f
    } else {
        let d = half.tan();
        d + d * d * d / 3.0
    }
}
