//! Numerical and physical parameters for the built-in propagator
//!
//! `Parameters` holds runtime settings:
//! - the fixed integration step `dt`,
//! - the integration scheme,
//! - softening and gravitational constant (`eps2`, `G`)

use crate::configuration::config::IntegratorConfig;

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub dt: f64,                      // step size
    pub method: IntegratorConfig,     // verlet or leapfrog
    pub eps2: f64,                    // softening
    pub G: f64,                       // gravitational constant
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            dt: 1.0e-3,
            method: IntegratorConfig::Verlet,
            eps2: 0.0,
            G: 1.0,
        }
    }
}
