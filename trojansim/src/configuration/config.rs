//! Configuration types for loading campaign scenarios from YAML.
//!
//! One scenario describes one target system and one run:
//!
//! - [`CentralConfig`]   – the central star
//! - [`BodyConfig`]      – each planet, in catalog order
//! - [`CoorbitalConfig`] – which planet gets the co-orbital fan
//! - [`IntegratorSettings`] – built-in propagator settings
//! - [`RunConfig`]       – output cadence, duration and escape bound
//! - [`ArchiveConfig`]   – snapshot persistence
//!
//! # YAML format
//!
//! ```yaml
//! name: TRAPPIST-1e
//! central:
//!   name: TRAPPIST-1
//!   mass: { ratio: 0.0898, of: sun }
//! bodies:
//!   - name: TRAPPIST-1b
//!     mass: { ratio: 0.004323, of: jupiter }
//!     a: 0.01154
//!     sky_inclination_deg: 89.728
//! coorbital:
//!   target: TRAPPIST-1b
//! integrator:
//!   method: "verlet"
//!   dt: 0.0003
//! run:
//!   t_max: 10000.0
//!   n_out: 10000
//!   escape_a_max: 1.0
//! archive:
//!   path: trappist_1e.jsonl
//!   interval: 1.0
//! ```
//!
//! `scenario::Scenario::build_scenario` maps this onto the runtime types.

use std::path::PathBuf;

use serde::Deserialize;

use crate::simulation::units::ReferenceBody;

/// Which integrator the built-in propagator uses
/// `method: "verlet"` or `method: "leapfrog"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegratorConfig {
    #[serde(rename = "verlet")] // Kick-drift-kick velocity Verlet, two force evaluations per step
    #[default]
    Verlet,

    #[serde(rename = "leapfrog")] // Drift-kick-drift leapfrog, one force evaluation per step
    Leapfrog,
}

/// A mass in one of the forms the catalogs use.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum MassConfig {
    /// Already in simulation units
    Sim { sim: f64 },
    /// GM in m³/s², converted against the Sun
    Gm { gm: f64 },
    /// `ref_mass * radius_ratio^exponent`
    RadiusRatio {
        radius_ratio: f64,
        exponent: f64,
        of: ReferenceBody,
    },
    /// `ratio * ref_mass`
    Ratio { ratio: f64, of: ReferenceBody },
    /// `mass(scale_of) * ratio^exponent`, scale_of names an earlier body
    Scaled {
        scale_of: String,
        ratio: f64,
        exponent: f64,
    },
}

/// Unit of Cartesian velocities in the scenario file
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VelocityUnit {
    #[serde(rename = "au_per_year")]
    #[default]
    AuPerYear,
    #[serde(rename = "au_per_day")]
    AuPerDay,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CentralConfig {
    pub name: String,
    pub mass: MassConfig,
    pub x: Option<Vec<f64>>,
    pub v: Option<Vec<f64>>,
    #[serde(default)]
    pub velocity_unit: VelocityUnit,
}

/// One planet. Either orbital elements relative to the central body
/// (`a` and friends) or a Cartesian state (`x` and `v`).
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub name: String,
    pub mass: MassConfig,
    pub a: Option<f64>,
    pub e: Option<f64>,
    pub inc: Option<f64>,                 // radians
    pub sky_inclination_deg: Option<f64>, // observed transit inclination
    pub omega: Option<f64>,
    pub Omega: Option<f64>,
    pub f: Option<f64>,
    pub x: Option<Vec<f64>>,
    pub v: Option<Vec<f64>>,
    #[serde(default)]
    pub velocity_unit: VelocityUnit,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CoorbitalConfig {
    pub target: String,
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default = "default_offset_deg")]
    pub offset_deg: f64,
    #[serde(default)]
    pub eccentricity: f64,
}

fn default_count() -> usize {
    20
}

fn default_offset_deg() -> f64 {
    60.0
}

#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
pub struct IntegratorSettings {
    #[serde(default)]
    pub method: IntegratorConfig,
    pub dt: f64,           // fixed step size
    #[serde(default)]
    pub eps2: f64,         // softening
    #[serde(default = "default_g")]
    pub G: f64,            // gravitational constant
}

fn default_g() -> f64 {
    1.0
}

#[derive(Deserialize, Debug, Clone)]
pub struct RunConfig {
    pub t_max: f64,
    pub n_out: usize,
    #[serde(default)]
    pub track_eccentricity: bool,
    pub escape_a_max: Option<f64>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ArchiveConfig {
    pub path: PathBuf,
    pub interval: f64,
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
}

fn default_overwrite() -> bool {
    true
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub name: String,
    pub central: CentralConfig,
    pub bodies: Vec<BodyConfig>,
    pub coorbital: Option<CoorbitalConfig>,
    pub integrator: IntegratorSettings,
    pub run: RunConfig,
    pub archive: Option<ArchiveConfig>,
}
