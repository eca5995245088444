//! Conversion of physical masses into simulation units.
//!
//! Simulation units: lengths in AU, times in years, `G = 1`, and a mass unit
//! in which one solar mass is `4π²`. A body at 1 AU around one solar mass
//! therefore has an orbital period of exactly 1.

use std::f64::consts::PI;

use serde::Deserialize;

use crate::error::{Result, SimError};

/// Gravitational constant in simulation units.
pub const G: f64 = 1.0;

/// One solar mass in simulation units, `(2π)²`.
pub const SOLAR_MASS: f64 = 4.0 * PI * PI;

/// Reference GM values in m³/s².
pub const GM_SUN: f64 = 1.33e20;
pub const GM_JUPITER: f64 = 1.27e17;
pub const GM_EARTH: f64 = 398_600.435_507e9;

/// Sidereal days per year, for au/day → au/yr velocities.
pub const DAYS_PER_YEAR: f64 = 365.256_36;

/// A body whose physical GM and simulation mass are both known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceMass {
    /// GM in m³/s²
    pub gm: f64,
    /// Mass in simulation units
    pub mass: f64,
}

impl ReferenceMass {
    pub fn sun() -> Self {
        Self { gm: GM_SUN, mass: SOLAR_MASS }
    }
}

/// Named reference bodies usable in scenario files.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceBody {
    #[serde(rename = "sun")]
    Sun,
    #[serde(rename = "jupiter")]
    Jupiter,
    #[serde(rename = "earth")]
    Earth,
}

impl ReferenceBody {
    /// Mass in simulation units, derived from the body's GM against the Sun.
    pub fn mass(self) -> f64 {
        match self {
            ReferenceBody::Sun => SOLAR_MASS,
            ReferenceBody::Jupiter => GM_JUPITER / GM_SUN * SOLAR_MASS,
            ReferenceBody::Earth => GM_EARTH / GM_SUN * SOLAR_MASS,
        }
    }
}

fn check_reference(mass: f64) -> Result<()> {
    if mass > 0.0 && mass.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidUnit(format!(
            "reference mass must be positive, got {mass}"
        )))
    }
}

/// `mass_sim = (gm / reference.gm) * reference.mass`
pub fn mass_from_gm(gm: f64, reference: &ReferenceMass) -> Result<f64> {
    check_reference(reference.gm)?;
    check_reference(reference.mass)?;
    Ok(gm / reference.gm * reference.mass)
}

/// `mass_sim = ratio * reference_mass`
pub fn mass_from_ratio(ratio: f64, reference_mass: f64) -> Result<f64> {
    check_reference(reference_mass)?;
    Ok(ratio * reference_mass)
}

/// Power-law scaling `reference_mass * ratio^exponent`.
///
/// Covers mass–radius relations (`m = m_earth (R/R_earth)^2.01`) and
/// constant-density scaling (`m1 = m2 (r1/r2)^3`).
pub fn mass_from_power_law(ratio: f64, exponent: f64, reference_mass: f64) -> Result<f64> {
    check_reference(reference_mass)?;
    if !(ratio > 0.0) {
        return Err(SimError::InvalidUnit(format!(
            "power-law ratio must be positive, got {ratio}"
        )));
    }
    Ok(reference_mass * ratio.powf(exponent))
}

/// Observed (sky-plane) transit inclination in degrees to an orbital
/// inclination in radians relative to the line of sight, `90° - i_obs`.
pub fn sky_inclination_to_rad(sky_deg: f64) -> f64 {
    (90.0 - sky_deg).to_radians()
}

pub fn au_per_day_to_au_per_year(v: f64) -> f64 {
    v * DAYS_PER_YEAR
}
