//! Build fully-initialized campaign runs from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a `Scenario`:
//! - masses resolved into simulation units,
//! - the system built in catalog order,
//! - archive persistence enabled,
//! - the co-orbital fan placed and the active count frozen,
//! - the run duration and cadence.
//!
//! All configuration errors surface here, before any integration.

use std::collections::HashMap;
use std::f64::consts::PI;

use log::info;

use crate::configuration::config::{
    BodyConfig, CentralConfig, MassConfig, ScenarioConfig, VelocityUnit,
};
use crate::error::{Result, SimError};
use crate::simulation::builder;
use crate::simulation::coorbital::CoorbitalPlacement;
use crate::simulation::orbit::Elements;
use crate::simulation::params::Parameters;
use crate::simulation::propagator::{BodySpec, InitialState, NBodyPropagator};
use crate::simulation::pruner::EscapePolicy;
use crate::simulation::runner::{SampledSeries, SimulationRun, Tracking};
use crate::simulation::states::NVec3;
use crate::simulation::units::{self, ReferenceMass};

/// A ready-to-run campaign for one system.
pub struct Scenario {
    pub name: String,
    pub run: SimulationRun<NBodyPropagator>,
    pub t_max: f64,
    pub n_out: usize,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        // Parameters (runtime) from IntegratorSettings
        let parameters = Parameters {
            dt: cfg.integrator.dt,
            method: cfg.integrator.method,
            eps2: cfg.integrator.eps2,
            G: cfg.integrator.G,
        };
        let propagator = NBodyPropagator::new(parameters)?;

        let catalog = resolve_catalog(&cfg.central, &cfg.bodies)?;
        let mut run = builder::build(propagator, &catalog)?;
        run.escape = EscapePolicy {
            a_max: cfg.run.escape_a_max,
        };
        run.tracking = Tracking {
            eccentricity: cfg.run.track_eccentricity,
        };

        if let Some(archive) = &cfg.archive {
            run.persist(&archive.path, archive.interval, archive.overwrite)?;
        }

        if let Some(co) = &cfg.coorbital {
            run.place_coorbitals(&CoorbitalPlacement {
                target: co.target.clone(),
                count: co.count,
                offset: co.offset_deg * PI / 180.0,
                eccentricity: co.eccentricity,
            })?;
        }
        run.freeze_active()?;

        info!(
            "scenario {}: {} bodies, t_max = {}, n_out = {}",
            cfg.name,
            run.len(),
            cfg.run.t_max,
            cfg.run.n_out
        );
        Ok(Self {
            name: cfg.name,
            run,
            t_max: cfg.run.t_max,
            n_out: cfg.run.n_out,
        })
    }

    pub fn execute(&mut self) -> Result<SampledSeries> {
        self.run.run_sampled(self.t_max, self.n_out)
    }
}

/// Map the central body and planets onto `BodySpec`s with masses in
/// simulation units.
pub fn resolve_catalog(central: &CentralConfig, bodies: &[BodyConfig]) -> Result<Vec<BodySpec>> {
    let mut masses: HashMap<&str, f64> = HashMap::new();
    let mut catalog = Vec::with_capacity(bodies.len() + 1);

    let m = resolve_mass(&central.mass, &masses)?;
    masses.insert(central.name.as_str(), m);
    let state = match (&central.x, &central.v) {
        (None, None) => InitialState::Origin,
        (x, v) => cartesian(&central.name, x, v, central.velocity_unit)?,
    };
    catalog.push(BodySpec {
        name: central.name.clone(),
        mass: m,
        state,
    });

    for bc in bodies {
        let m = resolve_mass(&bc.mass, &masses)?;
        masses.insert(bc.name.as_str(), m);
        catalog.push(BodySpec {
            name: bc.name.clone(),
            mass: m,
            state: body_state(bc)?,
        });
    }
    Ok(catalog)
}

fn resolve_mass(cfg: &MassConfig, known: &HashMap<&str, f64>) -> Result<f64> {
    match cfg {
        MassConfig::Sim { sim } => Ok(*sim),
        MassConfig::Gm { gm } => units::mass_from_gm(*gm, &ReferenceMass::sun()),
        MassConfig::Ratio { ratio, of } => units::mass_from_ratio(*ratio, of.mass()),
        MassConfig::RadiusRatio {
            radius_ratio,
            exponent,
            of,
        } => units::mass_from_power_law(*radius_ratio, *exponent, of.mass()),
        MassConfig::Scaled {
            scale_of,
            ratio,
            exponent,
        } => {
            let base = known.get(scale_of.as_str()).ok_or_else(|| {
                SimError::config(format!("mass scaled from unknown or later body {scale_of}"))
            })?;
            units::mass_from_power_law(*ratio, *exponent, *base)
        }
    }
}

fn vec3(name: &str, field: &str, values: &[f64]) -> Result<NVec3> {
    match values {
        [x, y, z] => Ok(NVec3::new(*x, *y, *z)),
        _ => Err(SimError::config(format!(
            "{name}: `{field}` needs 3 components, got {}",
            values.len()
        ))),
    }
}

fn cartesian(
    name: &str,
    x: &Option<Vec<f64>>,
    v: &Option<Vec<f64>>,
    unit: VelocityUnit,
) -> Result<InitialState> {
    let (Some(x), Some(v)) = (x, v) else {
        return Err(SimError::config(format!(
            "{name}: Cartesian state needs both `x` and `v`"
        )));
    };
    let x = vec3(name, "x", x)?;
    let mut v = vec3(name, "v", v)?;
    if unit == VelocityUnit::AuPerDay {
        v = v.map(units::au_per_day_to_au_per_year);
    }
    Ok(InitialState::Cartesian { x, v })
}

fn body_state(bc: &BodyConfig) -> Result<InitialState> {
    let has_cartesian = bc.x.is_some() || bc.v.is_some();
    match (bc.a, has_cartesian) {
        (Some(_), true) => Err(SimError::config(format!(
            "{}: give either orbital elements or a Cartesian state, not both",
            bc.name
        ))),
        (None, true) => cartesian(&bc.name, &bc.x, &bc.v, bc.velocity_unit),
        (None, false) => Err(SimError::config(format!(
            "{}: needs a semi-major axis or a Cartesian state",
            bc.name
        ))),
        (Some(a), false) => {
            let inc = match (bc.inc, bc.sky_inclination_deg) {
                (Some(_), Some(_)) => {
                    return Err(SimError::config(format!(
                        "{}: give `inc` or `sky_inclination_deg`, not both",
                        bc.name
                    )))
                }
                (Some(inc), None) => inc,
                (None, Some(sky)) => units::sky_inclination_to_rad(sky),
                (None, None) => 0.0,
            };
            Ok(InitialState::Elements(Elements {
                a,
                e: bc.e.unwrap_or(0.0),
                inc,
                omega: bc.omega.unwrap_or(0.0),
                Omega: bc.Omega.unwrap_or(0.0),
                f: bc.f.unwrap_or(0.0),
            }))
        }
    }
}
