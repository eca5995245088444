//! System builder: turns an ordered catalog into a live body set.
//!
//! The first entry is the central body; every later entry's orbit is taken
//! relative to it. Catalog order is preserved, since samples and pruning
//! address bodies by position.

use std::collections::HashSet;

use log::info;

use super::propagator::{BodySpec, InitialState, Propagator};
use super::runner::SimulationRun;
use crate::error::{Result, SimError};

pub fn build<P: Propagator>(propagator: P, catalog: &[BodySpec]) -> Result<SimulationRun<P>> {
    let Some(central) = catalog.first() else {
        return Err(SimError::config("catalog holds no bodies"));
    };
    if matches!(central.state, InitialState::Elements(_)) {
        return Err(SimError::config(format!(
            "central body {} cannot be given by orbital elements",
            central.name
        )));
    }

    let mut seen = HashSet::new();
    for spec in catalog {
        if !seen.insert(spec.name.as_str()) {
            return Err(SimError::DuplicateName(spec.name.clone()));
        }
    }

    let mut run = SimulationRun::new(propagator);
    for spec in catalog {
        run.add_body(spec)?;
    }
    info!(
        "built system around {} with {} planets",
        central.name,
        catalog.len() - 1
    );
    Ok(run)
}
