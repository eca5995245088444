//! Sampled integration runner.
//!
//! A [`SimulationRun`] owns the propagator and the name registry for one
//! run. It advances to `n_out` evenly spaced times over `[0, t_max]`, records
//! the orbit of every originally active planet after each advance and prunes
//! escaped bodies at the sample boundary. Full-state persistence happens
//! inside the propagator on its own interval.

use std::path::Path;

use log::{debug, info};
use serde::Serialize;

use super::orbit::Orbit;
use super::pruner::{EscapePolicy, RemovedBody};
use super::propagator::{BodySpec, Propagator};
use super::registry::Registry;
use super::sampling::output_times;
use super::states::BodyId;
use crate::error::{Result, SimError};

/// Which optional elements the runner records.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tracking {
    pub eccentricity: bool,
}

/// Per-planet element series, indexed by output sample. Samples taken after
/// the planet was pruned are `NaN`.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Serialize)]
pub struct BodySeries {
    pub id: BodyId,
    pub name: String,
    pub a: Vec<f64>,
    pub Omega: Vec<f64>,
    pub omega: Vec<f64>,
    pub inc: Vec<f64>,
    pub f: Vec<f64>,
    pub e: Option<Vec<f64>>,
}

impl BodySeries {
    fn new(id: BodyId, name: String, n: usize, tracking: &Tracking) -> Self {
        Self {
            id,
            name,
            a: vec![f64::NAN; n],
            Omega: vec![f64::NAN; n],
            omega: vec![f64::NAN; n],
            inc: vec![f64::NAN; n],
            f: vec![f64::NAN; n],
            e: tracking.eccentricity.then(|| vec![f64::NAN; n]),
        }
    }

    fn record(&mut self, i: usize, o: &Orbit) {
        self.a[i] = o.a;
        self.Omega[i] = o.Omega;
        self.omega[i] = o.omega;
        self.inc[i] = o.inc;
        self.f[i] = o.f;
        if let Some(e) = self.e.as_mut() {
            e[i] = o.e;
        }
    }
}

/// Output of a completed sampled run.
#[derive(Debug, Clone, Serialize)]
pub struct SampledSeries {
    pub times: Vec<f64>,
    pub bodies: Vec<BodySeries>,
    pub removed: Vec<RemovedBody>,
}

/// One simulation run: the live body set plus its bookkeeping.
pub struct SimulationRun<P: Propagator> {
    pub(crate) propagator: P,
    pub(crate) registry: Registry,
    /// Gravitating bodies added so far, central body included
    pub(crate) n_massive: usize,
    pub(crate) n_test: usize,
    /// Originally active planets, fixed when the active count is frozen
    pub(crate) tracked: Vec<BodyId>,
    pub(crate) frozen: bool,
    pub escape: EscapePolicy,
    pub tracking: Tracking,
}

impl<P: Propagator> SimulationRun<P> {
    pub fn new(propagator: P) -> Self {
        Self {
            propagator,
            registry: Registry::new(),
            n_massive: 0,
            n_test: 0,
            tracked: Vec::new(),
            frozen: false,
            escape: EscapePolicy::default(),
            tracking: Tracking::default(),
        }
    }

    pub fn propagator(&self) -> &P {
        &self.propagator
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn len(&self) -> usize {
        self.propagator.len()
    }

    pub fn is_empty(&self) -> bool {
        self.propagator.is_empty()
    }

    pub fn active_count(&self) -> Option<usize> {
        self.propagator.active_count()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn add(&mut self, spec: &BodySpec) -> Result<BodyId> {
        if self.frozen {
            return Err(SimError::config(format!(
                "cannot add {} after the active count was frozen",
                spec.name
            )));
        }
        if self.registry.contains(&spec.name) {
            return Err(SimError::DuplicateName(spec.name.clone()));
        }
        let id = self.propagator.add(spec)?;
        self.registry.insert(&spec.name, id)?;
        Ok(id)
    }

    /// Add a gravitating body. Must precede every test body.
    pub fn add_body(&mut self, spec: &BodySpec) -> Result<BodyId> {
        if self.n_test > 0 {
            return Err(SimError::config(format!(
                "active body {} added after test bodies",
                spec.name
            )));
        }
        let id = self.add(spec)?;
        self.n_massive += 1;
        Ok(id)
    }

    /// Add a massless test body.
    pub fn add_test_body(&mut self, spec: &BodySpec) -> Result<BodyId> {
        if spec.mass != 0.0 {
            return Err(SimError::config(format!(
                "test body {} must be massless, got m = {}",
                spec.name, spec.mass
            )));
        }
        if self.n_massive == 0 {
            return Err(SimError::config("test bodies need a central body first"));
        }
        let id = self.add(spec)?;
        self.n_test += 1;
        Ok(id)
    }

    /// Freeze the active count to the gravitating bodies added so far.
    pub fn freeze_active(&mut self) -> Result<usize> {
        if self.frozen {
            return Err(SimError::config("active count has already been frozen"));
        }
        if self.n_massive == 0 {
            return Err(SimError::config("no bodies to freeze"));
        }
        self.propagator.set_active_count(self.n_massive)?;
        self.tracked = self
            .registry
            .names()
            .filter_map(|n| self.registry.get(n))
            .filter(|id| {
                self.propagator
                    .index_of(*id)
                    .is_some_and(|i| i > 0 && i < self.n_massive)
            })
            .collect();
        self.frozen = true;
        info!(
            "active count frozen at {} ({} planets, {} test bodies)",
            self.n_massive,
            self.tracked.len(),
            self.n_test
        );
        Ok(self.n_massive)
    }

    /// Enable periodic full-state persistence.
    pub fn persist(&mut self, path: &Path, interval: f64, overwrite: bool) -> Result<()> {
        self.propagator.persist(path, interval, overwrite)
    }

    /// Advance through `n_out` evenly spaced times over `[0, t_max]`.
    ///
    /// A propagator failure aborts the run. The error carries the last
    /// completed sample time and no partial series is returned.
    pub fn run_sampled(&mut self, t_max: f64, n_out: usize) -> Result<SampledSeries> {
        let times = output_times(t_max, n_out)?;
        if !self.frozen {
            self.freeze_active()?;
        }

        let mut bodies: Vec<BodySeries> = self
            .tracked
            .iter()
            .map(|id| {
                let name = self.registry.name_of(*id).unwrap_or_default().to_string();
                BodySeries::new(*id, name, n_out, &self.tracking)
            })
            .collect();
        let mut removed = Vec::new();
        let mut last_sampled: Option<f64> = None;

        for (i, &time) in times.iter().enumerate() {
            match self.propagator.advance(time) {
                Ok(()) => {}
                Err(SimError::PropagatorFailure { time, reason, .. }) => {
                    return Err(SimError::PropagatorFailure {
                        time,
                        last_sampled,
                        reason,
                    });
                }
                Err(e) => return Err(e),
            }

            let orbits = self.propagator.orbits(0)?;
            for series in bodies.iter_mut() {
                // orbits[j] belongs to body j + 1
                if let Some(idx) = self.propagator.index_of(series.id).filter(|&k| k > 0) {
                    series.record(i, &orbits[idx - 1]);
                }
            }

            removed.extend(self.prune_with(&orbits, time)?);
            last_sampled = Some(time);
            debug!("sample {i}/{n_out} at t = {time}, {} bodies", self.propagator.len());
        }

        info!(
            "run finished at t = {t_max}: {} samples, {} bodies removed, {} remaining",
            n_out,
            removed.len(),
            self.propagator.len()
        );
        Ok(SampledSeries {
            times,
            bodies,
            removed,
        })
    }
}
