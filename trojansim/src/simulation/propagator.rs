//! The propagator seam and the built-in direct N-body propagator.
//!
//! Drivers only talk to a [`Propagator`]: add bodies, advance to a target
//! time, read orbits back, remove bodies by position, freeze the active
//! count once and enable periodic persistence. [`NBodyPropagator`] is the
//! implementation used by the campaign binary.

use std::path::Path;

use log::debug;

use super::forces::{AccelSet3, NewtonianGravity3};
use super::integrator;
use super::orbit::{Elements, Orbit};
use super::params::Parameters;
use super::states::{Body3, BodyId, NVec3, System3};
use crate::archive::snapshot::{ArchiveHeader, Snapshot};
use crate::archive::writer::ArchiveWriter;
use crate::error::{Result, SimError};

/// Initial state of a body being added.
#[derive(Debug, Clone, PartialEq)]
pub enum InitialState {
    /// At rest at the origin (the central body).
    Origin,
    /// Orbital elements relative to the primary (body 0).
    Elements(Elements),
    /// Absolute Cartesian position and velocity.
    Cartesian { x: NVec3, v: NVec3 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct BodySpec {
    pub name: String,
    pub mass: f64,
    pub state: InitialState,
}

pub trait Propagator {
    /// Add a body after the existing ones and return its stable id.
    fn add(&mut self, spec: &BodySpec) -> Result<BodyId>;

    /// Integrate forward to exactly `target_time`. Never moves backwards.
    fn advance(&mut self, target_time: f64) -> Result<()>;

    fn time(&self) -> f64;

    /// Orbits of every body except `primary`, relative to it, in body order.
    fn orbits(&self, primary: usize) -> Result<Vec<Orbit>>;

    /// Remove the body at `index`. Later bodies shift down by one.
    fn remove(&mut self, index: usize) -> Result<BodyId>;

    /// Freeze the number of gravitating bodies. Allowed once.
    fn set_active_count(&mut self, n_active: usize) -> Result<()>;

    fn active_count(&self) -> Option<usize>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn index_of(&self, id: BodyId) -> Option<usize>;

    fn mass(&self, index: usize) -> Option<f64>;

    /// Persist a full snapshot every `interval` of simulated time, starting
    /// now.
    fn persist(&mut self, path: &Path, interval: f64, overwrite: bool) -> Result<()>;
}

struct SnapshotSchedule {
    writer: ArchiveWriter,
    start: f64,
    interval: f64,
    count: u64,
}

impl SnapshotSchedule {
    /// Exact multiples of the interval avoid accumulated drift.
    fn next_time(&self) -> f64 {
        self.start + self.count as f64 * self.interval
    }
}

/// Direct-summation propagator with a fixed-step symplectic integrator.
pub struct NBodyPropagator {
    system: System3,
    forces: AccelSet3,
    parameters: Parameters,
    next_id: u32,
    archive: Option<SnapshotSchedule>,
}

impl NBodyPropagator {
    pub fn new(parameters: Parameters) -> Result<Self> {
        if !(parameters.dt > 0.0) || !parameters.dt.is_finite() {
            return Err(SimError::config(format!(
                "integrator dt must be positive, got {}",
                parameters.dt
            )));
        }
        let forces = AccelSet3::new().with(NewtonianGravity3 {
            G: parameters.G,
            eps2: parameters.eps2,
        });
        Ok(Self {
            system: System3::new(),
            forces,
            parameters,
            next_id: 0,
            archive: None,
        })
    }

    pub fn system(&self) -> &System3 {
        &self.system
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    fn time_eps(&self, t: f64) -> f64 {
        1.0e-12 * t.abs().max(1.0)
    }

    fn write_due_snapshots(&mut self) -> Result<()> {
        let t = self.system.t;
        let eps = self.time_eps(t);
        if let Some(schedule) = self.archive.as_mut() {
            if schedule.next_time() <= t + eps {
                schedule.writer.append(&Snapshot::capture(&self.system))?;
                // Skip any slots already behind us (e.g. resumed mid-interval)
                while schedule.next_time() <= t + eps {
                    schedule.count += 1;
                }
            }
        }
        Ok(())
    }
}

impl Propagator for NBodyPropagator {
    fn add(&mut self, spec: &BodySpec) -> Result<BodyId> {
        if !(spec.mass >= 0.0) || !spec.mass.is_finite() {
            return Err(SimError::config(format!(
                "body {} has invalid mass {}",
                spec.name, spec.mass
            )));
        }
        let (x, v) = match &spec.state {
            InitialState::Origin => (NVec3::zeros(), NVec3::zeros()),
            InitialState::Cartesian { x, v } => (*x, *v),
            InitialState::Elements(elements) => {
                let primary = self.system.bodies.first().ok_or_else(|| {
                    SimError::config(format!(
                        "body {} is given by orbital elements but no primary exists",
                        spec.name
                    ))
                })?;
                let mu = self.parameters.G * (primary.m + spec.mass);
                let (r, u) = elements.to_relative_state(mu)?;
                (primary.x + r, primary.v + u)
            }
        };

        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.system.bodies.push(Body3 {
            id,
            name: spec.name.clone(),
            x,
            v,
            m: spec.mass,
        });
        Ok(id)
    }

    fn advance(&mut self, target_time: f64) -> Result<()> {
        let t0 = self.system.t;
        if target_time < t0 - self.time_eps(t0) {
            return Err(SimError::config(format!(
                "cannot advance backwards from t = {t0} to t = {target_time}"
            )));
        }

        self.write_due_snapshots()?;
        let mut steps = 0u64;
        while self.system.t < target_time {
            let mut stop = target_time;
            if let Some(schedule) = &self.archive {
                stop = stop.min(schedule.next_time());
            }
            let h = (stop - self.system.t).min(self.parameters.dt);
            integrator::step(&mut self.system, &self.forces, &self.parameters.method, h);
            steps += 1;

            if stop - self.system.t <= self.time_eps(stop) {
                self.system.t = stop;
            }
            if !self.system.is_finite() {
                return Err(SimError::PropagatorFailure {
                    time: self.system.t,
                    last_sampled: None,
                    reason: "non-finite body state".to_string(),
                });
            }
            self.write_due_snapshots()?;
        }
        debug!("advanced to t = {} in {steps} steps", self.system.t);
        Ok(())
    }

    fn time(&self) -> f64 {
        self.system.t
    }

    fn orbits(&self, primary: usize) -> Result<Vec<Orbit>> {
        let p = self.system.bodies.get(primary).ok_or_else(|| {
            SimError::config(format!("primary index {primary} is out of range"))
        })?;
        Ok(self
            .system
            .bodies
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != primary)
            .map(|(_, b)| {
                let mu = self.parameters.G * (p.m + b.m);
                Orbit::from_relative_state(&(b.x - p.x), &(b.v - p.v), mu)
            })
            .collect())
    }

    fn remove(&mut self, index: usize) -> Result<BodyId> {
        if index >= self.system.bodies.len() {
            return Err(SimError::config(format!(
                "cannot remove body {index}, only {} present",
                self.system.bodies.len()
            )));
        }
        let removed = self.system.bodies.remove(index);
        if let Some(n) = self.system.n_active.as_mut() {
            if index < *n {
                *n -= 1;
            }
        }
        Ok(removed.id)
    }

    fn set_active_count(&mut self, n_active: usize) -> Result<()> {
        if self.system.n_active.is_some() {
            return Err(SimError::config("active count has already been set"));
        }
        if n_active == 0 || n_active > self.system.bodies.len() {
            return Err(SimError::config(format!(
                "active count {n_active} outside 1..={}",
                self.system.bodies.len()
            )));
        }
        self.system.n_active = Some(n_active);
        Ok(())
    }

    fn active_count(&self) -> Option<usize> {
        self.system.n_active
    }

    fn len(&self) -> usize {
        self.system.bodies.len()
    }

    fn index_of(&self, id: BodyId) -> Option<usize> {
        self.system.index_of(id)
    }

    fn mass(&self, index: usize) -> Option<f64> {
        self.system.bodies.get(index).map(|b| b.m)
    }

    fn persist(&mut self, path: &Path, interval: f64, overwrite: bool) -> Result<()> {
        if !(interval > 0.0) || !interval.is_finite() {
            return Err(SimError::config(format!(
                "archive interval must be positive, got {interval}"
            )));
        }
        let header = ArchiveHeader::new(self.parameters.G, interval);
        let writer = ArchiveWriter::open(path, &header, overwrite)?;
        self.archive = Some(SnapshotSchedule {
            writer,
            start: self.system.t,
            interval,
            count: 0,
        });
        Ok(())
    }
}
