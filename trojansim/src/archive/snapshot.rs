//! Persisted snapshot records.

use serde::{Deserialize, Serialize};

use crate::simulation::states::{Body3, BodyId, NVec3, System3};

pub const ARCHIVE_FORMAT: &str = "trojansim-archive";
pub const ARCHIVE_VERSION: u32 = 1;

/// First line of every archive file.
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveHeader {
    pub format: String,
    pub version: u32,
    /// Gravitational constant the run was integrated with
    pub G: f64,
    /// Simulated time between snapshots
    pub interval: f64,
}

impl ArchiveHeader {
    #[allow(non_snake_case)]
    pub fn new(G: f64, interval: f64) -> Self {
        Self {
            format: ARCHIVE_FORMAT.to_string(),
            version: ARCHIVE_VERSION,
            G,
            interval,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub id: BodyId,
    pub name: String,
    pub m: f64,
    pub x: [f64; 3],
    pub v: [f64; 3],
}

impl BodySnapshot {
    pub fn position(&self) -> NVec3 {
        NVec3::from(self.x)
    }

    pub fn velocity(&self) -> NVec3 {
        NVec3::from(self.v)
    }
}

impl From<&Body3> for BodySnapshot {
    fn from(b: &Body3) -> Self {
        Self {
            id: b.id,
            name: b.name.clone(),
            m: b.m,
            x: [b.x.x, b.x.y, b.x.z],
            v: [b.v.x, b.v.y, b.v.z],
        }
    }
}

/// Full body state at one instant. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub t: f64,
    pub n_active: usize,
    pub bodies: Vec<BodySnapshot>,
}

impl Snapshot {
    pub fn capture(sys: &System3) -> Self {
        Self {
            t: sys.t,
            n_active: sys.active_len(),
            bodies: sys.bodies.iter().map(BodySnapshot::from).collect(),
        }
    }
}
