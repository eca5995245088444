//! Orbital-element time series from closed archives.
//!
//! Every body except the primary (the first body of each snapshot) is
//! reduced to its osculating elements relative to the primary. Archives are
//! independent read-only inputs, so a batch is processed in parallel and one
//! corrupt archive never aborts the others.

use std::path::{Path, PathBuf};

use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;

use super::reader::Archive;
use crate::error::{Result, SimError};
use crate::simulation::orbit::Orbit;
use crate::simulation::sampling::{linspace, uniform_interval};

#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    /// Allowed relative deviation of a snapshot gap from the mean gap
    pub interval_tolerance: f64,
    /// Reject archives whose body count changes between snapshots
    pub require_constant_body_count: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            interval_tolerance: 1.0e-6,
            require_constant_body_count: true,
        }
    }
}

/// Elements of every non-primary body at one snapshot, as parallel lists.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SnapshotElements {
    pub names: Vec<String>,
    pub a: Vec<f64>,
    pub e: Vec<f64>,
    pub inc_deg: Vec<f64>,
    pub omega: Vec<f64>,
    pub Omega: Vec<f64>,
    pub f: Vec<f64>,
    pub mean_longitude: Vec<f64>,
}

impl SnapshotElements {
    fn push(&mut self, name: &str, o: &Orbit) {
        self.names.push(name.to_string());
        self.a.push(o.a);
        self.e.push(o.e);
        self.inc_deg.push(o.inc.to_degrees());
        self.omega.push(o.omega);
        self.Omega.push(o.Omega);
        self.f.push(o.f);
        self.mean_longitude.push(o.mean_longitude);
    }

    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }
}

/// Time axis paired with per-snapshot elements for one archive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementSeries {
    pub times: Vec<f64>,
    pub snapshots: Vec<SnapshotElements>,
}

pub fn extract_archive(archive: &Archive, options: &ExtractOptions) -> Result<ElementSeries> {
    let snapshots = archive.snapshots();
    let times: Vec<f64> = snapshots.iter().map(|s| s.t).collect();
    uniform_interval(&times, options.interval_tolerance)
        .map_err(|reason| SimError::corrupt(archive.path(), reason))?;

    #[allow(non_snake_case)]
    let G = archive.header().G;
    let expected = snapshots[0].bodies.len();

    let mut out = Vec::with_capacity(snapshots.len());
    for (i, snap) in snapshots.iter().enumerate() {
        if options.require_constant_body_count && snap.bodies.len() != expected {
            return Err(SimError::corrupt(
                archive.path(),
                format!(
                    "snapshot {i} holds {} bodies, the first holds {expected}",
                    snap.bodies.len()
                ),
            ));
        }
        let Some(primary) = snap.bodies.first() else {
            return Err(SimError::corrupt(archive.path(), format!("snapshot {i} holds no bodies")));
        };

        let mut elements = SnapshotElements::default();
        for body in &snap.bodies[1..] {
            let r = body.position() - primary.position();
            let v = body.velocity() - primary.velocity();
            let orbit = Orbit::from_relative_state(&r, &v, G * (primary.m + body.m));
            elements.push(&body.name, &orbit);
        }
        out.push(elements);
    }

    Ok(ElementSeries {
        times: linspace(archive.tmin(), archive.tmax(), snapshots.len()),
        snapshots: out,
    })
}

pub fn extract_file(path: impl AsRef<Path>, options: &ExtractOptions) -> Result<ElementSeries> {
    let archive = Archive::open(path)?;
    let series = extract_archive(&archive, options)?;
    info!(
        "extracted {} snapshots from {} (t = {}..{})",
        archive.len(),
        archive.path().display(),
        archive.tmin(),
        archive.tmax()
    );
    Ok(series)
}

/// Extract several archives. Results keep the input order.
pub fn extract_many<P>(paths: &[P], options: &ExtractOptions) -> Vec<Result<ElementSeries>>
where
    P: AsRef<Path> + Sync,
{
    paths
        .par_iter()
        .map(|p| {
            let res = extract_file(p, options);
            if let Err(e) = &res {
                warn!("skipping {}: {e}", p.as_ref().display());
            }
            res
        })
        .collect()
}

/// Outcome for one archive of a batch. Exactly one of `series` and `error`
/// is set.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveReport {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<ElementSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ArchiveReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Like [`extract_many`], but pairs every outcome with its input path so a
/// failed archive keeps its slot in the output.
pub fn report_many<P>(paths: &[P], options: &ExtractOptions) -> Vec<ArchiveReport>
where
    P: AsRef<Path> + Sync,
{
    paths
        .iter()
        .zip(extract_many(paths, options))
        .map(|(p, res)| {
            let path = p.as_ref().to_path_buf();
            match res {
                Ok(series) => ArchiveReport {
                    path,
                    series: Some(series),
                    error: None,
                },
                Err(e) => ArchiveReport {
                    path,
                    series: None,
                    error: Some(e.to_string()),
                },
            }
        })
        .collect()
}
