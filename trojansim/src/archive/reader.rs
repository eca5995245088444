//! Read-only access to a closed archive.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::snapshot::{ArchiveHeader, Snapshot, ARCHIVE_FORMAT, ARCHIVE_VERSION};
use crate::error::{Result, SimError};

/// Ordered snapshots of one run.
#[derive(Debug, Clone)]
pub struct Archive {
    path: PathBuf,
    header: ArchiveHeader,
    snapshots: Vec<Snapshot>,
}

impl Archive {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);

        let mut header: Option<ArchiveHeader> = None;
        let mut snapshots = Vec::new();
        for (line_num, line) in reader.lines().enumerate() {
            let line = line
                .map_err(|e| SimError::corrupt(path, format!("line {}: {e}", line_num + 1)))?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if header.is_none() {
                let h: ArchiveHeader = serde_json::from_str(trimmed).map_err(|e| {
                    SimError::corrupt(path, format!("unreadable header: {e}"))
                })?;
                if h.format != ARCHIVE_FORMAT || h.version != ARCHIVE_VERSION {
                    return Err(SimError::corrupt(
                        path,
                        format!("unsupported archive {} v{}", h.format, h.version),
                    ));
                }
                header = Some(h);
                continue;
            }

            let snapshot: Snapshot = serde_json::from_str(trimmed).map_err(|e| {
                SimError::corrupt(path, format!("unreadable snapshot on line {}: {e}", line_num + 1))
            })?;
            snapshots.push(snapshot);
        }

        let header = header.ok_or_else(|| SimError::corrupt(path, "empty archive"))?;
        if snapshots.is_empty() {
            return Err(SimError::corrupt(path, "archive holds no snapshots"));
        }
        Ok(Self {
            path: path.to_path_buf(),
            header,
            snapshots,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&self) -> &ArchiveHeader {
        &self.header
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn tmin(&self) -> f64 {
        self.snapshots.first().map_or(0.0, |s| s.t)
    }

    pub fn tmax(&self) -> f64 {
        self.snapshots.last().map_or(0.0, |s| s.t)
    }

    pub fn snapshot(&self, i: usize) -> Option<&Snapshot> {
        self.snapshots.get(i)
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }
}
