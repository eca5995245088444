//! Append-only JSONL archive writer.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;

use super::snapshot::{ArchiveHeader, Snapshot};
use crate::error::Result;

/// Streaming writer for one run's archive.
pub struct ArchiveWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    written: usize,
}

impl ArchiveWriter {
    /// Open `path` for a run. `overwrite` truncates an existing file,
    /// otherwise snapshots are appended after the ones already there.
    pub fn open(path: impl AsRef<Path>, header: &ArchiveHeader, overwrite: bool) -> Result<Self> {
        let path = path.as_ref();
        let file = if overwrite {
            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)?
        } else {
            OpenOptions::new().create(true).append(true).open(path)?
        };
        let empty = file.metadata()?.len() == 0;

        let mut writer = Self {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
            written: 0,
        };
        if empty {
            writer.write_line(header)?;
        }
        info!(
            "archive {} opened ({}), interval {}",
            path.display(),
            if overwrite { "overwrite" } else { "append" },
            header.interval
        );
        Ok(writer)
    }

    fn write_line<T: serde::Serialize>(&mut self, record: &T) -> Result<()> {
        let json = serde_json::to_string(record).map_err(std::io::Error::from)?;
        writeln!(self.writer, "{}", json)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Append one snapshot and flush it to disk.
    pub fn append(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.write_line(snapshot)?;
        self.written += 1;
        Ok(())
    }

    /// Snapshots written by this writer (not counting pre-existing ones).
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
