//! Error taxonomy shared by every stage of a campaign.
//!
//! Build-time and configuration errors are raised eagerly, before any
//! integration starts. Propagator failures abort a run wholesale. Archive
//! errors are reported per archive.

use std::path::PathBuf;

pub type Result<T, E = SimError> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum SimError {
    #[error("invalid unit conversion: {0}")]
    InvalidUnit(String),

    #[error("duplicate body name `{0}`")]
    DuplicateName(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    /// Numerical failure while advancing. `last_sampled` is the last output
    /// time that was fully recorded before the failure, if any.
    #[error("propagator failure at t = {time}: {reason} (last sampled t = {last_sampled:?})")]
    PropagatorFailure {
        time: f64,
        last_sampled: Option<f64>,
        reason: String,
    },

    #[error("archive {} is corrupt: {reason}", .path.display())]
    ArchiveCorrupt { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SimError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        SimError::Configuration(msg.into())
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        SimError::ArchiveCorrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
