pub mod error;
pub mod simulation;
pub mod configuration;
pub mod archive;

pub use error::{Result, SimError};

pub use simulation::states::{Body3, BodyId, System3, NVec3};
pub use simulation::forces::{Acceleration3, AccelSet3, NewtonianGravity3};
pub use simulation::integrator::{drift_kick_drift, kick_drift_kick};
pub use simulation::orbit::{Elements, Orbit};
pub use simulation::propagator::{BodySpec, InitialState, NBodyPropagator, Propagator};
pub use simulation::runner::{SampledSeries, SimulationRun, Tracking};
pub use simulation::pruner::{EscapePolicy, RemovedBody};
pub use simulation::coorbital::CoorbitalPlacement;
pub use simulation::scenario::Scenario;

pub use configuration::config::{IntegratorConfig, BodyConfig, ScenarioConfig};

pub use archive::reader::Archive;
pub use archive::extract::{
    extract_archive, extract_file, extract_many, report_many, ArchiveReport, ElementSeries, ExtractOptions,
};
