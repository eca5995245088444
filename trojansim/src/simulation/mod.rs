pub mod states;
pub mod params;
pub mod forces;
pub mod integrator;
pub mod orbit;
pub mod units;
pub mod sampling;
pub mod propagator;
pub mod registry;
pub mod builder;
pub mod coorbital;
pub mod pruner;
pub mod runner;
pub mod scenario;
