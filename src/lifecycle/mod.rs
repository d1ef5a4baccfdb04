//! Wiring and teardown of a run: the [`LandingSimulation`] coordinator, its cancellation
//! signal, the run report, and logging setup.

pub mod error;
pub mod report;
pub mod shutdown;
pub mod simulation;
pub mod tracing;

pub use error::SimulationError;
pub use report::RunReport;
pub use shutdown::{ShutdownSignal, ShutdownTrigger};
pub use simulation::LandingSimulation;
pub use self::tracing::setup_tracing;
