use crate::config::ConfigError;
use crate::control_tower::ControlTowerError;
use crate::model::VehicleId;
use thiserror::Error;

/// Errors that end a simulation run.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The tower could not be built (duplicate track ids).
    #[error("Control tower setup failed: {0}")]
    Tower(#[from] ControlTowerError),

    /// A vehicle's exchange with the tower failed. The first such failure ends the run.
    #[error("Vehicle {vehicle} failed: {source}")]
    Vehicle {
        vehicle: VehicleId,
        #[source]
        source: ControlTowerError,
    },

    /// The run was cancelled before every vehicle landed.
    #[error("Simulation cancelled")]
    Cancelled,

    /// A vehicle or tower task panicked.
    #[error("Task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
