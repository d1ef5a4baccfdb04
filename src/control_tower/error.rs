//! Error types for the control tower.

use pool_framework::PoolError;
use thiserror::Error;

/// Errors that can occur while requesting or releasing landing tracks.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ControlTowerError {
    /// Release of a track that is not part of the airport.
    #[error("Unknown track: {0}")]
    UnknownTrack(String),

    /// Release of a track nobody holds.
    #[error("Track already free: {0}")]
    TrackAlreadyFree(String),

    #[error("Duplicate track: {0}")]
    DuplicateTrack(String),

    /// The tower actor is gone (shut down or panicked).
    #[error("Control tower unavailable: {0}")]
    TowerUnavailable(#[source] PoolError),
}

impl ControlTowerError {
    /// True when the caller released something it did not hold.
    pub fn is_invalid_release(&self) -> bool {
        matches!(
            self,
            ControlTowerError::UnknownTrack(_) | ControlTowerError::TrackAlreadyFree(_)
        )
    }
}

impl From<PoolError> for ControlTowerError {
    fn from(e: PoolError) -> Self {
        match e {
            PoolError::UnknownResource(id) => ControlTowerError::UnknownTrack(id),
            PoolError::AlreadyFree(id) => ControlTowerError::TrackAlreadyFree(id),
            PoolError::DuplicateResource(id) => ControlTowerError::DuplicateTrack(id),
            transport @ (PoolError::ActorClosed | PoolError::ActorDropped) => {
                ControlTowerError::TowerUnavailable(transport)
            }
        }
    }
}
