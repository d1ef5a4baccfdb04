use crate::control_tower::{ControlTowerError, TrackLease};
use crate::model::{LandingTrack, TrackId};
use async_trait::async_trait;
use pool_framework::{PoolAccess, PoolClient, PoolError};
use tracing::{debug, instrument};

/// Client for the control tower.
///
/// Cloned into every vehicle task; all clones feed the same tower mailbox.
#[derive(Clone)]
pub struct ControlTowerClient {
    inner: PoolClient<LandingTrack>,
}

impl ControlTowerClient {
    pub fn new(inner: PoolClient<LandingTrack>) -> Self {
        Self { inner }
    }

    /// Asks for any free track. `None` means every track is taken right now.
    #[instrument(skip(self))]
    pub async fn request_track(&self) -> Result<Option<TrackLease>, ControlTowerError> {
        debug!("Sending request_track to tower");
        Ok(self.inner.try_reserve_any().await?)
    }

    /// Frees `track` by id.
    ///
    /// Vehicles release through their [`TrackLease`]; this is the bookkeeping path, and it
    /// reports `UnknownTrack` / `TrackAlreadyFree` for ids the caller does not hold.
    #[instrument(skip(self))]
    pub async fn release_track(&self, track: TrackId) -> Result<(), ControlTowerError> {
        debug!("Sending release_track to tower");
        Ok(self.inner.release(track).await?)
    }

    /// Ids of the tracks that are free right now, in scan order.
    pub async fn free_tracks(&self) -> Result<Vec<TrackId>, ControlTowerError> {
        let tracks = self.snapshot().await?;
        Ok(tracks.into_iter().filter(|t| !t.busy).map(|t| t.id).collect())
    }
}

#[async_trait]
impl PoolAccess<LandingTrack> for ControlTowerClient {
    type Error = ControlTowerError;

    fn inner(&self) -> &PoolClient<LandingTrack> {
        &self.inner
    }

    fn map_error(e: PoolError) -> Self::Error {
        e.into()
    }
}
