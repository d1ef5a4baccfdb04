//! The two operations a vehicle performs against the tower.
//!
//! Both are stateless apart from their configuration: neither retries, neither remembers
//! which vehicle called. Retrying is the vehicle's business.

use crate::config::DelayRange;
use crate::control_tower::{ControlTowerClient, ControlTowerError, TrackLease};
use crate::lifecycle::ShutdownSignal;
use rand::Rng;
use tracing::{debug, info};

/// One allocation attempt: claim the first free track, or learn that none is free.
#[derive(Clone)]
pub struct LandingRequestHandler {
    tower: ControlTowerClient,
}

impl LandingRequestHandler {
    pub fn new(tower: ControlTowerClient) -> Self {
        Self { tower }
    }

    pub async fn handle(&self) -> Result<Option<TrackLease>, ControlTowerError> {
        let lease = self.tower.request_track().await?;
        match &lease {
            Some(lease) => debug!(track = %lease.id(), "Track granted"),
            None => debug!("No track free"),
        }
        Ok(lease)
    }
}

/// Holds a granted track for a sampled occupancy time, then frees it.
#[derive(Debug, Clone, Copy)]
pub struct TrackReleaseHandler {
    occupancy: DelayRange,
}

impl TrackReleaseHandler {
    pub fn new(occupancy: DelayRange) -> Self {
        Self { occupancy }
    }

    /// Occupies the track, then releases it. Returns `Ok(true)` once the tower has
    /// confirmed the track is free.
    ///
    /// A shutdown request cuts the occupancy short; the track is still released.
    pub async fn handle<R: Rng>(
        &self,
        lease: TrackLease,
        rng: &mut R,
        shutdown: &mut ShutdownSignal,
    ) -> Result<bool, ControlTowerError> {
        let hold = self.occupancy.sample(rng);
        let track = lease.id().clone();
        debug!(%track, ?hold, "Occupying track");

        if !hold.is_zero() {
            tokio::select! {
                _ = tokio::time::sleep(hold) => {}
                _ = shutdown.requested() => info!(%track, "Shutdown requested, leaving track early"),
            }
        }

        lease.release().await?;
        Ok(true)
    }
}
