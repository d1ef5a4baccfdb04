use crate::config::{DelayRange, SimulationConfig};
use crate::control_tower::{
    ControlTowerClient, ControlTowerError, LandingRequestHandler, TrackReleaseHandler,
};
use crate::events::{EventSink, SimEvent};
use crate::lifecycle::ShutdownSignal;
use crate::model::{TrackId, Vehicle, VehicleId, VehicleState};
use rand::rngs::StdRng;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// What a vehicle did once it got down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LandingRecord {
    pub vehicle: VehicleId,
    pub track: TrackId,
    /// Requests sent to the tower, the successful one included.
    pub attempts: u32,
}

/// How a vehicle's run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VehicleOutcome {
    /// Occupied and released a track.
    Landed(LandingRecord),
    /// Shutdown arrived before a track was granted.
    Aborted { vehicle: VehicleId, attempts: u32 },
}

/// Drives one vehicle through `Requesting → (Waiting ⇄ Requesting)* → Occupying → Released`.
///
/// # Loop
///
/// 1. Wait the approach delay.
/// 2. Ask the tower for any free track.
/// 3. Granted: occupy it, release it, done.
/// 4. Refused: back off, go to 2. There is no retry limit.
///
/// Shutdown is honoured while approaching, while backing off and while occupying.
/// It is not checked between a grant and the start of occupancy, so a granted vehicle
/// always ends up `Released`.
pub struct VehicleSimulator {
    vehicle: Vehicle,
    requests: LandingRequestHandler,
    release: TrackReleaseHandler,
    approach: DelayRange,
    backoff: DelayRange,
    sink: Arc<dyn EventSink>,
    shutdown: ShutdownSignal,
    rng: StdRng,
    state: VehicleState,
}

impl VehicleSimulator {
    pub fn new(
        vehicle: Vehicle,
        tower: ControlTowerClient,
        config: &SimulationConfig,
        sink: Arc<dyn EventSink>,
        shutdown: ShutdownSignal,
        rng: StdRng,
    ) -> Self {
        Self {
            vehicle,
            requests: LandingRequestHandler::new(tower),
            release: TrackReleaseHandler::new(config.occupancy),
            approach: config.approach,
            backoff: config.backoff,
            sink,
            shutdown,
            rng,
            state: VehicleState::Requesting,
        }
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    pub async fn run(mut self) -> Result<VehicleOutcome, ControlTowerError> {
        info!(
            kind = %self.vehicle.kind,
            passengers = self.vehicle.passengers,
            "Approaching"
        );
        let approach = self.approach.sample(&mut self.rng);
        if !self.pause(approach).await {
            return Ok(self.aborted(0));
        }

        let mut attempts: u32 = 0;
        loop {
            attempts = attempts.saturating_add(1);
            self.enter(VehicleState::Requesting);

            match self.requests.handle().await? {
                Some(lease) => {
                    let track = lease.id().clone();
                    self.enter(VehicleState::Occupying(track.clone()));
                    self.release
                        .handle(lease, &mut self.rng, &mut self.shutdown)
                        .await?;
                    self.enter(VehicleState::Released(track.clone()));

                    return Ok(VehicleOutcome::Landed(LandingRecord {
                        vehicle: self.vehicle.id.clone(),
                        track,
                        attempts,
                    }));
                }
                None => {
                    self.enter(VehicleState::Waiting);
                    let backoff = self.backoff.sample(&mut self.rng);
                    if !self.pause(backoff).await {
                        return Ok(self.aborted(attempts));
                    }
                }
            }
        }
    }

    /// Sleeps for `delay`. Returns `false` if shutdown interrupted it.
    async fn pause(&mut self, delay: Duration) -> bool {
        if self.shutdown.is_requested() {
            return false;
        }
        if delay.is_zero() {
            return true;
        }
        tokio::select! {
            _ = tokio::time::sleep(delay) => true,
            _ = self.shutdown.requested() => false,
        }
    }

    fn enter(&mut self, state: VehicleState) {
        debug!(from = ?self.state, to = ?state, "State change");
        let vehicle = self.vehicle.id.clone();
        let event = match &state {
            VehicleState::Requesting => SimEvent::Requested { vehicle },
            VehicleState::Waiting => SimEvent::Waiting { vehicle },
            VehicleState::Occupying(track) => SimEvent::Occupying {
                vehicle,
                track: track.clone(),
            },
            VehicleState::Released(track) => SimEvent::Released {
                vehicle,
                track: track.clone(),
            },
        };
        self.state = state;
        self.sink.emit(event);
        if self.state.is_terminal() {
            info!("Landing complete");
        }
    }

    fn aborted(&self, attempts: u32) -> VehicleOutcome {
        info!(attempts, "Shutdown before landing");
        VehicleOutcome::Aborted {
            vehicle: self.vehicle.id.clone(),
            attempts,
        }
    }
}
