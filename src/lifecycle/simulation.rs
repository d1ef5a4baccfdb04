use crate::config::SimulationConfig;
use crate::control_tower::{self, ControlTowerClient};
use crate::events::EventSink;
use crate::lifecycle::{RunReport, ShutdownTrigger, SimulationError};
use crate::model::{Airport, Vehicle};
use crate::vehicle_actor::{VehicleOutcome, VehicleSimulator};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{error, info, info_span, warn, Instrument};

/// Runs one airport's worth of vehicles against its control tower.
///
/// `LandingSimulation` is responsible for:
/// - **Lifecycle Management**: spawning the tower actor and stopping it again
/// - **Fan-out**: one [`VehicleSimulator`] task per vehicle, all concurrent
/// - **Cancellation**: a shared [`ShutdownTrigger`] every vehicle listens to
///
/// # Example
///
/// ```ignore
/// let airport = Airport::new("Miami International airport", 2);
/// let sim = LandingSimulation::new(&airport, SimulationConfig::default(), Arc::new(TracingSink))?;
///
/// let report = sim.run(vehicles).await?;
/// sim.shutdown().await?;
/// ```
pub struct LandingSimulation {
    tower: ControlTowerClient,
    tower_handle: JoinHandle<()>,
    config: SimulationConfig,
    sink: Arc<dyn EventSink>,
    trigger: ShutdownTrigger,
}

impl LandingSimulation {
    /// Validates `config`, then starts the tower actor over the airport's tracks.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(
        airport: &Airport,
        config: SimulationConfig,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let (actor, tower) = control_tower::new(config.mailbox_capacity, airport.tracks.clone())?;
        info!(airport = %airport.name, tracks = actor.len(), "Control tower online");
        let tower_handle = tokio::spawn(actor.run());

        Ok(Self {
            tower,
            tower_handle,
            config,
            sink,
            trigger: ShutdownTrigger::new(),
        })
    }

    pub fn tower(&self) -> &ControlTowerClient {
        &self.tower
    }

    /// A handle that cancels the run from another task.
    pub fn cancel_handle(&self) -> ShutdownTrigger {
        self.trigger.clone()
    }

    /// Asks every vehicle to stop: waiting vehicles give up, occupying ones leave early.
    pub fn cancel(&self) {
        warn!("Cancelling simulation");
        self.trigger.trigger();
    }

    /// Flies every vehicle until each one has occupied and released a track.
    ///
    /// # Errors
    ///
    /// - `Vehicle` for the first vehicle whose tower exchange failed. Remaining vehicles
    ///   are aborted, which hands back any track they held.
    /// - `Cancelled` if [`cancel`](Self::cancel) was called before all vehicles landed.
    /// - `Join` if a vehicle task panicked.
    ///
    /// With zero tracks this never returns; bound it with a timeout if that matters.
    pub async fn run(&self, vehicles: Vec<Vehicle>) -> Result<RunReport, SimulationError> {
        info!(vehicles = vehicles.len(), "Starting run");
        let mut seeder = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut tasks = JoinSet::new();
        for vehicle in vehicles {
            let id = vehicle.id.clone();
            let span = info_span!("vehicle", id = %id);
            let simulator = VehicleSimulator::new(
                vehicle,
                self.tower.clone(),
                &self.config,
                self.sink.clone(),
                self.trigger.subscribe(),
                StdRng::seed_from_u64(seeder.gen()),
            );
            tasks.spawn(
                async move {
                    simulator
                        .run()
                        .await
                        .map_err(|source| SimulationError::Vehicle { vehicle: id, source })
                }
                .instrument(span),
            );
        }

        let mut report = RunReport::default();
        let mut aborted = 0usize;
        while let Some(joined) = tasks.join_next().await {
            match joined? {
                Ok(VehicleOutcome::Landed(record)) => report.records.push(record),
                Ok(VehicleOutcome::Aborted { .. }) => aborted += 1,
                Err(e) => {
                    error!(error = %e, "Vehicle failed, aborting run");
                    tasks.abort_all();
                    return Err(e);
                }
            }
        }

        if aborted > 0 || self.trigger.is_triggered() {
            warn!(landed = report.landed(), aborted, "Run cancelled");
            return Err(SimulationError::Cancelled);
        }
        info!(landed = report.landed(), "Run complete");
        Ok(report)
    }

    /// Stops the tower and waits for it to exit.
    pub async fn shutdown(self) -> Result<(), SimulationError> {
        info!("Shutting down control tower...");
        // The tower exits once its last client is gone; leases only hold weak handles.
        drop(self.tower);
        self.tower_handle.await?;
        info!("Control tower shutdown complete.");
        Ok(())
    }
}
