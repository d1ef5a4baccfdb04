//! # Simulation Events
//!
//! The core never prints. Each vehicle reports its state transitions as [`SimEvent`]s to an
//! [`EventSink`], and whoever drives the run decides what to do with them: log them
//! ([`TracingSink`]), stream them to a renderer or a test ([`ChannelSink`]), or drop them
//! ([`NullSink`]).

use crate::model::{TrackId, VehicleId};
use tokio::sync::mpsc;
use tracing::info;

/// A state transition of one vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvent {
    /// The vehicle asked the tower for a track.
    Requested { vehicle: VehicleId },
    /// No track was free; the vehicle backs off before asking again.
    Waiting { vehicle: VehicleId },
    /// The vehicle holds `track`.
    Occupying { vehicle: VehicleId, track: TrackId },
    /// The vehicle gave `track` back to the pool.
    Released { vehicle: VehicleId, track: TrackId },
}

impl SimEvent {
    pub fn vehicle(&self) -> &VehicleId {
        match self {
            SimEvent::Requested { vehicle }
            | SimEvent::Waiting { vehicle }
            | SimEvent::Occupying { vehicle, .. }
            | SimEvent::Released { vehicle, .. } => vehicle,
        }
    }

    /// Stable machine-readable name of the event kind.
    pub fn name(&self) -> &'static str {
        match self {
            SimEvent::Requested { .. } => "actor_requested",
            SimEvent::Waiting { .. } => "actor_waiting",
            SimEvent::Occupying { .. } => "actor_occupying",
            SimEvent::Released { .. } => "actor_released",
        }
    }
}

/// Receiver of simulation events.
///
/// Called synchronously from vehicle tasks, so implementations must not block.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: SimEvent);
}

/// Records every event as a structured `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: SimEvent) {
        let kind = event.name();
        match &event {
            SimEvent::Requested { vehicle } => info!(kind, %vehicle, "Requesting a track"),
            SimEvent::Waiting { vehicle } => info!(kind, %vehicle, "No track available"),
            SimEvent::Occupying { vehicle, track } => {
                info!(kind, %vehicle, %track, "Landed")
            }
            SimEvent::Released { vehicle, track } => {
                info!(kind, %vehicle, %track, "Released the track")
            }
        }
    }
}

/// Forwards events into an unbounded Tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: mpsc::UnboundedSender<SimEvent>,
}

impl ChannelSink {
    /// Creates the sink and the receiving end.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SimEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: SimEvent) {
        // Receiver gone means nobody is listening any more; that is not the vehicle's problem.
        let _ = self.sender.send(event);
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: SimEvent) {}
}
