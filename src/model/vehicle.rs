//! A vehicle contending for a landing track.
//!
//! The passenger count is carried for reporting only; allocation never looks at it,
//! and both kinds go through exactly the same request/occupy/release path.
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for vehicles (`H1`, `P3`, …).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleId(pub String);

impl From<&str> for VehicleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for VehicleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Vehicle category. High-capacity `Plane`, low-capacity `Helicopter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleKind {
    Plane,
    Helicopter,
}

impl VehicleKind {
    /// Prefix used when numbering generated vehicles.
    pub fn prefix(&self) -> &'static str {
        match self {
            VehicleKind::Plane => "P",
            VehicleKind::Helicopter => "H",
        }
    }
}

impl Display for VehicleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VehicleKind::Plane => write!(f, "Plane"),
            VehicleKind::Helicopter => write!(f, "Helicopter"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub kind: VehicleKind,
    pub passengers: u32,
}

impl Vehicle {
    /// Creates a new Vehicle.
    ///
    /// # Arguments
    /// * `id` - Unique identifier within the fleet
    /// * `kind` - Plane or helicopter
    /// * `passengers` - Passengers on board (informational)
    pub fn new(id: impl Into<VehicleId>, kind: VehicleKind, passengers: u32) -> Self {
        Self {
            id: id.into(),
            kind,
            passengers,
        }
    }
}

/// The lifecycle of one vehicle during a run.
///
/// `Requesting → (Waiting ⇄ Requesting)* → Occupying → Released`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VehicleState {
    Requesting,
    Waiting,
    Occupying(crate::model::TrackId),
    Released(crate::model::TrackId),
}

impl VehicleState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, VehicleState::Released(_))
    }
}
