//! # Vehicle Actor
//!
//! One [`VehicleSimulator`] per vehicle, each running in its own Tokio task. A simulator
//! owns nothing shared except its clone of the tower client, so vehicles never coordinate
//! with each other directly: the tower's mailbox is the only place they meet.

pub mod simulator;

pub use simulator::{LandingRecord, VehicleOutcome, VehicleSimulator};
