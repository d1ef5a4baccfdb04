//! # Control Tower
//!
//! The control tower is the pool of landing tracks: a [`PoolActor`] over [`LandingTrack`]s
//! plus the domain client and the two stateless handlers vehicles use to talk to it.
//!
//! - [`LandingRequestHandler`]: one attempt to get any free track.
//! - [`TrackReleaseHandler`]: hold a track for the occupancy time, then give it back.

pub mod client;
pub mod error;
pub mod handlers;

pub use client::ControlTowerClient;
pub use error::ControlTowerError;
pub use handlers::{LandingRequestHandler, TrackReleaseHandler};

use crate::model::LandingTrack;
use pool_framework::{Lease, PoolActor};

/// A reserved landing track. Dropping it unreleased hands the track back to the tower.
pub type TrackLease = Lease<LandingTrack>;

/// Creates the tower actor and its client. The caller spawns `actor.run()`.
///
/// # Errors
///
/// `DuplicateTrack` if two tracks share an id.
pub fn new(
    mailbox_capacity: usize,
    tracks: Vec<LandingTrack>,
) -> Result<(PoolActor<LandingTrack>, ControlTowerClient), ControlTowerError> {
    let (actor, inner) = PoolActor::new(mailbox_capacity, tracks)?;
    Ok((actor, ControlTowerClient::new(inner)))
}
