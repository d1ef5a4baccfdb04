//! # Pool Messages
//!
//! This module defines the message types exchanged between `PoolClient` and `PoolActor`.

use crate::entity::PoolEntity;
use crate::error::PoolError;
use crate::lease::Lease;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the pool actor.
pub type Response<T> = oneshot::Sender<Result<T, PoolError>>;

/// Message sent to the pool actor.
///
/// Reservation and release are the only two mutations; `Get` and `Snapshot` are reads.
/// Every variant carries its own `respond_to` channel, so a request and its answer are
/// always paired without any correlation ids.
///
/// - **ReserveAny**: Scan in index order and claim the first free resource, answered with a [`Lease`].
/// - **Release**: Free a specific resource by id.
/// - **Get**: Fetch one resource by id.
/// - **Snapshot**: Copy of every resource, in index order.
#[derive(Debug)]
pub enum PoolRequest<T: PoolEntity> {
    ReserveAny {
        respond_to: Response<Option<Lease<T>>>,
    },
    Release {
        id: T::Id,
        respond_to: Response<()>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Snapshot {
        respond_to: Response<Vec<T>>,
    },
}
