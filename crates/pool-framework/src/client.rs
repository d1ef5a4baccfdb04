//! # Pool Client
//!
//! This module defines the generic client for communicating with a `PoolActor`.

use crate::entity::PoolEntity;
use crate::error::PoolError;
use crate::lease::Lease;
use crate::message::PoolRequest;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `PoolActor`.
///
/// The `PoolClient<T>` forwards requests over a Tokio mpsc channel and awaits the answer on a
/// oneshot channel. It holds only a sender, so it is cheap to clone and can be handed to every
/// task that contends for the pool. The actor stops once the last clone is dropped.
#[derive(Clone)]
pub struct PoolClient<T: PoolEntity> {
    sender: mpsc::Sender<PoolRequest<T>>,
}

impl<T: PoolEntity> PoolClient<T> {
    pub fn new(sender: mpsc::Sender<PoolRequest<T>>) -> Self {
        Self { sender }
    }

    pub(crate) fn mailbox(&self) -> mpsc::WeakSender<PoolRequest<T>> {
        self.sender.downgrade()
    }

    /// Claims the first free resource in index order, or returns `None` when all are busy.
    ///
    /// The returned [`Lease`] must be released (or dropped) to free the resource again.
    pub async fn try_reserve_any(&self) -> Result<Option<Lease<T>>, PoolError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(PoolRequest::ReserveAny { respond_to })
            .await
            .map_err(|_| PoolError::ActorClosed)?;
        response.await.map_err(|_| PoolError::ActorDropped)?
    }

    /// Frees a resource by id.
    ///
    /// Prefer [`Lease::release`]; this id-based form exists for callers that track
    /// reservations themselves, and reports their mistakes as `UnknownResource` / `AlreadyFree`.
    pub async fn release(&self, id: T::Id) -> Result<(), PoolError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(PoolRequest::Release { id, respond_to })
            .await
            .map_err(|_| PoolError::ActorClosed)?;
        response.await.map_err(|_| PoolError::ActorDropped)?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, PoolError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(PoolRequest::Get { id, respond_to })
            .await
            .map_err(|_| PoolError::ActorClosed)?;
        response.await.map_err(|_| PoolError::ActorDropped)?
    }

    pub async fn snapshot(&self) -> Result<Vec<T>, PoolError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(PoolRequest::Snapshot { respond_to })
            .await
            .map_err(|_| PoolError::ActorClosed)?;
        response.await.map_err(|_| PoolError::ActorDropped)?
    }
}
