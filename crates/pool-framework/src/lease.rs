//! # Leases
//!
//! A [`Lease`] is the owned proof that a resource was reserved. The pool actor creates it
//! and sends it back as the answer to `ReserveAny`; from then on, whoever holds the lease is
//! responsible for the resource.
//!
//! Releasing is normally explicit ([`Lease::release`]), which reports the pool's answer. A
//! lease that is dropped without being released (its task was aborted mid-occupancy, the
//! holder panicked, or the reply was never even read) queues the release on its own, so a
//! resource is never left busy by a cancelled holder.

use crate::entity::PoolEntity;
use crate::error::PoolError;
use crate::message::PoolRequest;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// Owned reservation of one pool resource.
///
/// Holds only a weak handle to the pool, so outstanding leases do not keep the actor alive.
#[derive(Debug)]
pub struct Lease<T: PoolEntity> {
    item: T,
    pool: mpsc::WeakSender<PoolRequest<T>>,
    released: bool,
}

impl<T: PoolEntity> Lease<T> {
    pub(crate) fn new(item: T, pool: mpsc::WeakSender<PoolRequest<T>>) -> Self {
        Self {
            item,
            pool,
            released: false,
        }
    }

    /// The reserved resource, as it was at reservation time.
    pub fn item(&self) -> &T {
        &self.item
    }

    pub fn id(&self) -> &T::Id {
        self.item.id()
    }

    /// Gives the resource back and waits for the pool to confirm.
    ///
    /// Once the request is in the pool's mailbox the lease counts as released, even if
    /// this future is dropped before the answer arrives.
    pub async fn release(mut self) -> Result<(), PoolError> {
        let Some(sender) = self.pool.upgrade() else {
            self.released = true;
            return Err(PoolError::ActorClosed);
        };
        let permit = sender.reserve().await;
        self.released = true;

        let permit = permit.map_err(|_| PoolError::ActorClosed)?;
        let (respond_to, response) = oneshot::channel();
        permit.send(PoolRequest::Release {
            id: self.item.id().clone(),
            respond_to,
        });
        response.await.map_err(|_| PoolError::ActorDropped)?
    }

    /// Turns the lease off without releasing. The pool uses this when it rolls a
    /// reservation back itself.
    pub(crate) fn disarm(mut self) {
        self.released = true;
    }
}

impl<T: PoolEntity> Drop for Lease<T> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let Some(sender) = self.pool.upgrade() else {
            debug!(id = %self.item.id(), "Pool gone, nothing to release");
            return;
        };
        warn!(id = %self.item.id(), "Lease dropped while held, releasing");

        let (respond_to, _response) = oneshot::channel();
        let request = PoolRequest::Release {
            id: self.item.id().clone(),
            respond_to,
        };
        match sender.try_send(request) {
            Ok(()) | Err(TrySendError::Closed(_)) => {}
            Err(TrySendError::Full(request)) => match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    handle.spawn(async move {
                        let _ = sender.send(request).await;
                    });
                }
                Err(_) => warn!(id = %self.item.id(), "No runtime, release lost"),
            },
        }
    }
}
