//! # Pool Actor
//!
//! This module defines the `PoolActor`, the single owner of a fixed, ordered set of exclusive
//! resources. It implements the "Server" side of the Actor Model: requests arrive on a
//! channel and are processed one at a time, so the scan-and-reserve step can never
//! interleave with another reservation or release.

use crate::client::PoolClient;
use crate::entity::PoolEntity;
use crate::error::PoolError;
use crate::lease::Lease;
use crate::message::PoolRequest;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that owns a pool of exclusive resources.
///
/// # Architecture Note
/// This struct is the "Server" half of the pool. It owns the resources and the receiver
/// end of the channel.
///
/// **Concurrency Model**:
/// Any number of callers may hold a `PoolClient` and fire requests concurrently, but the
/// actor handles them *sequentially* in its loop. The check-and-set of a busy flag is
/// therefore indivisible with respect to every other caller, without a `Mutex`.
///
/// # Operations
///
/// * **ReserveAny**:
///     1. Scans resources in index (creation) order.
///     2. Flips the first free one to busy.
///     3. Replies with a [`Lease`] on it, or `None` when everything is busy.
///     4. If the requester is gone before the reply lands, the flip is undone.
///        If it vanishes after, the unread lease releases itself on drop.
///
/// * **Release**:
///     1. Looks the resource up by id.
///     2. Fails with `UnknownResource` or `AlreadyFree` on misuse.
///     3. Otherwise clears the busy flag.
///
/// * **Get** / **Snapshot**: read-only copies.
pub struct PoolActor<T: PoolEntity> {
    receiver: mpsc::Receiver<PoolRequest<T>>,
    // Weak, so the actor still stops once every client is gone.
    mailbox: mpsc::WeakSender<PoolRequest<T>>,
    resources: Vec<T>,
}

impl<T: PoolEntity> PoolActor<T> {
    /// Creates a new `PoolActor` over `resources` and its associated `PoolClient`.
    ///
    /// The order of `resources` is the scan order for the lifetime of the pool.
    /// Every resource starts free regardless of the flag it was handed in with.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::DuplicateResource` if two resources share an id.
    pub fn new(
        buffer_size: usize,
        resources: impl IntoIterator<Item = T>,
    ) -> Result<(Self, PoolClient<T>), PoolError> {
        let mut owned: Vec<T> = Vec::new();
        for mut resource in resources {
            if owned.iter().any(|r| r.id() == resource.id()) {
                return Err(PoolError::DuplicateResource(resource.id().to_string()));
            }
            resource.set_busy(false);
            owned.push(resource);
        }

        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            mailbox: sender.downgrade(),
            resources: owned,
        };
        Ok((actor, PoolClient::new(sender)))
    }

    /// Number of resources in the pool.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Runs the actor's event loop until every client has been dropped.
    pub async fn run(mut self) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, size = self.resources.len(), "Pool started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                PoolRequest::ReserveAny { respond_to } => {
                    let Some(index) = self.reserve_first_free() else {
                        debug!(entity_type, "ReserveAny: pool exhausted");
                        let _ = respond_to.send(Ok(None));
                        continue;
                    };
                    let item = self.resources[index].clone();
                    let id = item.id().clone();
                    info!(entity_type, %id, busy = self.busy_count(), "Reserved");

                    let lease = Lease::new(item, self.mailbox.clone());
                    // Requester cancelled while waiting for us: undo, or the resource leaks.
                    if let Err(Ok(Some(lease))) = respond_to.send(Ok(Some(lease))) {
                        lease.disarm();
                        self.resources[index].set_busy(false);
                        warn!(entity_type, %id, "Requester gone, reservation rolled back");
                    }
                }
                PoolRequest::Release { id, respond_to } => {
                    let result = self.release_by_id(&id);
                    match &result {
                        Ok(()) => info!(entity_type, %id, busy = self.busy_count(), "Released"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Release rejected"),
                    }
                    let _ = respond_to.send(result);
                }
                PoolRequest::Get { id, respond_to } => {
                    let item = self.resources.iter().find(|r| r.id() == &id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                PoolRequest::Snapshot { respond_to } => {
                    debug!(entity_type, "Snapshot");
                    let _ = respond_to.send(Ok(self.resources.clone()));
                }
            }
        }

        info!(entity_type, busy = self.busy_count(), "Pool shutdown");
    }

    /// First-available-wins: claims the lowest-index free resource.
    fn reserve_first_free(&mut self) -> Option<usize> {
        let index = self.resources.iter().position(|r| r.is_free())?;
        self.resources[index].set_busy(true);
        Some(index)
    }

    fn release_by_id(&mut self, id: &T::Id) -> Result<(), PoolError> {
        let resource = self
            .resources
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| PoolError::UnknownResource(id.to_string()))?;
        if resource.is_free() {
            return Err(PoolError::AlreadyFree(id.to_string()));
        }
        resource.set_busy(false);
        Ok(())
    }

    fn busy_count(&self) -> usize {
        self.resources.iter().filter(|r| r.is_busy()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Slot {
        name: String,
        busy: bool,
    }

    impl Slot {
        fn new(name: &str) -> Self {
            Self {
                name: name.to_string(),
                busy: false,
            }
        }
    }

    impl PoolEntity for Slot {
        type Id = String;

        fn id(&self) -> &String {
            &self.name
        }

        fn is_busy(&self) -> bool {
            self.busy
        }

        fn set_busy(&mut self, busy: bool) {
            self.busy = busy;
        }
    }

    fn slots(n: usize) -> Vec<Slot> {
        (1..=n).map(|i| Slot::new(&format!("S{}", i))).collect()
    }

    #[test]
    fn test_new_rejects_duplicate_ids() {
        let result = PoolActor::new(4, vec![Slot::new("S1"), Slot::new("S1")]);
        assert!(matches!(result, Err(PoolError::DuplicateResource(id)) if id == "S1"));
    }

    #[test]
    fn test_new_clears_incoming_busy_flags() {
        let mut busy = Slot::new("S1");
        busy.busy = true;
        let (actor, _client) = PoolActor::new(4, vec![busy]).unwrap();
        assert_eq!(actor.busy_count(), 0);
    }

    #[test]
    fn test_reserve_scans_in_index_order() {
        let (mut actor, _client) = PoolActor::new(4, slots(3)).unwrap();
        assert_eq!(actor.reserve_first_free(), Some(0));
        assert_eq!(actor.reserve_first_free(), Some(1));
        assert_eq!(actor.reserve_first_free(), Some(2));
        assert_eq!(actor.reserve_first_free(), None);
    }

    #[test]
    fn test_reserve_reuses_lowest_freed_slot() {
        let (mut actor, _client) = PoolActor::new(4, slots(3)).unwrap();
        for _ in 0..3 {
            actor.reserve_first_free();
        }
        actor.release_by_id(&"S3".to_string()).unwrap();
        actor.release_by_id(&"S2".to_string()).unwrap();
        assert_eq!(actor.reserve_first_free(), Some(1));
    }

    #[test]
    fn test_release_misuse() {
        let (mut actor, _client) = PoolActor::new(4, slots(1)).unwrap();
        assert_eq!(
            actor.release_by_id(&"S9".to_string()),
            Err(PoolError::UnknownResource("S9".into()))
        );
        assert_eq!(
            actor.release_by_id(&"S1".to_string()),
            Err(PoolError::AlreadyFree("S1".into()))
        );
    }

    proptest! {
        /// Replays random reserve/release sequences against a plain model:
        /// a reservation always returns the lowest free index and never one that is held.
        #[test]
        fn prop_reservations_never_overlap(
            size in 0usize..6,
            ops in proptest::collection::vec(any::<Option<u8>>(), 0..64),
        ) {
            let (mut actor, _client) = PoolActor::new(4, slots(size)).unwrap();
            let mut held = vec![false; size];

            for op in ops {
                match op {
                    None => {
                        let expected = held.iter().position(|h| !h);
                        let got = actor.reserve_first_free();
                        prop_assert_eq!(got, expected);
                        if let Some(i) = got {
                            held[i] = true;
                        }
                    }
                    Some(raw) if size > 0 => {
                        let i = raw as usize % size;
                        let id = format!("S{}", i + 1);
                        let result = actor.release_by_id(&id);
                        if held[i] {
                            prop_assert_eq!(result, Ok(()));
                            held[i] = false;
                        } else {
                            prop_assert_eq!(result, Err(PoolError::AlreadyFree(id)));
                        }
                    }
                    Some(_) => {}
                }
                prop_assert_eq!(actor.busy_count(), held.iter().filter(|h| **h).count());
            }
        }
    }
}
