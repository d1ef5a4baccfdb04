//! # Pool Framework
//!
//! This crate provides a small, type-safe building block for exclusive resource pools:
//! a fixed, ordered set of resources that concurrent tasks reserve one at a time and
//! release when done. It is built on the **Actor Model**, the same way a resource actor
//! owns its store: one task owns every busy flag, everyone else talks to it through a client.
//!
//! ## Why an Actor?
//!
//! - The scan-for-a-free-slot and the flip-to-busy must be one indivisible step.
//! - An actor processes one message at a time, so that step is indivisible by construction.
//! - No `Mutex` is shared between callers and no lock is ever held across an `.await`.
//!
//! ## Architecture Layers
//!
//! 1. **Entity Layer** ([`PoolEntity`]) - What a resource looks like to the pool (id + busy flag)
//! 2. **Runtime Layer** ([`PoolActor`]) - Message processing and the allocation policy
//! 3. **Interface Layer** ([`PoolClient`], [`PoolAccess`]) - Type-safe communication
//!
//! ## Allocation Policy
//!
//! First-available-wins: `ReserveAny` scans in creation order and takes the lowest-index
//! free resource. There is no queueing of waiters and no fairness; callers that get `None`
//! decide for themselves when to ask again.
//!
//! ```rust
//! use pool_framework::{PoolActor, PoolEntity};
//!
//! #[derive(Clone, Debug)]
//! struct Track { name: String, busy: bool }
//!
//! impl PoolEntity for Track {
//!     type Id = String;
//!     fn id(&self) -> &String { &self.name }
//!     fn is_busy(&self) -> bool { self.busy }
//!     fn set_busy(&mut self, busy: bool) { self.busy = busy; }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let tracks = ["T1", "T2"].map(|n| Track { name: n.into(), busy: false });
//!     let (actor, client) = PoolActor::new(8, tracks).unwrap();
//!     tokio::spawn(actor.run());
//!
//!     let first = client.try_reserve_any().await.unwrap().unwrap();
//!     assert_eq!(first.item().name, "T1");
//!     first.release().await.unwrap();
//! }
//! ```
//!
//! ## Leases
//!
//! A successful reservation is a [`Lease`]. Releasing it is explicit and awaited; dropping
//! it unreleased (an aborted task, a panic) still hands the resource back, so cancelling a
//! holder can never leave a resource busy forever.
//!
//! ## Misuse Detection
//!
//! Releasing an unknown id or an already-free resource is reported as
//! [`PoolError::UnknownResource`] / [`PoolError::AlreadyFree`] rather than ignored:
//! both mean the caller's bookkeeping is broken.
//!
//! ## Testing
//!
//! See the [`mock`] module for a scripted client that needs no running actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod lease;
pub mod message;
pub mod mock;

pub use actor::PoolActor;
pub use client::PoolClient;
pub use client_trait::PoolAccess;
pub use entity::PoolEntity;
pub use error::PoolError;
pub use lease::Lease;
pub use message::{PoolRequest, Response};
