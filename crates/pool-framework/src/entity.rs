//! # PoolEntity Trait
//!
//! The `PoolEntity` trait defines the contract that every exclusive resource (a landing track,
//! a berth, a gate, …) must implement to be managed by the generic `PoolActor`. It specifies the
//! identifier type and the busy flag accessors the pool uses while scanning and releasing.
//!
//! # Architecture Note
//! The pool never inspects anything about an entity except its id and its busy flag.
//! Everything else (names, capacities, labels) is domain data that simply rides along,
//! so the same `PoolActor` logic serves any resource type.
//!
//! # Provided Methods
//! - [`PoolEntity::is_free`]
//!
//! You do **not** need to implement it; it is the negation of [`PoolEntity::is_busy`].

use std::fmt::{Debug, Display};

/// Trait that any exclusive resource must implement to be managed by `PoolActor`.
///
/// Entities are cloned out of the pool when handed to callers. The copy the caller
/// receives is a snapshot; the authoritative busy flag lives only inside the actor.
pub trait PoolEntity: Clone + Debug + Send + Sync + 'static {
    /// The unique identifier of the resource within its pool (e.g. `"T1"`).
    type Id: Eq + Clone + Send + Sync + Display + Debug;

    /// Returns this resource's identifier.
    fn id(&self) -> &Self::Id;

    /// Whether the resource is currently reserved.
    fn is_busy(&self) -> bool;

    /// Sets the reservation flag. Only the pool actor calls this.
    fn set_busy(&mut self, busy: bool);

    fn is_free(&self) -> bool {
        !self.is_busy()
    }
}
