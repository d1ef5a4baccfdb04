//! # Pool Errors
//!
//! This module defines the error type shared by the pool actor and its clients.
//! Transport failures and protocol misuse live in one enum so callers can match on
//! the exact cause.

/// Errors that can occur while talking to a `PoolActor`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("Pool actor closed")]
    ActorClosed,
    #[error("Pool actor dropped response channel")]
    ActorDropped,
    /// Two resources with the same id were handed to the pool at construction.
    #[error("Duplicate resource id: {0}")]
    DuplicateResource(String),
    /// Release of an id that is not part of the pool.
    #[error("Unknown resource: {0}")]
    UnknownResource(String),
    /// Release of a resource that is not reserved (double free).
    #[error("Resource already free: {0}")]
    AlreadyFree(String),
}

impl PoolError {
    /// True for the release-protocol violations (unknown id or double free).
    ///
    /// These indicate a bug in the caller and are never retried.
    pub fn is_invalid_release(&self) -> bool {
        matches!(
            self,
            PoolError::UnknownResource(_) | PoolError::AlreadyFree(_)
        )
    }
}
