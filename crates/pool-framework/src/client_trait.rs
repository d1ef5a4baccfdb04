//! # PoolAccess Trait
//!
//! Provides a common interface for domain-specific pool clients, adding default read
//! operations (`get`, `snapshot`, `busy_count`) built on top of a generic `PoolClient`.
use crate::{PoolClient, PoolEntity, PoolError};
use async_trait::async_trait;

/// Trait for domain clients that wrap a `PoolClient`.
///
/// Implementors supply the inner client and an error mapping; the read-side
/// operations come for free.
///
/// # Example
///
/// ```rust
/// use pool_framework::{PoolAccess, PoolClient, PoolEntity, PoolError};
///
/// #[derive(Clone, Debug)]
/// struct Gate { id: u32, busy: bool }
///
/// impl PoolEntity for Gate {
///     type Id = u32;
///     fn id(&self) -> &u32 { &self.id }
///     fn is_busy(&self) -> bool { self.busy }
///     fn set_busy(&mut self, busy: bool) { self.busy = busy; }
/// }
///
/// #[derive(Debug)]
/// struct GateError(String);
///
/// struct GateClient { inner: PoolClient<Gate> }
///
/// impl PoolAccess<Gate> for GateClient {
///     type Error = GateError;
///     fn inner(&self) -> &PoolClient<Gate> { &self.inner }
///     fn map_error(e: PoolError) -> GateError { GateError(e.to_string()) }
/// }
///
/// async fn usage(client: GateClient) {
///     // get(), snapshot() and busy_count() are provided automatically!
///     let _ = client.get(1).await;
///     let _ = client.busy_count().await;
/// }
/// ```
#[async_trait]
pub trait PoolAccess<T: PoolEntity>: Send + Sync {
    /// The domain-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic `PoolClient`.
    fn inner(&self) -> &PoolClient<T>;

    /// Map pool errors to the domain error type.
    fn map_error(e: PoolError) -> Self::Error;

    /// Fetch one resource by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Copy of every resource, in scan order.
    async fn snapshot(&self) -> Result<Vec<T>, Self::Error> {
        self.inner().snapshot().await.map_err(Self::map_error)
    }

    /// Number of resources currently reserved.
    async fn busy_count(&self) -> Result<usize, Self::Error> {
        let resources = self.snapshot().await?;
        Ok(resources.iter().filter(|r| r.is_busy()).count())
    }
}
