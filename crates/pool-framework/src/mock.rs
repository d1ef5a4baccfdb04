//! # Mock Pool & Testing Guide
//!
//! `MockPool<T>` hands out a real `PoolClient<T>` whose requests are answered from a queue of
//! scripted expectations instead of a running `PoolActor`. It lets you test code that *uses*
//! the pool (retry loops, release handlers) deterministically, including failures that are
//! awkward to provoke against the real actor.
//!
//! ## When to use Mocks vs the Real Actor
//!
//! | Feature | MockPool | PoolActor |
//! |---------|----------|-----------|
//! | **Determinism** | Scripted answers | Subject to scheduler |
//! | **State** | None (expectations) | Real busy flags |
//! | **Error Injection** | Easy (`return_err`) | Only protocol misuse |
//! | **Use Case** | Logic *around* the client | The pool itself, full runs |
//!
//! ## Example
//!
//! ```rust
//! use pool_framework::mock::MockPool;
//! use pool_framework::{PoolEntity, PoolError};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Gate { id: u32, busy: bool }
//!
//! impl PoolEntity for Gate {
//!     type Id = u32;
//!     fn id(&self) -> &u32 { &self.id }
//!     fn is_busy(&self) -> bool { self.busy }
//!     fn set_busy(&mut self, busy: bool) { self.busy = busy; }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut pool = MockPool::<Gate>::new();
//!     pool.expect_reserve().return_ok(None);
//!     pool.expect_reserve().return_ok(Some(Gate { id: 7, busy: true }));
//!     pool.expect_release(7).return_err(PoolError::AlreadyFree("7".into()));
//!
//!     let client = pool.client();
//!     assert!(client.try_reserve_any().await.unwrap().is_none());
//!     let lease = client.try_reserve_any().await.unwrap().unwrap();
//!     assert_eq!(lease.item().id, 7);
//!     assert!(lease.release().await.is_err());
//!     pool.verify();
//! }
//! ```
//!
//! For step-by-step control (answer a request only when the test decides to), use the
//! lower-level [`create_mock_client`] with [`expect_reserve`] / [`expect_release`].

use crate::client::PoolClient;
use crate::entity::PoolEntity;
use crate::error::PoolError;
use crate::lease::Lease;
use crate::message::{PoolRequest, Response};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

enum Expectation<T: PoolEntity> {
    Reserve {
        response: Result<Option<T>, PoolError>,
    },
    Release {
        id: T::Id,
        response: Result<(), PoolError>,
    },
    Snapshot {
        response: Result<Vec<T>, PoolError>,
    },
}

/// A scripted stand-in for a `PoolActor`.
pub struct MockPool<T: PoolEntity> {
    client: PoolClient<T>,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: PoolEntity> MockPool<T> {
    /// Creates the mock and spawns its responder task.
    ///
    /// Must be called from within a Tokio runtime. A request that does not match the
    /// next expectation panics the responder, which surfaces in the test as `ActorDropped`.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<PoolRequest<T>>(32);
        let expectations: Arc<Mutex<VecDeque<Expectation<T>>>> =
            Arc::new(Mutex::new(VecDeque::new()));
        let exps = expectations.clone();
        // Leases handed out by the mock release back into the mock.
        let mailbox = sender.downgrade();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = exps.lock().unwrap().pop_front();
                match (request, next) {
                    (
                        PoolRequest::ReserveAny { respond_to },
                        Some(Expectation::Reserve { response }),
                    ) => {
                        let response =
                            response.map(|item| item.map(|i| Lease::new(i, mailbox.clone())));
                        let _ = respond_to.send(response);
                    }
                    (
                        PoolRequest::Release { id, respond_to },
                        Some(Expectation::Release {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "release for unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        PoolRequest::Snapshot { respond_to },
                        Some(Expectation::Snapshot { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: PoolClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> PoolClient<T> {
        self.client.clone()
    }

    /// Expects a `try_reserve_any` call.
    pub fn expect_reserve(&mut self) -> ReserveExpectationBuilder<T> {
        ReserveExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `release` call for `id`.
    pub fn expect_release(&mut self, id: T::Id) -> ReleaseExpectationBuilder<T> {
        ReleaseExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `snapshot` call.
    pub fn expect_snapshot(&mut self, resources: Vec<T>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Snapshot {
                response: Ok(resources),
            });
    }

    /// Panics if any expectation was not consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

impl<T: PoolEntity> Default for MockPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `try_reserve_any` expectations.
pub struct ReserveExpectationBuilder<T: PoolEntity> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: PoolEntity> ReserveExpectationBuilder<T> {
    pub fn return_ok(self, value: Option<T>) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: PoolError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Option<T>, PoolError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Reserve { response });
    }
}

/// Builder for `release` expectations.
pub struct ReleaseExpectationBuilder<T: PoolEntity> {
    id: T::Id,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: PoolEntity> ReleaseExpectationBuilder<T> {
    pub fn return_ok(self) {
        self.push(Ok(()));
    }

    pub fn return_err(self, error: PoolError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<(), PoolError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Release {
                id: self.id,
                response,
            });
    }
}

// =============================================================================
// LOW-LEVEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests land on.
///
/// The test plays the actor: it pulls requests off `receiver` and answers them whenever
/// it wants, which makes timing-sensitive paths (e.g. a requester cancelled mid-request)
/// reproducible.
pub fn create_mock_client<T: PoolEntity>(
    buffer_size: usize,
) -> (PoolClient<T>, mpsc::Receiver<PoolRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (PoolClient::new(sender), receiver)
}

/// Builds a lease on `item` that releases through `client`'s mailbox.
///
/// Lets a test answer a `ReserveAny` it pulled off the receiver by hand.
pub fn lease<T: PoolEntity>(client: &PoolClient<T>, item: T) -> Lease<T> {
    Lease::new(item, client.mailbox())
}

/// Waits for the next request and returns its responder if it is a `ReserveAny`.
pub async fn expect_reserve<T: PoolEntity>(
    receiver: &mut mpsc::Receiver<PoolRequest<T>>,
) -> Option<Response<Option<Lease<T>>>> {
    match receiver.recv().await {
        Some(PoolRequest::ReserveAny { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Waits for the next request and returns its id and responder if it is a `Release`.
pub async fn expect_release<T: PoolEntity>(
    receiver: &mut mpsc::Receiver<PoolRequest<T>>,
) -> Option<(T::Id, Response<()>)> {
    match receiver.recv().await {
        Some(PoolRequest::Release { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}
