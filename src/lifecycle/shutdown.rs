//! Cooperative cancellation for a run.
//!
//! One [`ShutdownTrigger`] per simulation, one [`ShutdownSignal`] per vehicle. Vehicles
//! check the signal while backing off and while occupying a track, so a cancelled run
//! winds down with every track handed back.

use std::sync::Arc;
use tokio::sync::watch;

/// The sending half. Cheap to clone; triggering is idempotent.
#[derive(Debug, Clone)]
pub struct ShutdownTrigger {
    sender: Arc<watch::Sender<bool>>,
}

impl ShutdownTrigger {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn trigger(&self) {
        self.sender.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.sender.borrow()
    }

    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            receiver: self.sender.subscribe(),
        }
    }
}

impl Default for ShutdownTrigger {
    fn default() -> Self {
        Self::new()
    }
}

/// The receiving half held by each vehicle.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    receiver: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// A signal that never fires.
    pub fn never() -> Self {
        let (_, receiver) = watch::channel(false);
        Self { receiver }
    }

    pub fn is_requested(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolves once shutdown has been requested. Pends forever if the trigger is gone
    /// without ever firing.
    pub async fn requested(&mut self) {
        let closed = self.receiver.wait_for(|requested| *requested).await.is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }
}
