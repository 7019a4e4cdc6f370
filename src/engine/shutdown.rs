//! Broadcast exit signal
//!
//! The supervisor requests shutdown by triggering the signal; every worker
//! observes it at each suspension point. Triggering is idempotent and only
//! the supervisor side ever does it.

use std::sync::Arc;
use tokio::sync::watch;

/// A clonable, idempotent shutdown broadcast
#[derive(Debug, Clone)]
pub struct ExitSignal {
    tx: Arc<watch::Sender<bool>>,
    rx: watch::Receiver<bool>,
}

impl ExitSignal {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            tx: Arc::new(tx),
            rx,
        }
    }

    /// Requests shutdown. Safe to call any number of times.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    /// Checks the signal without waiting
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the signal has been triggered
    pub async fn triggered(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                // Sender gone; nothing further will ever trigger.
                return;
            }
        }
    }
}

impl Default for ExitSignal {
    fn default() -> Self {
        Self::new()
    }
}
