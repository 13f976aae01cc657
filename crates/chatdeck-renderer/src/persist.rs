//! Write-through persistence queue
//!
//! Mutations enqueue complete store values; one background task hands them
//! to the bridge strictly in enqueue order. Failures are logged and dropped:
//! the in-memory state stays authoritative for the session, the change just
//! may not survive a restart.

use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

use chatdeck_bridge::{StoreBridge, StoreKey};

enum PersistJob {
    Write { key: StoreKey, value: Value },
    Flush(oneshot::Sender<()>),
}

#[derive(Clone)]
pub struct PersistQueue {
    tx: mpsc::UnboundedSender<PersistJob>,
}

impl PersistQueue {
    /// Start the writer task. Must be called inside a tokio runtime.
    pub fn spawn(bridge: Arc<dyn StoreBridge>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(drain(bridge, rx));
        Self { tx }
    }

    /// Queue a write. Never blocks.
    pub fn enqueue(&self, key: StoreKey, value: Value) -> bool {
        let queued = self.tx.send(PersistJob::Write { key, value }).is_ok();
        if !queued {
            tracing::warn!(key = %key, "Persist queue closed, write dropped");
        }
        queued
    }

    /// Wait until every write queued before this call was attempted
    pub async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        if self.tx.send(PersistJob::Flush(done)).is_ok() {
            let _ = wait.await;
        }
    }
}

async fn drain(bridge: Arc<dyn StoreBridge>, mut rx: mpsc::UnboundedReceiver<PersistJob>) {
    while let Some(job) = rx.recv().await {
        match job {
            PersistJob::Write { key, value } => {
                if let Err(e) = bridge.set(key, value).await {
                    tracing::warn!(key = %key, error = %e, "Failed to persist store");
                }
            }
            PersistJob::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
}
