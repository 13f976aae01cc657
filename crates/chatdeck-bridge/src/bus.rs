//! UI-side signal subscriptions

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::listeners::{Listeners, Subscription};
use crate::signal::{HostSignal, SignalKind};

/// Routes host signals to the handlers registered for their kind.
///
/// Handlers may fire at any time, any number of times and in any order,
/// including from inside another handler. They should only read and write
/// synchronous state so repeated delivery stays consistent.
#[derive(Clone, Default)]
pub struct SignalBus {
    handlers: Arc<RwLock<HashMap<SignalKind, Listeners<HostSignal>>>>,
}

impl SignalBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, kind: SignalKind, handler: F) -> Subscription
    where
        F: Fn(&HostSignal) + Send + Sync + 'static,
    {
        let listeners = self.handlers.write().entry(kind).or_default().clone();
        let subscription = listeners.add(handler);
        tracing::debug!(signal = %kind, id = subscription.id(), "Subscribed to host signal");
        subscription
    }

    /// Deliver one signal, returning how many handlers ran
    pub fn dispatch(&self, signal: &HostSignal) -> usize {
        let listeners = self.handlers.read().get(&signal.kind).cloned();
        match listeners {
            Some(listeners) => listeners.notify(signal),
            None => 0,
        }
    }

    pub fn handler_count(&self, kind: SignalKind) -> usize {
        self.handlers
            .read()
            .get(&kind)
            .map(|l| l.len())
            .unwrap_or(0)
    }

    /// Deliver signals from the host until the sender side closes
    pub async fn pump(&self, mut signals: mpsc::UnboundedReceiver<HostSignal>) {
        while let Some(signal) = signals.recv().await {
            let handled = self.dispatch(&signal);
            if handled == 0 {
                tracing::debug!(signal = %signal.kind, "Host signal has no handler");
            }
        }

        tracing::info!("Host signal channel closed");
    }
}
