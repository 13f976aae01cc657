//! Observable, write-through copy of one host store

use parking_lot::{ReentrantMutex, RwLock};
use serde::Serialize;
use std::cell::Cell;
use std::sync::Arc;

use chatdeck_bridge::{Listeners, StoreKey, Subscription};

use crate::persist::PersistQueue;

struct Versioned<T> {
    version: u64,
    value: T,
}

/// Local state for one store key.
///
/// `update` applies a change synchronously. If the closure reports a change,
/// exactly one write of the complete new value is queued (while still
/// holding the lock, so writes leave in the order changes were applied) and
/// the version is bumped. Listeners are then told a change happened; each one
/// reads the current state itself and skips versions it has already seen, so
/// a listener never receives an older snapshot after a newer one, even when
/// another listener mutates the store from inside its callback. One listener
/// is never run by two threads at once.
pub struct Mirror<T> {
    key: StoreKey,
    state: Arc<RwLock<Versioned<T>>>,
    listeners: Listeners<u64>,
    persist: PersistQueue,
}

impl<T> Mirror<T>
where
    T: Clone + Serialize + Send + Sync + 'static,
{
    pub fn new(key: StoreKey, initial: T, persist: PersistQueue) -> Self {
        Self {
            key,
            state: Arc::new(RwLock::new(Versioned {
                version: 0,
                value: initial,
            })),
            listeners: Listeners::new(),
            persist,
        }
    }

    pub fn key(&self) -> StoreKey {
        self.key
    }

    pub fn snapshot(&self) -> T {
        self.state.read().value.clone()
    }

    /// Number of accepted changes so far
    pub fn version(&self) -> u64 {
        self.state.read().version
    }

    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.state.read().value)
    }

    /// Called with the latest snapshot after changes
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let state = Arc::clone(&self.state);
        // Reentrant: the listener may mutate the store and be notified again
        let seen = ReentrantMutex::new(Cell::new(self.version()));

        self.listeners.add(move |_changed: &u64| {
            let seen = seen.lock();
            let (version, snapshot) = {
                let current = state.read();
                (current.version, current.value.clone())
            };

            if version > seen.get() {
                seen.set(version);
                listener(&snapshot);
            }
        })
    }

    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut T) -> bool,
    {
        let version = {
            let mut state = self.state.write();
            if !f(&mut state.value) {
                return false;
            }

            match serde_json::to_value(&state.value) {
                Ok(value) => {
                    self.persist.enqueue(self.key, value);
                }
                Err(e) => {
                    tracing::error!(key = %self.key, error = %e, "Cannot serialize store");
                }
            }

            state.version += 1;
            state.version
        };

        self.listeners.notify(&version);
        true
    }

    pub async fn flush(&self) {
        self.persist.flush().await;
    }
}

impl<T> Clone for Mirror<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            state: Arc::clone(&self.state),
            listeners: self.listeners.clone(),
            persist: self.persist.clone(),
        }
    }
}
