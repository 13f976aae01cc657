//! Callback registry shared by the signal bus and the reactive stores

use parking_lot::RwLock;
use std::sync::{Arc, Weak};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Table<T> {
    next_id: u64,
    entries: Vec<(u64, Callback<T>)>,
}

/// A set of callbacks notified with a borrowed value.
///
/// `notify` works on a snapshot of the registered callbacks, so a callback
/// may add or remove listeners (or trigger another `notify`) without
/// deadlocking. Listeners added during a notification see the next one.
pub struct Listeners<T> {
    table: Arc<RwLock<Table<T>>>,
}

impl<T: 'static> Listeners<T> {
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(Table {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    pub fn add<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = {
            let mut table = self.table.write();
            let id = table.next_id;
            table.next_id += 1;
            table.entries.push((id, Arc::new(callback)));
            id
        };

        let weak: Weak<RwLock<Table<T>>> = Arc::downgrade(&self.table);
        Subscription {
            id,
            detach: Some(Box::new(move || {
                weak.upgrade()
                    .map(|table| {
                        let mut table = table.write();
                        let before = table.entries.len();
                        table.entries.retain(|(entry_id, _)| *entry_id != id);
                        table.entries.len() != before
                    })
                    .unwrap_or(false)
            })),
        }
    }

    /// Invoke every callback, returning how many ran
    pub fn notify(&self, value: &T) -> usize {
        let callbacks: Vec<Callback<T>> = self
            .table
            .read()
            .entries
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();

        for callback in &callbacks {
            callback(value);
        }

        callbacks.len()
    }

    pub fn len(&self) -> usize {
        self.table.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Listeners<T> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
        }
    }
}

/// Handle to a registered callback.
///
/// Dropping the handle leaves the callback registered; call `unsubscribe`
/// to remove it.
pub struct Subscription {
    id: u64,
    detach: Option<Box<dyn FnOnce() -> bool + Send + Sync>>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Remove the callback. Returns false if it was already gone.
    pub fn unsubscribe(mut self) -> bool {
        self.detach.take().map(|detach| detach()).unwrap_or(false)
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_notify_and_unsubscribe() {
        let listeners = Listeners::<u32>::new();
        let total = Arc::new(AtomicUsize::new(0));

        let t = Arc::clone(&total);
        let sub = listeners.add(move |v| {
            t.fetch_add(*v as usize, Ordering::SeqCst);
        });

        assert_eq!(listeners.notify(&3), 1);
        assert!(sub.unsubscribe());
        assert_eq!(listeners.notify(&3), 0);
        assert_eq!(total.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_drop_keeps_registration() {
        let listeners = Listeners::<()>::new();
        drop(listeners.add(|_| {}));
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn test_reentrant_notify() {
        let listeners = Listeners::<u32>::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let inner = listeners.clone();
        let h = Arc::clone(&hits);
        listeners.add(move |depth| {
            h.fetch_add(1, Ordering::SeqCst);
            if *depth > 0 {
                inner.notify(&(depth - 1));
            }
        });

        listeners.notify(&2);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_unsubscribe_after_registry_dropped() {
        let listeners = Listeners::<()>::new();
        let sub = listeners.add(|_| {});
        drop(listeners);
        assert!(!sub.unsubscribe());
    }
}
