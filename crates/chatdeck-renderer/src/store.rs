//! Reactive tab store
//!
//! Holds the UI's copy of the tab record. Hydrated once at startup, then
//! every local action mutates it in place and the complete record is written
//! back through the bridge. Listeners re-render from the snapshot they are
//! handed.

use std::sync::Arc;

use chatdeck_bridge::{StoreBridge, StoreKey, Subscription};
use chatdeck_tabs::{Tab, TabPatch, TabStore};

use crate::mirror::Mirror;
use crate::persist::PersistQueue;

#[derive(Clone)]
pub struct ReactiveTabStore {
    mirror: Mirror<TabStore>,
}

impl ReactiveTabStore {
    /// Load the persisted record and start writing changes back.
    ///
    /// Never fails: an unreachable host or an unreadable record yields an
    /// empty store, and an empty store is seeded with one default tab.
    pub async fn hydrate(bridge: Arc<dyn StoreBridge>) -> Self {
        let initial = match bridge.get_store(StoreKey::Tabs).await {
            Ok(Some(value)) => TabStore::from_value(value).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Stored tab record unreadable, starting empty");
                TabStore::new()
            }),
            Ok(None) => TabStore::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Tab store unavailable, starting empty");
                TabStore::new()
            }
        };

        let store = Self::with_state(initial, PersistQueue::spawn(bridge));

        if store.is_empty() {
            store.add_tab(Tab::default_tab());
        }

        tracing::info!(
            tabs = store.len(),
            selected = ?store.selected_tab_id(),
            "Tab store hydrated"
        );

        store
    }

    pub fn with_state(initial: TabStore, persist: PersistQueue) -> Self {
        Self {
            mirror: Mirror::new(StoreKey::Tabs, initial, persist),
        }
    }

    pub fn snapshot(&self) -> TabStore {
        self.mirror.snapshot()
    }

    pub fn tabs(&self) -> Vec<Tab> {
        self.mirror.read(|s| s.tabs.clone())
    }

    pub fn len(&self) -> usize {
        self.mirror.read(TabStore::len)
    }

    pub fn is_empty(&self) -> bool {
        self.mirror.read(TabStore::is_empty)
    }

    pub fn selected_tab_id(&self) -> Option<String> {
        self.mirror.read(|s| s.selected_tab_id.clone())
    }

    pub fn selected_tab(&self) -> Option<Tab> {
        self.mirror.read(|s| s.selected_tab().cloned())
    }

    pub fn get(&self, tab_id: &str) -> Option<Tab> {
        self.mirror.read(|s| s.get(tab_id).cloned())
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&TabStore) + Send + Sync + 'static,
    {
        self.mirror.subscribe(listener)
    }

    /// Append a tab; the first tab becomes selected. Duplicate ids are refused.
    pub fn add_tab(&self, tab: Tab) -> bool {
        let tab_id = tab.id.clone();
        let added = self.mirror.update(|s| match s.add_tab(tab) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(tab_id = %tab_id, error = %e, "Tab not added");
                false
            }
        });

        if added {
            tracing::debug!(tab_id = %tab_id, "Tab added");
        }
        added
    }

    /// Remove a tab and remember it for `restore_tab`
    pub fn remove_tab(&self, tab_id: &str) -> Option<Tab> {
        let mut removed = None;
        self.mirror.update(|s| {
            removed = s.remove_tab(tab_id);
            removed.is_some()
        });

        match &removed {
            Some(_) => tracing::debug!(tab_id = %tab_id, "Tab removed"),
            None => tracing::debug!(tab_id = %tab_id, "Remove ignored, no such tab"),
        }
        removed
    }

    /// Bring back the last removed tab at its old position and select it
    pub fn restore_tab(&self) -> Option<String> {
        let mut restored = None;
        self.mirror.update(|s| {
            restored = s.restore_tab();
            restored.is_some()
        });

        if let Some(tab_id) = &restored {
            tracing::debug!(tab_id = %tab_id, "Tab restored");
        }
        restored
    }

    pub fn set_tab_active(&self, tab_id: &str) -> bool {
        self.mirror.update(|s| s.set_active(tab_id))
    }

    pub fn update_tab(&self, tab_id: &str, patch: TabPatch) -> bool {
        self.mirror.update(|s| match s.update_tab(tab_id, patch) {
            Ok(changed) => changed,
            Err(e) => {
                tracing::warn!(tab_id = %tab_id, error = %e, "Tab not updated");
                false
            }
        })
    }

    pub fn reorder_tab(&self, tab_id: &str, new_index: usize) -> bool {
        self.mirror.update(|s| s.move_tab(tab_id, new_index))
    }

    pub fn next_tab(&self) -> bool {
        self.select_with(TabStore::next_tab_id)
    }

    pub fn previous_tab(&self) -> bool {
        self.select_with(TabStore::previous_tab_id)
    }

    pub fn first_tab(&self) -> bool {
        self.select_with(TabStore::first_tab_id)
    }

    pub fn last_tab(&self) -> bool {
        self.select_with(TabStore::last_tab_id)
    }

    // Target is picked under the same lock the selection is written with
    fn select_with(&self, target: fn(&TabStore) -> Option<String>) -> bool {
        self.mirror.update(|s| match target(s) {
            Some(tab_id) => s.set_active(&tab_id),
            None => false,
        })
    }

    /// Wait for every queued write to reach the bridge
    pub async fn flush(&self) {
        self.mirror.flush().await;
    }
}
