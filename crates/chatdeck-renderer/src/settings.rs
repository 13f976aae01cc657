//! UI preferences mirror

use std::sync::Arc;

use chatdeck_bridge::{Settings, StoreBridge, StoreKey, Subscription};

use crate::mirror::Mirror;
use crate::persist::PersistQueue;

#[derive(Clone)]
pub struct SettingsMirror {
    mirror: Mirror<Settings>,
}

impl SettingsMirror {
    /// Load stored preferences; defaults when absent, unreadable or unreachable
    pub async fn hydrate(bridge: Arc<dyn StoreBridge>) -> Self {
        let settings = match bridge.get_store(StoreKey::Settings).await {
            Ok(Some(value)) => serde_json::from_value(value).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Stored settings unreadable, using defaults");
                Settings::default()
            }),
            Ok(None) => Settings::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Settings unavailable, using defaults");
                Settings::default()
            }
        };

        Self::with_state(settings, PersistQueue::spawn(bridge))
    }

    pub fn with_state(settings: Settings, persist: PersistQueue) -> Self {
        Self {
            mirror: Mirror::new(StoreKey::Settings, settings, persist),
        }
    }

    pub fn snapshot(&self) -> Settings {
        self.mirror.snapshot()
    }

    pub fn tab_close_prompt(&self) -> bool {
        self.mirror.read(|s| s.tab_close_prompt)
    }

    pub fn tab_bar(&self) -> bool {
        self.mirror.read(|s| s.tab_bar)
    }

    /// Edit the preferences in place; written back only if something changed
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut Settings),
    {
        self.mirror.update(|settings| {
            let before = settings.clone();
            f(settings);
            *settings != before
        })
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Settings) + Send + Sync + 'static,
    {
        self.mirror.subscribe(listener)
    }

    pub async fn flush(&self) {
        self.mirror.flush().await;
    }
}
