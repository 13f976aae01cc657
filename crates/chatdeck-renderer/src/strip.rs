//! Tab strip controller
//!
//! Everything the tab strip does that is not drawing: reacting to host
//! signals, closing with confirmation, the edit dialog flow and the rows to
//! render. The view layer listens to the stores and calls `render_items`.

use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use url::Url;

use chatdeck_bridge::{
    DialogBridge, HostSignal, MessageBoxOptions, NotificationBridge, SignalBus, SignalKind,
    Subscription,
};
use chatdeck_tabs::{Tab, TabPatch};

use crate::settings::SettingsMirror;
use crate::store::ReactiveTabStore;

/// The UI's tab webviews, addressed by tab id
pub trait WebviewHost: Send + Sync {
    fn load_url(&self, tab_id: &str, url: &Url);
    fn open_devtools(&self, tab_id: &str);
}

/// One rendered tab, keyed by id
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabStripItem {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub selected: bool,
}

#[derive(Clone)]
pub struct TabStrip {
    inner: Arc<StripInner>,
}

struct StripInner {
    store: ReactiveTabStore,
    settings: SettingsMirror,
    dialogs: Arc<dyn DialogBridge>,
    notifications: Arc<dyn NotificationBridge>,
    webviews: Arc<dyn WebviewHost>,
    tab_to_edit: Mutex<Option<String>>,
    settings_open: AtomicBool,
}

impl TabStrip {
    pub fn new(
        store: ReactiveTabStore,
        settings: SettingsMirror,
        dialogs: Arc<dyn DialogBridge>,
        notifications: Arc<dyn NotificationBridge>,
        webviews: Arc<dyn WebviewHost>,
    ) -> Self {
        Self {
            inner: Arc::new(StripInner {
                store,
                settings,
                dialogs,
                notifications,
                webviews,
                tab_to_edit: Mutex::new(None),
                settings_open: AtomicBool::new(false),
            }),
        }
    }

    pub fn store(&self) -> &ReactiveTabStore {
        &self.inner.store
    }

    pub fn settings(&self) -> &SettingsMirror {
        &self.inner.settings
    }

    /// Register a handler for every host signal
    pub fn attach(&self, bus: &SignalBus) -> Vec<Subscription> {
        SignalKind::ALL
            .iter()
            .map(|&kind| {
                let strip = self.clone();
                bus.subscribe(kind, move |signal| strip.handle(signal))
            })
            .collect()
    }

    pub fn handle(&self, signal: &HostSignal) {
        let store = &self.inner.store;

        match signal.kind {
            SignalKind::NextTab => {
                store.next_tab();
            }
            SignalKind::PreviousTab => {
                store.previous_tab();
            }
            SignalKind::FirstTab => {
                store.first_tab();
            }
            SignalKind::LastTab => {
                store.last_tab();
            }
            SignalKind::OpenLink => match signal.payload() {
                Some(url) => {
                    self.open_link(url);
                }
                None => tracing::warn!("Open link signal without a URL"),
            },
            SignalKind::OpenTabDevTools => {
                self.open_devtools();
            }
            SignalKind::EditActiveTab => {
                self.edit_active_tab();
            }
            SignalKind::CloseActiveTab => self.close_active_tab(),
            SignalKind::AddNewTab => {
                self.add_new_tab();
            }
            SignalKind::RestoreTab => {
                store.restore_tab();
            }
            SignalKind::OpenSettings => self.open_settings(),
        }
    }

    /// Close the selected tab.
    ///
    /// Without the close prompt the tab goes immediately. With it, the
    /// confirmation runs on a background task so signal delivery never waits
    /// on a modal.
    pub fn close_active_tab(&self) {
        let Some(tab_id) = self.inner.store.selected_tab_id() else {
            return;
        };

        if !self.inner.settings.tab_close_prompt() {
            self.inner.store.remove_tab(&tab_id);
            return;
        }

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                let strip = self.clone();
                runtime.spawn(async move {
                    strip.close_tab_with_prompt(&tab_id).await;
                });
            }
            Err(_) => {
                tracing::warn!(tab_id = %tab_id, "No runtime for close confirmation, tab kept");
            }
        }
    }

    /// Remove a tab, asking first when the close prompt is enabled.
    /// Returns whether the tab was removed.
    pub async fn close_tab_with_prompt(&self, tab_id: &str) -> bool {
        if !self.inner.settings.tab_close_prompt() {
            return self.inner.store.remove_tab(tab_id).is_some();
        }

        let response = self
            .inner
            .dialogs
            .show_message_box(MessageBoxOptions::close_tab_confirmation())
            .await;

        match response {
            Ok(response) if response.is_affirmative() => {
                self.inner.store.remove_tab(tab_id).is_some()
            }
            Ok(_) => {
                tracing::debug!(tab_id = %tab_id, "Tab close cancelled");
                false
            }
            Err(e) => {
                tracing::warn!(tab_id = %tab_id, error = %e, "Close confirmation failed, tab kept");
                false
            }
        }
    }

    /// Append a fresh default tab; the selection is left alone
    pub fn add_new_tab(&self) -> String {
        let tab = Tab::default_tab();
        let tab_id = tab.id.clone();
        self.inner.store.add_tab(tab);
        tab_id
    }

    pub fn edit_active_tab(&self) -> bool {
        match self.inner.store.selected_tab_id() {
            Some(tab_id) => self.edit_tab(&tab_id),
            None => false,
        }
    }

    pub fn edit_tab(&self, tab_id: &str) -> bool {
        if self.inner.store.get(tab_id).is_none() {
            return false;
        }
        *self.inner.tab_to_edit.lock() = Some(tab_id.to_string());
        true
    }

    /// Tab the edit dialog is open for, if it still exists
    pub fn tab_to_edit(&self) -> Option<Tab> {
        let tab_id = self.inner.tab_to_edit.lock().clone()?;
        self.inner.store.get(&tab_id)
    }

    /// Close the edit dialog, applying `patch` when it was saved.
    ///
    /// A saved change to the notification switch is passed on to the host
    /// for the tab's partition.
    pub fn finish_edit(&self, patch: Option<TabPatch>) -> bool {
        let Some(tab_id) = self.inner.tab_to_edit.lock().take() else {
            return false;
        };
        let Some(patch) = patch else {
            return false;
        };

        let before = self.inner.store.get(&tab_id).map(|t| t.config.notifications);
        if !self.inner.store.update_tab(&tab_id, patch) {
            return false;
        }

        if let Some(tab) = self.inner.store.get(&tab_id) {
            if before != Some(tab.config.notifications) {
                self.toggle_notifications(&tab);
            }
        }
        true
    }

    fn toggle_notifications(&self, tab: &Tab) {
        let enabled = tab.config.notifications;
        let partition = tab.partition();

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(partition = %partition, "No runtime for notification toggle");
            return;
        };

        let notifications = Arc::clone(&self.inner.notifications);
        runtime.spawn(async move {
            if let Err(e) = notifications
                .toggle_notifications(enabled, partition.clone())
                .await
            {
                tracing::warn!(partition = %partition, error = %e, "Notification toggle failed");
            }
        });
    }

    pub fn open_settings(&self) {
        self.inner.settings_open.store(true, Ordering::SeqCst);
    }

    pub fn close_settings(&self) {
        self.inner.settings_open.store(false, Ordering::SeqCst);
    }

    pub fn settings_open(&self) -> bool {
        self.inner.settings_open.load(Ordering::SeqCst)
    }

    /// Point the selected tab's webview at `raw`
    pub fn open_link(&self, raw: &str) -> bool {
        let url = match Url::parse(raw) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!(url = %raw, error = %e, "Ignoring link");
                return false;
            }
        };

        let Some(tab_id) = self.inner.store.selected_tab_id() else {
            return false;
        };

        tracing::info!(tab_id = %tab_id, url = %url, "Opening link");
        self.inner.webviews.load_url(&tab_id, &url);
        true
    }

    pub fn open_devtools(&self) -> bool {
        let Some(tab_id) = self.inner.store.selected_tab_id() else {
            return false;
        };
        self.inner.webviews.open_devtools(&tab_id);
        true
    }

    pub fn is_visible(&self) -> bool {
        self.inner.settings.tab_bar()
    }

    pub fn render_items(&self) -> Vec<TabStripItem> {
        let store = self.inner.store.snapshot();
        store
            .tabs
            .iter()
            .map(|tab| TabStripItem {
                id: tab.id.clone(),
                name: tab.name.clone(),
                color: tab.config.color.clone(),
                selected: store.selected_tab_id.as_deref() == Some(tab.id.as_str()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::PersistQueue;
    use crate::testing::{
        RecordingBridge, RecordingNotifications, RecordingWebviews, ScriptedDialogs,
    };
    use chatdeck_bridge::{Settings, StoreBridge, StoreKey};
    use chatdeck_tabs::{TabConfig, TabStore};

    struct Fixture {
        strip: TabStrip,
        dialogs: Arc<ScriptedDialogs>,
        notifications: Arc<RecordingNotifications>,
        webviews: Arc<RecordingWebviews>,
        bridge: Arc<RecordingBridge>,
    }

    fn tab(id: &str) -> Tab {
        Tab {
            id: id.to_string(),
            name: id.to_uppercase(),
            config: TabConfig::default(),
        }
    }

    fn fixture(tab_ids: &[&str], close_prompt: bool, answers: &[usize]) -> Fixture {
        let bridge = Arc::new(RecordingBridge::default());
        let persist = PersistQueue::spawn(bridge.clone());

        let mut tabs = TabStore::new();
        for id in tab_ids {
            tabs.add_tab(tab(id)).unwrap();
        }

        let store = ReactiveTabStore::with_state(tabs, persist.clone());
        let settings = SettingsMirror::with_state(
            Settings {
                tab_close_prompt: close_prompt,
                tab_bar: true,
            },
            persist,
        );
        let dialogs = ScriptedDialogs::answering(answers);
        let notifications = Arc::new(RecordingNotifications::default());
        let webviews = Arc::new(RecordingWebviews::default());

        Fixture {
            strip: TabStrip::new(
                store,
                settings,
                dialogs.clone(),
                notifications.clone(),
                webviews.clone(),
            ),
            dialogs,
            notifications,
            webviews,
            bridge,
        }
    }

    fn ids(strip: &TabStrip) -> Vec<String> {
        strip.store().tabs().into_iter().map(|t| t.id).collect()
    }

    async fn settle(strip: &TabStrip, expected_len: usize) {
        for _ in 0..100 {
            if strip.store().len() == expected_len {
                return;
            }
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_attach_covers_every_signal() {
        let f = fixture(&["a"], false, &[]);
        let bus = SignalBus::new();
        let subscriptions = f.strip.attach(&bus);

        assert_eq!(subscriptions.len(), SignalKind::ALL.len());
        for kind in SignalKind::ALL {
            assert_eq!(bus.handler_count(kind), 1);
        }
    }

    #[tokio::test]
    async fn test_navigation_signals() {
        let f = fixture(&["a", "b", "c"], false, &[]);
        let bus = SignalBus::new();
        f.strip.attach(&bus);

        bus.dispatch(&SignalKind::NextTab.into());
        assert_eq!(f.strip.store().selected_tab_id().as_deref(), Some("b"));
        bus.dispatch(&SignalKind::LastTab.into());
        assert_eq!(f.strip.store().selected_tab_id().as_deref(), Some("c"));
        bus.dispatch(&SignalKind::NextTab.into());
        assert_eq!(f.strip.store().selected_tab_id().as_deref(), Some("a"));
        bus.dispatch(&SignalKind::PreviousTab.into());
        assert_eq!(f.strip.store().selected_tab_id().as_deref(), Some("c"));
        bus.dispatch(&SignalKind::FirstTab.into());
        assert_eq!(f.strip.store().selected_tab_id().as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn test_close_without_prompt_is_immediate() {
        let f = fixture(&["a", "b"], false, &[]);
        let bus = SignalBus::new();
        f.strip.attach(&bus);

        bus.dispatch(&SignalKind::CloseActiveTab.into());

        assert_eq!(ids(&f.strip), vec!["b"]);
        assert_eq!(f.dialogs.shown_count(), 0);
    }

    #[tokio::test]
    async fn test_close_with_prompt_confirmed() {
        let f = fixture(&["a", "b"], true, &[0]);
        let bus = SignalBus::new();
        f.strip.attach(&bus);

        bus.dispatch(&SignalKind::CloseActiveTab.into());
        assert_eq!(f.strip.store().len(), 2);

        settle(&f.strip, 1).await;
        assert_eq!(ids(&f.strip), vec!["b"]);
        assert_eq!(
            f.dialogs.shown.lock()[0],
            MessageBoxOptions::close_tab_confirmation()
        );
    }

    #[tokio::test]
    async fn test_close_with_prompt_cancelled() {
        let f = fixture(&["a", "b"], true, &[1]);
        assert!(!f.strip.close_tab_with_prompt("a").await);
        assert_eq!(ids(&f.strip), vec!["a", "b"]);
        assert_eq!(f.dialogs.shown_count(), 1);
    }

    #[tokio::test]
    async fn test_close_keeps_tab_when_dialog_fails() {
        let f = fixture(&["a"], true, &[]);
        assert!(!f.strip.close_tab_with_prompt("a").await);
        assert_eq!(ids(&f.strip), vec!["a"]);
    }

    #[tokio::test]
    async fn test_prompt_setting_read_at_close_time() {
        let f = fixture(&["a", "b"], true, &[]);
        f.strip.settings().update(|s| s.tab_close_prompt = false);

        assert!(f.strip.close_tab_with_prompt("b").await);
        assert_eq!(f.dialogs.shown_count(), 0);
        assert_eq!(ids(&f.strip), vec!["a"]);
    }

    #[tokio::test]
    async fn test_add_and_restore_signals() {
        let f = fixture(&["a"], false, &[]);
        let bus = SignalBus::new();
        f.strip.attach(&bus);

        bus.dispatch(&SignalKind::AddNewTab.into());
        assert_eq!(f.strip.store().len(), 2);
        assert_eq!(f.strip.store().selected_tab_id().as_deref(), Some("a"));

        bus.dispatch(&SignalKind::CloseActiveTab.into());
        assert_eq!(f.strip.store().len(), 1);
        bus.dispatch(&SignalKind::RestoreTab.into());
        assert_eq!(ids(&f.strip)[0], "a");
        assert_eq!(f.strip.store().selected_tab_id().as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn test_open_link_targets_selected_tab() {
        let f = fixture(&["a", "b"], false, &[]);
        f.strip.store().set_tab_active("b");
        let bus = SignalBus::new();
        f.strip.attach(&bus);

        bus.dispatch(&HostSignal::open_link("https://web.whatsapp.com/send?phone=1"));
        bus.dispatch(&HostSignal::open_link("not a url"));
        bus.dispatch(&HostSignal::new(SignalKind::OpenLink));

        assert_eq!(
            *f.webviews.loaded.lock(),
            vec![(
                "b".to_string(),
                "https://web.whatsapp.com/send?phone=1".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_webview_actions_need_a_tab() {
        let f = fixture(&[], false, &[]);
        assert!(!f.strip.open_link("https://web.whatsapp.com"));
        assert!(!f.strip.open_devtools());
        assert!(f.webviews.loaded.lock().is_empty());

        f.strip.add_new_tab();
        assert!(f.strip.open_devtools());
        assert_eq!(f.webviews.devtools.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_edit_flow() {
        let f = fixture(&["a", "b"], false, &[]);
        let bus = SignalBus::new();
        f.strip.attach(&bus);

        bus.dispatch(&SignalKind::EditActiveTab.into());
        assert_eq!(f.strip.tab_to_edit().unwrap().id, "a");

        assert!(f.strip.finish_edit(Some(TabPatch::name("Work"))));
        assert!(f.strip.tab_to_edit().is_none());
        assert_eq!(f.strip.store().get("a").unwrap().name, "Work");

        assert!(f.strip.edit_tab("b"));
        assert!(!f.strip.finish_edit(None));
        assert_eq!(f.strip.store().get("b").unwrap().name, "B");
        assert!(!f.strip.edit_tab("missing"));
    }

    #[tokio::test]
    async fn test_edit_forwards_notification_switch() {
        let f = fixture(&["a"], false, &[]);
        let muted = TabConfig {
            notifications: false,
            ..TabConfig::default()
        };

        assert!(f.strip.edit_tab("a"));
        assert!(f.strip.finish_edit(Some(TabPatch::config(muted))));

        for _ in 0..100 {
            if !f.notifications.toggled.lock().is_empty() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(
            *f.notifications.toggled.lock(),
            vec![(false, "persist:a".to_string())]
        );
    }

    #[tokio::test]
    async fn test_rename_leaves_notifications_alone() {
        let f = fixture(&["a"], false, &[]);

        assert!(f.strip.edit_tab("a"));
        assert!(f.strip.finish_edit(Some(TabPatch::name("Work"))));
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }

        assert!(f.notifications.toggled.lock().is_empty());
    }

    #[tokio::test]
    async fn test_open_settings_signal() {
        let f = fixture(&["a"], false, &[]);
        let bus = SignalBus::new();
        f.strip.attach(&bus);

        assert!(!f.strip.settings_open());
        bus.dispatch(&SignalKind::OpenSettings.into());
        assert!(f.strip.settings_open());
        f.strip.close_settings();
        assert!(!f.strip.settings_open());
    }

    #[tokio::test]
    async fn test_render_items() {
        let f = fixture(&["a", "b"], false, &[]);
        let config = TabConfig {
            color: Some("#336699".to_string()),
            ..TabConfig::default()
        };
        f.strip.store().update_tab("b", TabPatch::config(config));
        f.strip.store().set_tab_active("b");

        assert_eq!(
            f.strip.render_items(),
            vec![
                TabStripItem {
                    id: "a".to_string(),
                    name: "A".to_string(),
                    color: None,
                    selected: false,
                },
                TabStripItem {
                    id: "b".to_string(),
                    name: "B".to_string(),
                    color: Some("#336699".to_string()),
                    selected: true,
                },
            ]
        );
        assert!(f.strip.is_visible());
    }

    #[tokio::test]
    async fn test_duplicate_signal_delivery_is_consistent() {
        let f = fixture(&["a", "b", "c"], false, &[]);
        let bus = SignalBus::new();
        f.strip.attach(&bus);

        for _ in 0..2 {
            bus.dispatch(&SignalKind::CloseActiveTab.into());
            bus.dispatch(&SignalKind::RestoreTab.into());
        }
        f.strip.store().flush().await;

        assert_eq!(ids(&f.strip), vec!["a", "b", "c"]);
        assert_eq!(
            f.bridge.writes_for(StoreKey::Tabs).last(),
            Some(&f.strip.store().snapshot().to_value())
        );
    }

    #[tokio::test]
    async fn test_end_to_end_through_host() {
        use chatdeck_core::{HostEndpoint, Shell};

        let shell = Shell::open_in_memory().unwrap();
        shell.initialize().unwrap();
        let (endpoint, signals) = HostEndpoint::spawn(shell.store_service().clone(), None);
        let bridge: Arc<dyn StoreBridge> = Arc::new(endpoint.bridge());

        let store = ReactiveTabStore::hydrate(bridge.clone()).await;
        let settings = SettingsMirror::hydrate(bridge.clone()).await;
        settings.update(|s| s.tab_close_prompt = false);
        let strip = TabStrip::new(
            store.clone(),
            settings.clone(),
            Arc::new(endpoint.bridge()),
            Arc::new(endpoint.bridge()),
            Arc::new(RecordingWebviews::default()),
        );

        let bus = SignalBus::new();
        strip.attach(&bus);
        let pump = {
            let bus = bus.clone();
            tokio::spawn(async move { bus.pump(signals).await })
        };

        let sender = endpoint.signals();
        sender.emit(SignalKind::AddNewTab);
        sender.emit(SignalKind::NextTab);
        sender.emit(SignalKind::CloseActiveTab);
        for _ in 0..100 {
            if store.len() == 1 && strip.store().snapshot().last_closed_tab.is_some() {
                break;
            }
            tokio::task::yield_now().await;
        }

        store.flush().await;
        settings.flush().await;

        let persisted = shell.get_store(StoreKey::Tabs).unwrap().unwrap();
        assert_eq!(persisted, store.snapshot().to_value());
        assert_eq!(store.len(), 1);
        assert!(!shell.settings().unwrap().tab_close_prompt);

        let tab_id = store.selected_tab_id().unwrap();
        strip.edit_tab(&tab_id);
        strip.finish_edit(Some(TabPatch::config(TabConfig {
            notifications: false,
            ..TabConfig::default()
        })));
        let permissions = shell.notification_permissions();
        let partition = format!("persist:{tab_id}");
        for _ in 0..100 {
            if !permissions.is_enabled(&partition).unwrap() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(!permissions.is_enabled(&partition).unwrap());

        endpoint.shutdown().await;
        pump.abort();
    }
}
