//! Recording fakes shared by the unit tests

use futures_util::future::{BoxFuture, FutureExt};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use url::Url;

use chatdeck_bridge::{
    BridgeError, DialogBridge, MessageBoxOptions, MessageBoxResponse, NotificationBridge,
    StoreBridge, StoreKey,
};

use crate::strip::WebviewHost;

/// In-memory bridge that records every `set`
#[derive(Default)]
pub struct RecordingBridge {
    pub stored: Mutex<HashMap<StoreKey, Value>>,
    pub writes: Mutex<Vec<(StoreKey, Value)>>,
    pub unavailable: bool,
    pub reject_writes: bool,
}

impl RecordingBridge {
    pub fn with_value(key: StoreKey, value: Value) -> Self {
        let bridge = Self::default();
        bridge.stored.lock().insert(key, value);
        bridge
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn writes_for(&self, key: StoreKey) -> Vec<Value> {
        self.writes
            .lock()
            .iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }
}

impl StoreBridge for RecordingBridge {
    fn get_store(&self, key: StoreKey) -> BoxFuture<'_, chatdeck_bridge::Result<Option<Value>>> {
        async move {
            if self.unavailable {
                return Err(BridgeError::Unavailable);
            }
            Ok(self.stored.lock().get(&key).cloned())
        }
        .boxed()
    }

    fn set(&self, key: StoreKey, value: Value) -> BoxFuture<'_, chatdeck_bridge::Result<()>> {
        async move {
            self.writes.lock().push((key, value.clone()));
            if self.unavailable {
                return Err(BridgeError::Unavailable);
            }
            if self.reject_writes {
                return Err(BridgeError::Rejected("disk full".to_string()));
            }
            self.stored.lock().insert(key, value);
            Ok(())
        }
        .boxed()
    }
}

/// Answers dialogs from a script; an empty script answers with an error
#[derive(Default)]
pub struct ScriptedDialogs {
    pub answers: Mutex<VecDeque<usize>>,
    pub shown: Mutex<Vec<MessageBoxOptions>>,
}

impl ScriptedDialogs {
    pub fn answering(answers: &[usize]) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            shown: Mutex::new(Vec::new()),
        })
    }

    pub fn shown_count(&self) -> usize {
        self.shown.lock().len()
    }
}

impl DialogBridge for ScriptedDialogs {
    fn show_message_box(
        &self,
        options: MessageBoxOptions,
    ) -> BoxFuture<'_, chatdeck_bridge::Result<MessageBoxResponse>> {
        async move {
            self.shown.lock().push(options);
            match self.answers.lock().pop_front() {
                Some(index) => Ok(MessageBoxResponse::new(index)),
                None => Err(BridgeError::Unavailable),
            }
        }
        .boxed()
    }
}

/// Records notification toggles as `(enabled, partition)`
#[derive(Default)]
pub struct RecordingNotifications {
    pub toggled: Mutex<Vec<(bool, String)>>,
}

impl NotificationBridge for RecordingNotifications {
    fn toggle_notifications(
        &self,
        enabled: bool,
        partition: String,
    ) -> BoxFuture<'_, chatdeck_bridge::Result<()>> {
        async move {
            self.toggled.lock().push((enabled, partition));
            Ok(())
        }
        .boxed()
    }
}

/// Records what was asked of each tab's webview
#[derive(Default)]
pub struct RecordingWebviews {
    pub loaded: Mutex<Vec<(String, String)>>,
    pub devtools: Mutex<Vec<String>>,
}

impl WebviewHost for RecordingWebviews {
    fn load_url(&self, tab_id: &str, url: &Url) {
        self.loaded
            .lock()
            .push((tab_id.to_string(), url.as_str().to_string()));
    }

    fn open_devtools(&self, tab_id: &str) {
        self.devtools.lock().push(tab_id.to_string());
    }
}
