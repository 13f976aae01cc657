//! ChatDeck Bridge Contract
//!
//! The only channel across the isolation boundary. The UI gets:
//! - request/response store access (`StoreBridge`) for a closed set of keys,
//! - a host-presented confirmation dialog (`DialogBridge`),
//! - the per-session notification switch (`NotificationBridge`),
//! - a fixed catalog of host-originated signals (`SignalKind`) delivered
//!   through a `SignalBus`.
//!
//! Nothing else is reachable from an isolated UI context.

mod bus;
mod dialog;
mod error;
mod key;
mod listeners;
mod notifications;
mod settings;
mod signal;

pub use bus::SignalBus;
pub use dialog::{DialogBridge, MessageBoxKind, MessageBoxOptions, MessageBoxResponse};
pub use error::BridgeError;
pub use key::StoreKey;
pub use listeners::{Listeners, Subscription};
pub use notifications::NotificationBridge;
pub use settings::Settings;
pub use signal::{HostSignal, SignalKind};

use futures_util::future::BoxFuture;
use serde_json::Value;

pub type Result<T> = std::result::Result<T, BridgeError>;

/// Store access exposed to the UI
pub trait StoreBridge: Send + Sync {
    /// Current persisted value under `key`; `None` if nothing was ever stored
    fn get_store(&self, key: StoreKey) -> BoxFuture<'_, Result<Option<Value>>>;

    /// Replace the value under `key`
    fn set(&self, key: StoreKey, value: Value) -> BoxFuture<'_, Result<()>>;
}
