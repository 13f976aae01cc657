//! ChatDeck Core
//!
//! Host-side coordination: the host process is the single writer to durable
//! storage and answers every store request coming over the bridge.

mod config;
mod error;
mod ipc;
pub mod links;
mod permissions;
mod service;
mod shell;

pub use config::Config;
pub use error::CoreError;
pub use ipc::{ChannelBridge, HostEndpoint, SignalSender};
pub use permissions::NotificationPermissions;
pub use service::StoreService;
pub use shell::Shell;

pub use chatdeck_bridge::{
    BridgeError, DialogBridge, HostSignal, MessageBoxKind, MessageBoxOptions, MessageBoxResponse,
    NotificationBridge, Settings, SignalKind, StoreBridge, StoreKey,
};
pub use chatdeck_storage::{Database, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
