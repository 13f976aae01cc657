//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] chatdeck_storage::StorageError),

    #[error("Bridge error: {0}")]
    Bridge(#[from] chatdeck_bridge::BridgeError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid webview partition: {0}")]
    InvalidPartition(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
