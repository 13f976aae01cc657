//! Bridge error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Host process is not reachable")]
    Unavailable,

    #[error("Host rejected request: {0}")]
    Rejected(String),

    #[error("Unknown store key: {0}")]
    UnknownKey(String),

    #[error("Unknown signal: {0}")]
    UnknownSignal(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
