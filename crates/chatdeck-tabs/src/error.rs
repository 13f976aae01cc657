//! Tab error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("Tab not found: {0}")]
    NotFound(String),

    #[error("Duplicate tab id: {0}")]
    DuplicateId(String),

    #[error("Tab name cannot be empty")]
    EmptyName,

    #[error("Invalid tab record: {0}")]
    InvalidRecord(#[from] serde_json::Error),
}
