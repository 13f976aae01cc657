//! ChatDeck Storage Layer
//!
//! SQLite-backed key/value persistence owned by the host process.
//! Every store (tabs, settings) is one JSON document under a fixed key.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
