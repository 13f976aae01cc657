//! ChatDeck Tab Model
//!
//! A tab is one configured chat session with its own webview partition.
//! `TabStore` is the ordered, selectable aggregate that both the host and the
//! UI mirror; all ordering and reselection rules live here.

mod error;
mod store;
mod tab;

pub use error::TabError;
pub use store::{ClosedTab, TabStore};
pub use tab::{Tab, TabConfig, TabPatch, DEFAULT_TAB_NAME};

pub type Result<T> = std::result::Result<T, TabError>;
