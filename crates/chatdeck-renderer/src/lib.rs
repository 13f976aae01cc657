//! ChatDeck Renderer Store
//!
//! The UI-local mirror of host state. Reads are synchronous; every mutation
//! is applied immediately in memory and then written through the bridge in
//! the background. The UI never waits on persistence.

mod mirror;
mod persist;
mod settings;
mod store;
mod strip;

#[cfg(test)]
mod testing;

pub use mirror::Mirror;
pub use persist::PersistQueue;
pub use settings::SettingsMirror;
pub use store::ReactiveTabStore;
pub use strip::{TabStrip, TabStripItem, WebviewHost};
