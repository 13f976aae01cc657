//! Per-session notification switch
//!
//! Each tab's webview runs in its own partition. Whether that partition may
//! raise desktop notifications is decided by the host, so the UI asks for the
//! change instead of flipping it locally.

use futures_util::future::BoxFuture;

use crate::Result;

pub trait NotificationBridge: Send + Sync {
    /// Allow or block desktop notifications for one webview partition
    fn toggle_notifications(&self, enabled: bool, partition: String) -> BoxFuture<'_, Result<()>>;
}
