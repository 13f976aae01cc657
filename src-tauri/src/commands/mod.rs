//! Tauri IPC Commands
//!
//! The UI webview's side of the bridge. Only the store keys, the message box,
//! the notification switch and the ready handshake are reachable from here.

pub mod diagnostics;
pub mod dialog;
pub mod notifications;
pub mod store;

use serde::Serialize;

pub fn ui_webview_label(window_label: &str) -> String {
    format!("ui-{window_label}")
}

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

impl<T, E: std::fmt::Display> From<std::result::Result<T, E>> for CommandResult<T> {
    fn from(result: std::result::Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err(e.to_string()),
        }
    }
}
