//! Host-presented message boxes
//!
//! The UI cannot open a native modal itself; it asks the host through this
//! contract. Button index 0 is always the affirmative choice.

use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageBoxKind {
    #[default]
    Question,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageBoxOptions {
    #[serde(default, alias = "type")]
    pub kind: MessageBoxKind,
    /// Ordered button labels
    #[serde(alias = "options")]
    pub buttons: Vec<String>,
    pub title: String,
    pub message: String,
}

impl MessageBoxOptions {
    pub fn question(
        title: impl Into<String>,
        message: impl Into<String>,
        buttons: &[&str],
    ) -> Self {
        Self {
            kind: MessageBoxKind::Question,
            buttons: buttons.iter().map(|b| b.to_string()).collect(),
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn close_tab_confirmation() -> Self {
        Self::question(
            "Close Tab",
            "Are you sure you want to close the tab?",
            &["OK", "Cancel"],
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageBoxResponse {
    #[serde(alias = "response")]
    pub selected_index: usize,
}

impl MessageBoxResponse {
    pub fn new(selected_index: usize) -> Self {
        Self { selected_index }
    }

    pub fn is_affirmative(&self) -> bool {
        self.selected_index == 0
    }
}

/// Confirmation dialogs shown by the host
pub trait DialogBridge: Send + Sync {
    fn show_message_box(&self, options: MessageBoxOptions)
        -> BoxFuture<'_, Result<MessageBoxResponse>>;
}
