//! Native message boxes for the UI

use futures_util::future::{BoxFuture, FutureExt};

use chatdeck_core::{
    BridgeError, DialogBridge, MessageBoxKind, MessageBoxOptions, MessageBoxResponse,
};

use super::CommandResult;

/// Presents message boxes with the platform's native dialog
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeDialogs;

impl DialogBridge for NativeDialogs {
    fn show_message_box(
        &self,
        options: MessageBoxOptions,
    ) -> BoxFuture<'_, Result<MessageBoxResponse, BridgeError>> {
        async move {
            tokio::task::spawn_blocking(move || present(&options))
                .await
                .map_err(|e| BridgeError::Rejected(e.to_string()))
        }
        .boxed()
    }
}

fn present(options: &MessageBoxOptions) -> MessageBoxResponse {
    let level = match options.kind {
        MessageBoxKind::Question | MessageBoxKind::Info => rfd::MessageLevel::Info,
        MessageBoxKind::Warning => rfd::MessageLevel::Warning,
        MessageBoxKind::Error => rfd::MessageLevel::Error,
    };

    let buttons = match options.buttons.as_slice() {
        [] => rfd::MessageButtons::Ok,
        [ok] => rfd::MessageButtons::OkCustom(ok.clone()),
        [ok, cancel] => rfd::MessageButtons::OkCancelCustom(ok.clone(), cancel.clone()),
        [yes, no, cancel, rest @ ..] => {
            if !rest.is_empty() {
                tracing::warn!(dropped = rest.len(), "Message box supports three buttons");
            }
            rfd::MessageButtons::YesNoCancelCustom(yes.clone(), no.clone(), cancel.clone())
        }
    };

    let result = rfd::MessageDialog::new()
        .set_title(&options.title)
        .set_description(&options.message)
        .set_level(level)
        .set_buttons(buttons)
        .show();

    MessageBoxResponse::new(selected_index(&options.buttons, result))
}

fn selected_index(buttons: &[String], result: rfd::MessageDialogResult) -> usize {
    let last = buttons.len().saturating_sub(1);
    match result {
        rfd::MessageDialogResult::Ok | rfd::MessageDialogResult::Yes => 0,
        rfd::MessageDialogResult::No => 1.min(last),
        rfd::MessageDialogResult::Cancel => last,
        rfd::MessageDialogResult::Custom(label) => buttons
            .iter()
            .position(|b| *b == label)
            .unwrap_or(last),
    }
}

#[tauri::command]
pub async fn show_message_box(options: MessageBoxOptions) -> CommandResult<MessageBoxResponse> {
    tracing::debug!(title = %options.title, "Showing message box");
    NativeDialogs.show_message_box(options).await.into()
}
