//! Notification commands
use tauri::State;

use super::CommandResult;
use crate::state::AppState;

/// Allow or block desktop notifications for one tab's webview partition
#[tauri::command]
pub fn toggle_notifications(
    state: State<AppState>,
    enabled: bool,
    partition: String,
) -> CommandResult<()> {
    state
        .shell()
        .notification_permissions()
        .set_enabled(&partition, enabled)
        .into()
}
