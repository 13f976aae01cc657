use tauri::{AppHandle, State, Window};

use chatdeck_core::HostSignal;

use super::CommandResult;
use crate::menu::emit_signal;
use crate::state::AppState;

/// UI handshake: signals sent before this would have been lost
#[tauri::command]
pub fn ui_ready(app: AppHandle, window: Window, state: State<AppState>) -> CommandResult<()> {
    tracing::info!(window = %window.label(), "UI ready");

    if let Some(url) = state.take_pending_link() {
        emit_signal(&app, window.label(), HostSignal::open_link(url));
    }

    CommandResult::ok(())
}
