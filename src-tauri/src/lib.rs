//! ChatDeck - Tauri Application
//!
//! The host process: owns the persisted stores, answers the UI webview's
//! bridge commands and forwards menu accelerators and chat links to it as
//! signals.

mod commands;
mod menu;
mod state;

use state::AppState;
use tauri::webview::WebviewBuilder;
use tauri::window::WindowBuilder;
use tauri::{LogicalPosition, LogicalSize, Manager, WebviewUrl};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging
    chatdeck_core::init_logging();

    let launch_link = chatdeck_core::links::find_chat_link(std::env::args().skip(1));

    tauri::Builder::default()
        .setup(move |app| {
            let state = AppState::new()?;
            state.initialize()?;

            if let Some(url) = launch_link {
                tracing::info!(url = %url, "Chat link passed on launch");
                state.set_pending_link(Some(url.to_string()));
            }

            let config = state.shell().config().clone();

            // Store state in Tauri
            app.manage(state);

            let menu = menu::build(app.handle())?;
            app.set_menu(menu)?;
            app.on_menu_event(|app, event| menu::handle_event(app, event));

            let window = WindowBuilder::new(app, menu::MAIN_WINDOW)
                .title("ChatDeck")
                .inner_size(config.window_width, config.window_height)
                .min_inner_size(600.0, 400.0)
                .center()
                .build()?;

            let ui_webview = WebviewBuilder::new(
                commands::ui_webview_label(menu::MAIN_WINDOW),
                WebviewUrl::App("index.html".into()),
            )
            .auto_resize()
            .enable_clipboard_access();

            let ui_webview = window.add_child(
                ui_webview,
                LogicalPosition::new(0.0, 0.0),
                LogicalSize::new(config.window_width, config.window_height),
            )?;
            let _ = ui_webview.show();

            tracing::info!(data_dir = %config.data_dir.display(), "ChatDeck started");

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Diagnostics
            commands::diagnostics::ui_ready,
            // Store commands
            commands::store::tab_store_get,
            commands::store::tab_store_set,
            commands::store::settings_store_get,
            commands::store::settings_store_set,
            // Dialogs
            commands::dialog::show_message_box,
            // Notifications
            commands::notifications::toggle_notifications,
        ])
        .run(tauri::generate_context!())
        .expect("error while running ChatDeck");
}
