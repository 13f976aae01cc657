//! Application menu
//!
//! One item per host signal that needs no payload. Activating an item, or
//! pressing its accelerator, emits the signal's event to the UI webview.

use tauri::menu::{Menu, MenuBuilder, MenuEvent, MenuItemBuilder, SubmenuBuilder};
use tauri::{AppHandle, Emitter, Runtime};

use chatdeck_core::{HostSignal, SignalKind};

use crate::commands::ui_webview_label;

pub const MAIN_WINDOW: &str = "main";

pub fn build<R: Runtime>(app: &AppHandle<R>) -> tauri::Result<Menu<R>> {
    let mut tabs_menu = SubmenuBuilder::new(app, "Tabs");
    for kind in SignalKind::ALL {
        if kind.takes_payload() {
            continue;
        }

        let mut item = MenuItemBuilder::with_id(kind.as_str(), kind.label());
        if let Some(accelerator) = kind.default_accelerator() {
            item = item.accelerator(accelerator);
        }
        tabs_menu = tabs_menu.item(&item.build(app)?);
    }
    let tabs_menu = tabs_menu.build()?;

    let app_menu = SubmenuBuilder::new(app, "ChatDeck")
        .hide()
        .separator()
        .quit()
        .build()?;

    // Predefined items so copy/paste work inside the web client on macOS
    let edit_menu = SubmenuBuilder::new(app, "Edit")
        .undo()
        .redo()
        .separator()
        .cut()
        .copy()
        .paste()
        .select_all()
        .build()?;

    MenuBuilder::new(app)
        .items(&[&app_menu, &edit_menu, &tabs_menu])
        .build()
}

pub fn handle_event<R: Runtime>(app: &AppHandle<R>, event: MenuEvent) {
    let Ok(kind) = event.id().as_ref().parse::<SignalKind>() else {
        return;
    };

    emit_signal(app, MAIN_WINDOW, HostSignal::new(kind));
}

/// Deliver a host signal to the UI webview of `window_label`
pub fn emit_signal<R: Runtime>(app: &AppHandle<R>, window_label: &str, signal: HostSignal) {
    tracing::debug!(signal = %signal.kind, window = %window_label, "Emitting host signal");

    if let Err(e) = app.emit_to(
        ui_webview_label(window_label),
        signal.kind.as_str(),
        signal.payload(),
    ) {
        tracing::warn!(signal = %signal.kind, error = %e, "Failed to emit host signal");
    }
}
