//! Store commands
use serde_json::Value;
use tauri::State;

use chatdeck_core::{Settings, StoreKey};

use super::CommandResult;
use crate::state::AppState;

#[tauri::command]
pub fn tab_store_get(state: State<AppState>) -> CommandResult<Option<Value>> {
    state.shell().get_store(StoreKey::Tabs).into()
}

/// Replace the tab record. Settings go through `settings_store_set`, which
/// checks their shape.
#[tauri::command]
pub fn tab_store_set(state: State<AppState>, key: String, value: Value) -> CommandResult<()> {
    let key = match tabs_key(&key) {
        Ok(key) => key,
        Err(e) => {
            tracing::warn!(key = %key, "Refusing tab store write");
            return CommandResult::err(e);
        }
    };

    state.shell().set_store(key, value).into()
}

fn tabs_key(raw: &str) -> Result<StoreKey, String> {
    match raw.parse::<StoreKey>() {
        Ok(StoreKey::Tabs) => Ok(StoreKey::Tabs),
        Ok(StoreKey::Settings) => Err("settings are written with settings_store_set".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

#[tauri::command]
pub fn settings_store_get(state: State<AppState>) -> CommandResult<Settings> {
    state.shell().settings().into()
}

#[tauri::command]
pub fn settings_store_set(state: State<AppState>, settings: Settings) -> CommandResult<()> {
    state.shell().set_settings(&settings).into()
}
