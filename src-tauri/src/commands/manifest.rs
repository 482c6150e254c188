//! Manifest commands

use hwa_core::{BridgeCommand, CommandResult, CoreError};
use serde_json::Value;
use tauri::{AppHandle, Manager, State};

use crate::state::AppState;

#[tauri::command]
pub async fn load_manifest(app: AppHandle, source: String) -> CommandResult<Value> {
    let bridge = match app.try_state::<AppState>() {
        Some(state) => state.bridge().clone(),
        None => return CommandResult::err(&CoreError::NotInitialized),
    };

    let task = tauri::async_runtime::spawn_blocking(move || {
        BridgeCommand::parse("loadManifest", &Value::String(source))
            .and_then(|command| bridge.execute(&command))
    });

    let result = match task.await {
        Ok(result) => result,
        Err(e) => Err(CoreError::Task(e.to_string())),
    };

    if let Err(e) = &result {
        tracing::warn!(code = e.code(), error = %e, "Manifest load failed");
    }
    result.into()
}

#[tauri::command]
pub fn get_manifest(state: State<'_, AppState>) -> CommandResult<Value> {
    state.bridge().execute(&BridgeCommand::GetManifest).into()
}
