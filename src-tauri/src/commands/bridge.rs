//! Name-based invoke channel

use hwa_core::{CommandResult, CoreError};
use serde_json::Value;
use tauri::{AppHandle, Manager};

use crate::state::AppState;

/// Run a bridge command by its web-facing name, e.g. `enableOfflinePage`
#[tauri::command]
pub async fn bridge_invoke(
    app: AppHandle,
    command: String,
    args: Option<Value>,
) -> CommandResult<Value> {
    let bridge = match app.try_state::<AppState>() {
        Some(state) => state.bridge().clone(),
        None => return CommandResult::err(&CoreError::NotInitialized),
    };
    let args = args.unwrap_or(Value::Null);

    // loadManifest reads from disk
    match tauri::async_runtime::spawn_blocking(move || bridge.invoke(&command, &args)).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(error = %e, "Bridge command task failed");
            CommandResult::err(&CoreError::Task(e.to_string()))
        }
    }
}
