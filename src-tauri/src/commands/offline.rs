//! Offline page commands

use hwa_core::{BridgeCommand, CommandResult, NavigationError, NavigationEvent, OfflineState};
use serde_json::Value;
use tauri::State;

use crate::state::AppState;

#[tauri::command]
pub fn enable_offline_page(state: State<'_, AppState>) -> CommandResult<Value> {
    state.bridge().execute(&BridgeCommand::EnableOfflinePage).into()
}

#[tauri::command]
pub fn disable_offline_page(state: State<'_, AppState>) -> CommandResult<Value> {
    state.bridge().execute(&BridgeCommand::DisableOfflinePage).into()
}

#[tauri::command]
pub fn show_offline_page(state: State<'_, AppState>) -> CommandResult<Value> {
    state.bridge().execute(&BridgeCommand::ShowOfflinePage).into()
}

#[tauri::command]
pub fn hide_offline_page(state: State<'_, AppState>) -> CommandResult<Value> {
    state.bridge().execute(&BridgeCommand::HideOfflinePage).into()
}

#[tauri::command]
pub fn get_offline_state(state: State<'_, AppState>) -> CommandResult<OfflineState> {
    CommandResult::ok(state.hosted().offline_state())
}

#[tauri::command]
pub fn network_status_changed(state: State<'_, AppState>, online: bool) -> CommandResult<Value> {
    tracing::info!(online, "Network status changed");
    state
        .bridge()
        .execute(&BridgeCommand::NetworkStatusChanged { online })
        .into()
}

/// Failure seen by page script, such as a fetch of the start document
#[tauri::command]
pub fn report_navigation_failure(
    state: State<'_, AppState>,
    url: String,
    description: String,
) -> CommandResult<OfflineState> {
    let hosted = state.hosted();
    hosted.handle_navigation(&NavigationEvent::DidFail {
        url,
        error: NavigationError::new(description),
    });
    CommandResult::ok(hosted.offline_state())
}
