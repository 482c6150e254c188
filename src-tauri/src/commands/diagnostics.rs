use hwa_core::CommandResult;
use serde::Serialize;
use tauri::State;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ShellStatus {
    pub start_url: String,
    pub manifest_loaded: bool,
    pub offline_state: String,
    pub last_failed_url: Option<String>,
}

#[tauri::command]
pub fn frontend_ready(state: State<'_, AppState>) -> CommandResult<ShellStatus> {
    let hosted = state.hosted();
    let status = ShellStatus {
        start_url: state.content_url().to_string(),
        manifest_loaded: hosted.manifests().is_loaded(),
        offline_state: hosted.offline_state().to_string(),
        last_failed_url: hosted.offline().last_failed_url(),
    };

    tracing::info!(offline_state = %status.offline_state, "Frontend ready");
    CommandResult::ok(status)
}
