//! HWA Shell - Tauri host for a hosted web app
//!
//! The content webview's navigation hooks drive the core's delegate
//! composer; bridge commands are exposed as Tauri commands and lifecycle
//! notifications are re-emitted as Tauri events under their own names.

mod commands;
mod links;
mod probe;
mod state;
mod surface;

use hwa_core::{Config, DisplayMode};
use state::AppState;
use std::path::PathBuf;
use tauri::webview::PageLoadEvent;
use tauri::{AppHandle, Manager, WebviewWindowBuilder};
use url::Url;

const START_URL_ENV: &str = "HWA_START_URL";
const ASSETS_DIR_ENV: &str = "HWA_ASSETS_DIR";

/// Reports `online`/`offline` browser events back to the host
const CONNECTIVITY_SCRIPT: &str = r#"
(function () {
  const internals = window.__TAURI_INTERNALS__;
  if (!internals) return;
  const report = (online) => internals.invoke("network_status_changed", { online });
  window.addEventListener("online", () => report(true));
  window.addEventListener("offline", () => report(false));
})();
"#;

/// Bundled assets ship as a resource; `HWA_ASSETS_DIR` wins when set
fn shell_config(app: &AppHandle) -> Config {
    let mut config = Config::default();
    if std::env::var_os(ASSETS_DIR_ENV).is_none() {
        if let Ok(resources) = app.path().resource_dir() {
            let bundled: PathBuf = resources.join("www");
            if bundled.is_dir() {
                config.assets_dir = bundled;
            }
        }
    }
    config.asset_origin = Some(surface::APP_ASSET_ORIGIN.to_string());
    config
}

fn base_url() -> Result<Url, url::ParseError> {
    match std::env::var(START_URL_ENV) {
        Ok(url) if !url.trim().is_empty() => Url::parse(url.trim()),
        _ => surface::app_asset_url("index.html"),
    }
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging
    hwa_core::init_logging();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let handle = app.handle().clone();

            let config = shell_config(&handle);
            tracing::info!(assets_dir = %config.assets_dir.display(), "Using bundled assets");

            let state = AppState::new(&handle, config, base_url()?)?;
            state.initialize(&handle)?;

            let content_url = state.content_url();
            let manifest = state.hosted().manifest();
            let title = manifest
                .as_ref()
                .and_then(|m| m.name().or(m.display_name()))
                .unwrap_or("HWA")
                .to_string();
            let fullscreen = manifest
                .as_ref()
                .is_some_and(|m| m.display() == DisplayMode::Fullscreen);

            // Store state in Tauri before the webview can call back into it
            app.manage(state);

            let navigation_handle = handle.clone();
            WebviewWindowBuilder::new(
                app,
                surface::CONTENT_WEBVIEW,
                surface::webview_url(&content_url),
            )
            .title(title)
            .inner_size(1280.0, 800.0)
            .min_inner_size(480.0, 360.0)
            .fullscreen(fullscreen)
            .center()
            .initialization_script(CONNECTIVITY_SCRIPT)
            .on_navigation(move |url| {
                navigation_handle
                    .try_state::<AppState>()
                    .map(|state| state.should_start_load(url))
                    .unwrap_or(true)
            })
            .on_page_load(|webview, payload| {
                let Some(state) = webview.try_state::<AppState>() else {
                    return;
                };
                match payload.event() {
                    PageLoadEvent::Started => state.page_started(payload.url()),
                    PageLoadEvent::Finished => state.page_finished(payload.url()),
                }
            })
            .build()?;

            tracing::info!(url = %content_url, "HWA shell started");

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Diagnostics
            commands::diagnostics::frontend_ready,
            // Bridge channel
            commands::bridge::bridge_invoke,
            // Manifest commands
            commands::manifest::load_manifest,
            commands::manifest::get_manifest,
            // Offline page commands
            commands::offline::enable_offline_page,
            commands::offline::disable_offline_page,
            commands::offline::show_offline_page,
            commands::offline::hide_offline_page,
            commands::offline::get_offline_state,
            commands::offline::network_status_changed,
            commands::offline::report_navigation_failure,
        ])
        .run(tauri::generate_context!())
        .expect("error while running HWA shell");
}
