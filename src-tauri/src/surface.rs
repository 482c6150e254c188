//! Content webview adapter

use hwa_core::{ContentSurface, OfflineAsset, OfflineError};
use std::path::PathBuf;
use tauri::{AppHandle, Manager, WebviewUrl};
use url::Url;

/// Label of the webview window that shows the hosted content
pub const CONTENT_WEBVIEW: &str = "content";

/// Origin Tauri serves bundled assets from
#[cfg(any(windows, target_os = "android"))]
pub const APP_ASSET_ORIGIN: &str = "http://tauri.localhost/";
#[cfg(not(any(windows, target_os = "android")))]
pub const APP_ASSET_ORIGIN: &str = "tauri://localhost/";

/// Absolute URL of a bundled asset path such as `offline.html`
pub fn app_asset_url(path: &str) -> Result<Url, url::ParseError> {
    Url::parse(APP_ASSET_ORIGIN)?.join(path.trim_start_matches('/'))
}

/// Resolve a reference the core hands out: absolute URLs pass through,
/// anything else is a bundled asset path.
pub fn resolve_url(reference: &str) -> Result<Url, url::ParseError> {
    match Url::parse(reference) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => app_asset_url(reference),
        Err(e) => Err(e),
    }
}

/// Bundled assets open through the app protocol, everything else as is
pub fn webview_url(url: &Url) -> WebviewUrl {
    match url.as_str().strip_prefix(APP_ASSET_ORIGIN) {
        Some(path) => WebviewUrl::App(PathBuf::from(path)),
        None => WebviewUrl::External(url.clone()),
    }
}

pub struct WebviewSurface {
    app: AppHandle,
    label: String,
}

impl WebviewSurface {
    pub fn new(app: AppHandle) -> Self {
        Self {
            app,
            label: CONTENT_WEBVIEW.to_string(),
        }
    }

    fn navigate(&self, reference: &str) -> Result<(), OfflineError> {
        let url = resolve_url(reference)
            .map_err(|e| OfflineError::Surface(format!("Invalid URL {}: {}", reference, e)))?;

        let webview = self
            .app
            .get_webview_window(&self.label)
            .ok_or_else(|| OfflineError::Surface(format!("Webview not found: {}", self.label)))?;

        webview
            .navigate(url)
            .map_err(|e| OfflineError::Surface(format!("Navigation failed: {}", e)))?;

        tracing::debug!(label = %self.label, url = %reference, "Navigated content webview");
        Ok(())
    }
}

impl ContentSurface for WebviewSurface {
    fn load_offline_asset(&self, asset: &OfflineAsset) -> Result<(), OfflineError> {
        self.navigate(&asset.url())
    }

    fn load_url(&self, url: &str) -> Result<(), OfflineError> {
        self.navigate(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let bundled = resolve_url("offline.html").unwrap();
        assert!(bundled.as_str().ends_with("localhost/offline.html"));
        assert!(OfflineAsset::bundled(bundled.as_str()).matches(bundled.as_str()));

        let remote = resolve_url("https://app.example.com/start").unwrap();
        assert_eq!(remote.as_str(), "https://app.example.com/start");

        let inline = OfflineAsset::default().url();
        assert_eq!(resolve_url(&inline).unwrap().scheme(), "data");
    }

    #[test]
    fn test_webview_url() {
        let bundled = app_asset_url("index.html").unwrap();
        assert!(matches!(webview_url(&bundled), WebviewUrl::App(path) if path == PathBuf::from("index.html")));

        let remote = Url::parse("https://app.example.com/").unwrap();
        assert!(matches!(webview_url(&remote), WebviewUrl::External(_)));
    }
}
