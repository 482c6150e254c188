//! Hosted app configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use hwa_offline::{OfflineAsset, DEFAULT_OFFLINE_MESSAGE};

const ASSETS_DIR_ENV: &str = "HWA_ASSETS_DIR";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the bundled web assets
    pub assets_dir: PathBuf,
    /// Manifest loaded at startup when present
    pub manifest_file: String,
    /// Bundled offline page, relative to `assets_dir`
    pub offline_page: String,
    /// Origin the host serves `assets_dir` from, e.g. `tauri://localhost/`.
    /// When set the offline page is addressed by its absolute URL.
    #[serde(default)]
    pub asset_origin: Option<String>,
    /// Message for the generated page used when `offline_page` is missing
    pub offline_message: String,
    /// Arm the offline page at startup
    pub offline_enabled_by_default: bool,
    /// Ignore failures that do not indicate lost connectivity
    pub connectivity_errors_only: bool,
}

impl Config {
    pub fn new(assets_dir: PathBuf) -> Self {
        Self {
            assets_dir,
            manifest_file: "manifest.json".to_string(),
            offline_page: "offline.html".to_string(),
            asset_origin: None,
            offline_message: DEFAULT_OFFLINE_MESSAGE.to_string(),
            offline_enabled_by_default: true,
            connectivity_errors_only: false,
        }
    }

    pub fn assets_dir() -> PathBuf {
        std::env::var(ASSETS_DIR_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("www"))
    }

    /// Bundled offline page if it exists on disk, generated page otherwise
    pub fn offline_asset(&self) -> OfflineAsset {
        if self.assets_dir.join(&self.offline_page).is_file() {
            match &self.asset_origin {
                Some(origin) => OfflineAsset::bundled(format!(
                    "{}/{}",
                    origin.trim_end_matches('/'),
                    self.offline_page.trim_start_matches('/')
                )),
                None => OfflineAsset::bundled(self.offline_page.clone()),
            }
        } else {
            tracing::debug!(
                page = %self.offline_page,
                "Offline page not bundled, using generated page"
            );
            OfflineAsset::inline(self.offline_message.clone())
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::assets_dir())
    }
}
