//! Application navigation delegate: keeps the content inside the
//! manifest scope and hands everything else to the system browser.

use hwa_core::{Manifest, NavigationDelegate, NavigationRequest};
use parking_lot::RwLock;
use tauri::AppHandle;
use tauri_plugin_opener::OpenerExt;
use url::Url;

/// Scope URL of a manifest, resolved against the content start URL.
///
/// Falls back to the start URL's directory when no scope is declared.
pub fn manifest_scope(manifest: &Manifest, base: &Url) -> Option<Url> {
    let reference = manifest.scope().or(manifest.start_url()).unwrap_or(".");
    let mut scope = base.join(reference).ok()?;
    if manifest.scope().is_none() {
        scope = scope.join(".").ok()?;
    }
    scope.set_query(None);
    scope.set_fragment(None);
    Some(scope)
}

pub fn within_scope(scope: &Url, url: &Url) -> bool {
    scope.origin() == url.origin() && url.path().starts_with(scope.path())
}

pub struct ExternalLinks {
    app: AppHandle,
    scope: RwLock<Option<Url>>,
}

impl ExternalLinks {
    pub fn new(app: AppHandle) -> Self {
        Self {
            app,
            scope: RwLock::new(None),
        }
    }

    pub fn set_scope(&self, scope: Option<Url>) {
        tracing::debug!(scope = ?scope.as_ref().map(Url::as_str), "Navigation scope updated");
        *self.scope.write() = scope;
    }

    pub fn scope(&self) -> Option<Url> {
        self.scope.read().clone()
    }
}

impl NavigationDelegate for ExternalLinks {
    fn should_start_load(&self, request: &NavigationRequest) -> bool {
        if !request.is_main_frame {
            return true;
        }

        let Ok(url) = Url::parse(&request.url) else {
            return true;
        };
        if !matches!(url.scheme(), "http" | "https") {
            return true;
        }

        let scope = self.scope.read().clone();
        match scope {
            Some(scope) if !within_scope(&scope, &url) => {
                match self.app.opener().open_url(url.as_str(), None::<&str>) {
                    Ok(()) => tracing::info!(url = %url, "Opened outside navigation externally"),
                    Err(e) => tracing::warn!(url = %url, error = %e, "Failed to open URL externally"),
                }
                false
            }
            _ => true,
        }
    }
}
