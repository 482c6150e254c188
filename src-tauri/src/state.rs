//! Application state management
use hwa_core::{
    BridgeCommandSurface, Config, HostedApp, NavigationDelegate, NavigationEvent,
    NavigationRequest, NotificationName, Result,
};
use std::sync::Arc;
use tauri::{AppHandle, Emitter};
use url::Url;

use crate::links::{manifest_scope, ExternalLinks};
use crate::probe::{LoadGeneration, Prober};
use crate::surface::WebviewSurface;

/// Thread-safe application state wrapper
pub struct AppState {
    bridge: BridgeCommandSurface,
    // Also the composer's wrapped delegate, which it only holds weakly
    links: Arc<ExternalLinks>,
    prober: Arc<Prober>,
    loads: Arc<LoadGeneration>,
    base_url: Url,
}

impl AppState {
    pub fn new(
        app: &AppHandle,
        config: Config,
        base_url: Url,
    ) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let hosted = Arc::new(HostedApp::new(
            config,
            Arc::new(WebviewSurface::new(app.clone())),
        ));

        let links = Arc::new(ExternalLinks::new(app.clone()));
        let delegate: Arc<dyn NavigationDelegate> = links.clone();
        hosted.set_navigation_delegate(&delegate);

        Ok(Self {
            bridge: BridgeCommandSurface::new(hosted),
            links,
            prober: Arc::new(Prober::new()?),
            loads: Arc::new(LoadGeneration::default()),
            base_url,
        })
    }

    /// Forward notifications to the frontend and keep the navigation scope
    /// in step with the manifest, then load the bundled manifest.
    pub fn initialize(&self, app: &AppHandle) -> Result<()> {
        let hosted = self.hosted();

        let handle = app.clone();
        hosted.broadcaster().subscribe(move |notification| {
            if let Err(e) = handle.emit(notification.name.as_str(), notification) {
                tracing::warn!(
                    notification = %notification.name,
                    error = %e,
                    "Failed to forward notification"
                );
            }
        });

        let links = Arc::clone(&self.links);
        let manifests = hosted.manifests().clone();
        let base = self.base_url.clone();
        hosted
            .broadcaster()
            .subscribe_to(NotificationName::ManifestLoaded, move |_| {
                let scope = manifests
                    .current()
                    .and_then(|manifest| manifest_scope(&manifest, &base));
                links.set_scope(scope);
            });

        hosted.initialize()
    }

    pub fn hosted(&self) -> &HostedApp {
        self.bridge.app()
    }

    pub fn bridge(&self) -> &BridgeCommandSurface {
        &self.bridge
    }

    /// URL the content webview opens: the manifest's `start_url` resolved
    /// against the shell base URL, or the base URL itself.
    pub fn content_url(&self) -> Url {
        self.hosted()
            .manifest()
            .and_then(|manifest| {
                manifest
                    .start_url()
                    .and_then(|start| self.base_url.join(start).ok())
            })
            .unwrap_or_else(|| self.base_url.clone())
    }

    pub fn should_start_load(&self, url: &Url) -> bool {
        self.hosted()
            .should_start_load(&NavigationRequest::new(url.as_str()))
    }

    pub fn page_started(&self, url: &Url) {
        let generation = self.loads.begin();
        let url_text = url.to_string();
        self.hosted().handle_navigation(&NavigationEvent::DidStart {
            url: url_text.clone(),
        });

        if !Prober::applies_to(url) || self.hosted().offline().asset().matches(&url_text) {
            return;
        }

        let prober = Arc::clone(&self.prober);
        let loads = Arc::clone(&self.loads);
        let bridge = self.bridge.clone();
        let url = url.clone();
        tauri::async_runtime::spawn(async move {
            let Some(error) = prober.probe(&url).await else {
                return;
            };
            if !loads.is_current(generation) {
                tracing::debug!(url = %url, "Webview moved on, dropping stale probe result");
                return;
            }
            tracing::info!(url = %url, kind = %error.kind, "Main-frame load unreachable");
            bridge.app().handle_navigation(&NavigationEvent::DidFail {
                url: url.to_string(),
                error,
            });
        });
    }

    pub fn page_finished(&self, url: &Url) {
        self.hosted().handle_navigation(&NavigationEvent::DidFinish {
            url: url.to_string(),
        });
    }
}
