//! Hosted app state container
//!
//! Owns every component and does the wiring: the composer feeds the
//! lifecycle relay and the offline controller, and the manifest store's
//! loaded signal re-arms the controller and is announced to subscribers.

use std::sync::Arc;

use hwa_lifecycle::{LifecycleBroadcaster, NavigationRelay, NotificationName};
use hwa_manifest::{Manifest, ManifestError, ManifestStore};
use hwa_navigation::{DelegateComposer, NavigationDelegate, NavigationEvent, NavigationRequest};
use hwa_offline::{ContentSurface, OfflineController, OfflineState};

use crate::config::Config;
use crate::Result;

pub struct HostedApp {
    config: Config,
    manifests: ManifestStore,
    broadcaster: Arc<LifecycleBroadcaster>,
    composer: DelegateComposer,
    offline: Arc<OfflineController>,
}

impl HostedApp {
    pub fn new(config: Config, surface: Arc<dyn ContentSurface>) -> Self {
        let manifests = ManifestStore::new(config.assets_dir.clone());
        let broadcaster = Arc::new(LifecycleBroadcaster::new());
        let offline = Arc::new(
            OfflineController::new(
                manifests.clone(),
                surface,
                LifecycleBroadcaster::clone(&broadcaster),
                config.offline_asset(),
            )
            .with_connectivity_errors_only(config.connectivity_errors_only),
        );

        // The store owns this listener and the controller owns the store,
        // so only weak handles go in.
        {
            let offline = Arc::downgrade(&offline);
            let broadcaster = Arc::downgrade(&broadcaster);
            manifests.on_loaded(move |manifest| {
                if let Some(offline) = offline.upgrade() {
                    offline.manifest_loaded();
                }
                if let Some(broadcaster) = broadcaster.upgrade() {
                    broadcaster.emit(
                        NotificationName::ManifestLoaded,
                        manifest.start_url().map(str::to_string),
                    );
                }
            });
        }

        let composer = DelegateComposer::new();
        composer.add_listener(Arc::new(NavigationRelay::new(LifecycleBroadcaster::clone(
            &broadcaster,
        ))));
        let listener: Arc<dyn NavigationDelegate> = offline.clone();
        composer.add_listener(listener);

        Self {
            config,
            manifests,
            broadcaster,
            composer,
            offline,
        }
    }

    /// Load the bundled manifest and arm the offline page.
    ///
    /// A missing or broken default manifest is not an error; the offline
    /// page stays unavailable until a manifest loads.
    pub fn initialize(&self) -> Result<()> {
        match self.manifests.load_reference(&self.config.manifest_file) {
            Ok(_) => {}
            Err(ManifestError::NotFound(path)) => {
                tracing::debug!(path = %path, "No bundled manifest");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Bundled manifest could not be loaded");
            }
        }

        if self.config.offline_enabled_by_default {
            self.offline.enable();
        }

        tracing::info!(offline_state = %self.offline.state(), "Hosted app initialized");

        Ok(())
    }

    // === Manifest operations ===

    pub fn load_manifest(&self, reference: &str) -> Result<Arc<Manifest>> {
        Ok(self.manifests.load_reference(reference)?)
    }

    pub fn manifest(&self) -> Option<Arc<Manifest>> {
        self.manifests.current()
    }

    // === Offline page operations ===

    pub fn enable_offline_page(&self) -> OfflineState {
        self.offline.enable()
    }

    pub fn disable_offline_page(&self) -> OfflineState {
        self.offline.disable()
    }

    pub fn show_offline_page(&self) -> OfflineState {
        self.offline.show_offline_page()
    }

    pub fn hide_offline_page(&self) -> OfflineState {
        self.offline.hide_offline_page()
    }

    pub fn offline_state(&self) -> OfflineState {
        self.offline.state()
    }

    pub fn connectivity_changed(&self, online: bool) -> OfflineState {
        self.offline.connectivity_changed(online);
        self.offline.state()
    }

    // === Navigation ===

    /// Install the application's own navigation delegate.
    ///
    /// The caller keeps ownership; dropping it reverts to default-allow.
    pub fn set_navigation_delegate(&self, delegate: &Arc<dyn NavigationDelegate>) {
        self.composer.set_wrapped(delegate);
    }

    pub fn clear_navigation_delegate(&self) {
        self.composer.clear_wrapped();
    }

    pub fn should_start_load(&self, request: &NavigationRequest) -> bool {
        self.composer.should_start_load(request)
    }

    pub fn handle_navigation(&self, event: &NavigationEvent) {
        self.composer.dispatch(event);
    }

    // === Components ===

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn manifests(&self) -> &ManifestStore {
        &self.manifests
    }

    pub fn broadcaster(&self) -> &LifecycleBroadcaster {
        &self.broadcaster
    }

    pub fn composer(&self) -> &DelegateComposer {
        &self.composer
    }

    pub fn offline(&self) -> &OfflineController {
        &self.offline
    }
}
