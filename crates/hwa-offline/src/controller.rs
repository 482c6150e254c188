//! Offline controller
//!
//! Owns the offline state machine and applies its side effects: asking
//! the content surface to show the offline page and announcing the
//! substitution. The state lock is never held while the surface or the
//! broadcaster runs, because either may re-enter the controller through
//! the delegate composer.

use parking_lot::Mutex;
use std::sync::Arc;

use hwa_lifecycle::{LifecycleBroadcaster, NotificationName};
use hwa_manifest::ManifestStore;
use hwa_navigation::{NavigationDelegate, NavigationError};

use crate::asset::OfflineAsset;
use crate::state::OfflineState;
use crate::surface::ContentSurface;

#[derive(Debug)]
struct Inner {
    state: OfflineState,
    /// URL whose failure caused the current substitution
    last_failed_url: Option<String>,
    /// Last live URL the surface started loading
    last_url: Option<String>,
}

enum FailureAction {
    Observe,
    Substitute(String),
    Escalate,
}

pub struct OfflineController {
    inner: Arc<Mutex<Inner>>,
    manifests: ManifestStore,
    surface: Arc<dyn ContentSurface>,
    broadcaster: LifecycleBroadcaster,
    asset: OfflineAsset,
    /// Only substitute for failures that mean the content is unreachable
    connectivity_errors_only: bool,
}

impl OfflineController {
    /// Starts armed when `manifests` already holds a manifest, disabled
    /// otherwise.
    pub fn new(
        manifests: ManifestStore,
        surface: Arc<dyn ContentSurface>,
        broadcaster: LifecycleBroadcaster,
        asset: OfflineAsset,
    ) -> Self {
        let state = OfflineState::initial(manifests.is_loaded());

        Self {
            inner: Arc::new(Mutex::new(Inner {
                state,
                last_failed_url: None,
                last_url: None,
            })),
            manifests,
            surface,
            broadcaster,
            asset,
            connectivity_errors_only: false,
        }
    }

    pub fn with_connectivity_errors_only(mut self, enabled: bool) -> Self {
        self.connectivity_errors_only = enabled;
        self
    }

    pub fn state(&self) -> OfflineState {
        self.inner.lock().state
    }

    pub fn is_enabled(&self) -> bool {
        self.state().is_armed()
    }

    pub fn asset(&self) -> &OfflineAsset {
        &self.asset
    }

    pub fn last_failed_url(&self) -> Option<String> {
        self.inner.lock().last_failed_url.clone()
    }

    pub fn enable(&self) -> OfflineState {
        let manifest_present = self.manifests.is_loaded();
        self.transition(|state| state.enabled(manifest_present))
    }

    pub fn disable(&self) -> OfflineState {
        self.transition(OfflineState::disabled)
    }

    /// Receiver for the manifest store's loaded signal
    pub fn manifest_loaded(&self) -> OfflineState {
        self.transition(OfflineState::manifest_loaded)
    }

    /// Network reachability changed.
    ///
    /// Going offline shows the offline page right away; coming back online
    /// reloads the URL that failed.
    pub fn connectivity_changed(&self, online: bool) {
        if online {
            self.hide_offline_page();
        } else {
            self.show_offline_page();
        }
    }

    /// Put the offline page up in place of the current content.
    ///
    /// Only acts when armed with a manifest; the current URL is retried by
    /// `hide_offline_page`.
    pub fn show_offline_page(&self) -> OfflineState {
        let payload = {
            let mut inner = self.inner.lock();
            if inner.state != OfflineState::ArmedWithManifest {
                return inner.state;
            }
            inner.state = OfflineState::Substituting;
            inner.last_failed_url = inner.last_url.clone();
            inner.last_url.clone()
        };

        tracing::info!("Showing offline page");
        self.substitute(payload);
        self.state()
    }

    /// Take the offline page down, reloading the URL it replaced if any.
    pub fn hide_offline_page(&self) -> OfflineState {
        let (retry, state) = {
            let mut inner = self.inner.lock();
            if !inner.state.is_armed() {
                return inner.state;
            }
            if inner.state == OfflineState::Substituting {
                inner.state = OfflineState::ArmedWithManifest;
            }
            (inner.last_failed_url.take(), inner.state)
        };

        if let Some(url) = retry {
            tracing::info!(url = %url, "Offline page dismissed, reloading");
            if let Err(e) = self.surface.load_url(&url) {
                tracing::warn!(url = %url, error = %e, "Reload after offline page failed");
            }
        }
        state
    }

    fn transition<F>(&self, f: F) -> OfflineState
    where
        F: FnOnce(OfflineState) -> OfflineState,
    {
        let mut inner = self.inner.lock();
        let from = inner.state;
        let to = f(from);

        if from != to {
            tracing::debug!(from = %from, to = %to, "Offline state transition");
            inner.state = to;
            if to == OfflineState::Disabled {
                inner.last_failed_url = None;
            }
        }

        to
    }

    fn substitute(&self, payload: Option<String>) {
        match self.surface.load_offline_asset(&self.asset) {
            Ok(()) => {
                tracing::info!(
                    url = payload.as_deref().unwrap_or_default(),
                    "Offline page substituted"
                );
                self.broadcaster
                    .emit(NotificationName::OfflineSubstitutionApplied, payload);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Content surface refused the offline page");
                let mut inner = self.inner.lock();
                if inner.state == OfflineState::Substituting {
                    inner.state = OfflineState::ArmedWithManifest;
                    inner.last_failed_url = None;
                }
            }
        }
    }
}

impl NavigationDelegate for OfflineController {
    fn did_start_load(&self, url: &str) {
        if self.asset.matches(url) {
            return;
        }
        self.inner.lock().last_url = Some(url.to_string());
    }

    fn did_finish_load(&self, url: &str) {
        let mut inner = self.inner.lock();

        if self.asset.matches(url) {
            if inner.state == OfflineState::Substituting {
                tracing::debug!("Offline page finished loading");
                inner.state = OfflineState::ArmedWithManifest;
            }
            return;
        }

        // Live content loaded; nothing left to retry
        if inner.state == OfflineState::ArmedWithManifest {
            inner.last_failed_url = None;
        }
    }

    fn did_fail_load(&self, url: &str, error: &NavigationError) {
        let action = {
            let mut inner = self.inner.lock();
            match inner.state {
                OfflineState::Disabled | OfflineState::ArmedNoManifest => FailureAction::Observe,
                OfflineState::Substituting => {
                    inner.state = OfflineState::Disabled;
                    inner.last_failed_url = None;
                    FailureAction::Escalate
                }
                OfflineState::ArmedWithManifest if self.asset.matches(url) => {
                    inner.state = OfflineState::Disabled;
                    inner.last_failed_url = None;
                    FailureAction::Escalate
                }
                OfflineState::ArmedWithManifest
                    if self.connectivity_errors_only && !error.is_connectivity() =>
                {
                    FailureAction::Observe
                }
                OfflineState::ArmedWithManifest => {
                    inner.state = OfflineState::Substituting;
                    inner.last_failed_url = Some(url.to_string());
                    FailureAction::Substitute(url.to_string())
                }
            }
        };

        match action {
            FailureAction::Observe => {
                tracing::debug!(url = %url, error = %error, "Navigation failure observed");
            }
            FailureAction::Substitute(url) => self.substitute(Some(url)),
            FailureAction::Escalate => {
                tracing::error!(
                    url = %url,
                    error = %error,
                    "Offline page could not be shown, disabling substitution"
                );
                self.broadcaster.emit_escalated(
                    NotificationName::WebViewDidFailLoadWithError,
                    Some(format!("{}: {}", url, error)),
                );
            }
        }
    }
}

impl Clone for OfflineController {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            manifests: self.manifests.clone(),
            surface: Arc::clone(&self.surface),
            broadcaster: self.broadcaster.clone(),
            asset: self.asset.clone(),
            connectivity_errors_only: self.connectivity_errors_only,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OfflineError;
    use crate::Result;
    use hwa_lifecycle::Notification;

    #[derive(Default)]
    struct RecordingSurface {
        loads: Mutex<Vec<String>>,
        refuse: bool,
    }

    impl ContentSurface for RecordingSurface {
        fn load_offline_asset(&self, asset: &OfflineAsset) -> Result<()> {
            if self.refuse {
                return Err(OfflineError::Surface("detached".to_string()));
            }
            self.loads.lock().push(asset.url());
            Ok(())
        }

        fn load_url(&self, url: &str) -> Result<()> {
            self.loads.lock().push(url.to_string());
            Ok(())
        }
    }

    struct Fixture {
        manifests: ManifestStore,
        surface: Arc<RecordingSurface>,
        notifications: Arc<Mutex<Vec<Notification>>>,
        controller: OfflineController,
    }

    fn fixture_with(surface: RecordingSurface) -> Fixture {
        let manifests = ManifestStore::new(std::env::temp_dir());
        let surface = Arc::new(surface);
        let broadcaster = LifecycleBroadcaster::new();
        let notifications = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&notifications);
        broadcaster.subscribe(move |n| sink.lock().push(n.clone()));

        let controller = OfflineController::new(
            manifests.clone(),
            surface.clone(),
            broadcaster,
            OfflineAsset::bundled("offline.html"),
        );

        Fixture {
            manifests,
            surface,
            notifications,
            controller,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(RecordingSurface::default())
    }

    fn load_demo(f: &Fixture) {
        f.manifests
            .load_reference(r#"{"name":"Demo","start_url":"/index.html"}"#)
            .unwrap();
        f.controller.manifest_loaded();
    }

    fn unreachable() -> NavigationError {
        NavigationError::new("host unreachable")
    }

    #[test]
    fn test_initial_state() {
        let f = fixture();
        assert_eq!(f.controller.state(), OfflineState::Disabled);

        load_demo(&f);
        let armed = OfflineController::new(
            f.manifests.clone(),
            f.surface.clone(),
            LifecycleBroadcaster::new(),
            OfflineAsset::default(),
        );
        assert_eq!(armed.state(), OfflineState::ArmedWithManifest);
    }

    #[test]
    fn test_enable_disable_sequences() {
        #[derive(Clone, Copy)]
        enum Op {
            Enable,
            Disable,
        }

        for manifest_present in [false, true] {
            for len in 0..=4 {
                for bits in 0..(1u32 << len) {
                    let ops: Vec<Op> = (0..len)
                        .map(|i| if bits & (1 << i) == 0 { Op::Enable } else { Op::Disable })
                        .collect();

                    let f = fixture();
                    if manifest_present {
                        f.manifests.load_reference(r#"{"name":"Demo"}"#).unwrap();
                    }
                    let start = f.controller.state();

                    for op in &ops {
                        match op {
                            Op::Enable => f.controller.enable(),
                            Op::Disable => f.controller.disable(),
                        };
                    }

                    let expected = match ops.last() {
                        None => start,
                        Some(Op::Disable) => OfflineState::Disabled,
                        Some(Op::Enable) if manifest_present => OfflineState::ArmedWithManifest,
                        Some(Op::Enable) => OfflineState::ArmedNoManifest,
                    };
                    assert_eq!(f.controller.state(), expected);
                }
            }
        }
    }

    #[test]
    fn test_manifest_arrives_after_enable() {
        let f = fixture();
        assert_eq!(f.controller.enable(), OfflineState::ArmedNoManifest);

        f.controller.did_fail_load("/index.html", &unreachable());
        assert!(f.surface.loads.lock().is_empty());

        load_demo(&f);
        assert_eq!(f.controller.state(), OfflineState::ArmedWithManifest);
    }

    #[test]
    fn test_single_substitution() {
        let f = fixture();
        load_demo(&f);
        f.controller.enable();

        f.controller.did_start_load("/index.html");
        f.controller.did_fail_load("/index.html", &unreachable());

        assert_eq!(f.controller.state(), OfflineState::Substituting);
        assert_eq!(*f.surface.loads.lock(), vec!["offline.html"]);
        assert_eq!(f.controller.last_failed_url().as_deref(), Some("/index.html"));

        let substitutions: Vec<Notification> = f
            .notifications
            .lock()
            .iter()
            .filter(|n| n.name == NotificationName::OfflineSubstitutionApplied)
            .cloned()
            .collect();
        assert_eq!(substitutions.len(), 1);
        assert_eq!(substitutions[0].payload.as_deref(), Some("/index.html"));

        // A second failure while substituting never redirects again
        f.controller.did_fail_load("/index.html", &unreachable());
        assert_eq!(f.controller.state(), OfflineState::Disabled);
        assert_eq!(f.surface.loads.lock().len(), 1);

        let last = f.notifications.lock().last().cloned().unwrap();
        assert_eq!(last.name, NotificationName::WebViewDidFailLoadWithError);
        assert!(last.escalated);
    }

    #[test]
    fn test_offline_page_finish_rearms() {
        let f = fixture();
        load_demo(&f);
        f.controller.enable();

        f.controller.did_fail_load("/index.html", &unreachable());
        f.controller.did_finish_load("/index.html");
        assert_eq!(f.controller.state(), OfflineState::Substituting);

        f.controller.did_start_load("tauri://localhost/offline.html");
        f.controller.did_finish_load("tauri://localhost/offline.html");
        assert_eq!(f.controller.state(), OfflineState::ArmedWithManifest);

        // The next live failure substitutes again
        f.controller.did_fail_load("/about.html", &unreachable());
        assert_eq!(f.surface.loads.lock().len(), 2);
    }

    #[test]
    fn test_remote_page_named_like_offline_asset() {
        let f = fixture();
        load_demo(&f);
        f.controller.enable();

        f.controller
            .did_fail_load("https://shop.example.com/help/offline.html", &unreachable());

        assert_eq!(f.controller.state(), OfflineState::Substituting);
        assert_eq!(*f.surface.loads.lock(), vec!["offline.html"]);
        assert_eq!(
            f.controller.last_failed_url().as_deref(),
            Some("https://shop.example.com/help/offline.html")
        );
    }

    #[test]
    fn test_show_and_hide_offline_page() {
        let f = fixture();

        // Not armed: nothing to show
        assert_eq!(f.controller.show_offline_page(), OfflineState::Disabled);
        assert!(f.surface.loads.lock().is_empty());

        load_demo(&f);
        f.controller.enable();
        f.controller.did_start_load("/index.html");

        assert_eq!(f.controller.show_offline_page(), OfflineState::Substituting);
        assert_eq!(*f.surface.loads.lock(), vec!["offline.html"]);

        // Already showing
        f.controller.show_offline_page();
        assert_eq!(f.surface.loads.lock().len(), 1);

        assert_eq!(
            f.controller.hide_offline_page(),
            OfflineState::ArmedWithManifest
        );
        assert_eq!(
            *f.surface.loads.lock(),
            vec!["offline.html", "/index.html"]
        );
        assert!(f.controller.last_failed_url().is_none());

        let substitutions = f
            .notifications
            .lock()
            .iter()
            .filter(|n| n.name == NotificationName::OfflineSubstitutionApplied)
            .count();
        assert_eq!(substitutions, 1);
    }

    #[test]
    fn test_hide_without_failed_url() {
        let f = fixture();
        load_demo(&f);
        f.controller.enable();

        // Nothing started yet, so there is nothing to go back to
        f.controller.show_offline_page();
        assert_eq!(f.controller.state(), OfflineState::Substituting);

        assert_eq!(
            f.controller.hide_offline_page(),
            OfflineState::ArmedWithManifest
        );
        assert_eq!(*f.surface.loads.lock(), vec!["offline.html"]);
    }

    #[test]
    fn test_offline_page_failure_disables() {
        let f = fixture();
        load_demo(&f);
        f.controller.enable();

        f.controller.did_fail_load("offline.html", &unreachable());

        assert_eq!(f.controller.state(), OfflineState::Disabled);
        assert!(f.surface.loads.lock().is_empty());
    }

    #[test]
    fn test_disabled_never_redirects() {
        let f = fixture();
        f.controller.disable();

        f.controller.did_fail_load("/index.html", &unreachable());
        load_demo(&f);
        f.controller.did_fail_load("/index.html", &unreachable());

        assert_eq!(f.controller.state(), OfflineState::Disabled);
        assert!(f.surface.loads.lock().is_empty());

        f.controller.enable();
        f.controller.did_fail_load("/index.html", &unreachable());
        assert_eq!(f.surface.loads.lock().len(), 1);
    }

    #[test]
    fn test_refused_load_rearms() {
        let f = fixture_with(RecordingSurface {
            refuse: true,
            ..Default::default()
        });
        load_demo(&f);
        f.controller.enable();

        f.controller.did_fail_load("/index.html", &unreachable());

        assert_eq!(f.controller.state(), OfflineState::ArmedWithManifest);
        assert!(f
            .notifications
            .lock()
            .iter()
            .all(|n| n.name != NotificationName::OfflineSubstitutionApplied));
    }

    #[test]
    fn test_connectivity_errors_only() {
        let f = fixture();
        let controller = f.controller.clone().with_connectivity_errors_only(true);
        load_demo(&f);
        controller.enable();

        controller.did_fail_load("/index.html", &NavigationError::from_status(500));
        assert_eq!(controller.state(), OfflineState::ArmedWithManifest);

        controller.did_fail_load("/index.html", &NavigationError::from_status(404));
        assert_eq!(controller.state(), OfflineState::Substituting);
    }

    #[test]
    fn test_connectivity_round_trip() {
        let f = fixture();
        load_demo(&f);
        f.controller.enable();
        f.controller.did_start_load("/index.html");

        f.controller.connectivity_changed(false);
        assert_eq!(f.controller.state(), OfflineState::Substituting);
        assert_eq!(*f.surface.loads.lock(), vec!["offline.html"]);

        f.controller.connectivity_changed(true);
        assert_eq!(f.controller.state(), OfflineState::ArmedWithManifest);
        assert_eq!(
            *f.surface.loads.lock(),
            vec!["offline.html", "/index.html"]
        );

        // Nothing left to retry
        f.controller.connectivity_changed(true);
        assert_eq!(f.surface.loads.lock().len(), 2);
    }
}
