//! HWA Core
//!
//! Coordination layer for a hosted web app: wires the manifest store, the
//! offline controller and the lifecycle broadcaster behind the navigation
//! delegate composer, and exposes the bridge commands the web layer calls.

mod app;
mod bridge;
mod config;
mod error;

pub use app::HostedApp;
pub use bridge::{BridgeCommand, BridgeCommandSurface, CommandFailure, CommandResult};
pub use config::Config;
pub use error::CoreError;

// Re-export core components
pub use hwa_lifecycle::{
    LifecycleBroadcaster, NavigationRelay, Notification, NotificationName, SubscriptionId,
};
pub use hwa_manifest::{
    DisplayMode, Manifest, ManifestError, ManifestIcon, ManifestSource, ManifestStore,
};
pub use hwa_navigation::{
    DelegateComposer, NavigationDelegate, NavigationError, NavigationErrorKind, NavigationEvent,
    NavigationRequest,
};
pub use hwa_offline::{
    ContentSurface, OfflineAsset, OfflineController, OfflineError, OfflineState,
    DEFAULT_OFFLINE_MESSAGE,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
