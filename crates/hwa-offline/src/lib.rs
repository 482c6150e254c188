//! HWA Offline
//!
//! Decides, per navigation failure, whether the content surface should show
//! the bundled offline page instead of the live content.
//!
//! Per navigation failure:
//! 1. Disabled or no manifest → observe only
//! 2. Armed with a manifest → show the offline page once
//! 3. Failure while the offline page is up → disable, never redirect again

mod asset;
mod controller;
mod error;
mod state;
mod surface;

pub use asset::{OfflineAsset, DEFAULT_OFFLINE_MESSAGE};
pub use controller::OfflineController;
pub use error::OfflineError;
pub use state::OfflineState;
pub use surface::ContentSurface;

pub type Result<T> = std::result::Result<T, OfflineError>;
