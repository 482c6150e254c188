//! HWA Manifest
//!
//! Loads the web application manifest and keeps the latest successfully
//! parsed copy. A manifest is immutable once published; a reload swaps in a
//! whole new instance.

mod error;
mod manifest;
mod source;
mod store;

pub use error::ManifestError;
pub use manifest::{DisplayMode, Manifest, ManifestIcon};
pub use source::ManifestSource;
pub use store::ManifestStore;

pub type Result<T> = std::result::Result<T, ManifestError>;
