//! Content surface capability

use crate::asset::OfflineAsset;
use crate::Result;

/// The embedded web view hosting the application's pages.
///
/// Implementations must not block on navigation events; loads are
/// requested, not awaited.
pub trait ContentSurface: Send + Sync {
    /// Replace the current content with the offline page
    fn load_offline_asset(&self, asset: &OfflineAsset) -> Result<()>;

    /// Navigate to a live URL
    fn load_url(&self, url: &str) -> Result<()>;
}
