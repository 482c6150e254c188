//! Navigation delegate capability

use crate::event::{NavigationError, NavigationRequest};

/// Navigation decision plus navigation observation.
///
/// Every method has a neutral default so implementors only override what
/// they care about. The default decision is to allow the load.
pub trait NavigationDelegate: Send + Sync {
    fn should_start_load(&self, _request: &NavigationRequest) -> bool {
        true
    }

    fn did_start_load(&self, _url: &str) {}

    fn did_finish_load(&self, _url: &str) {}

    fn did_fail_load(&self, _url: &str, _error: &NavigationError) {}
}
