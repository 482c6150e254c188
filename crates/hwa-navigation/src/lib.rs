//! HWA Navigation
//!
//! Navigation lifecycle events from the content surface and the composer
//! that fans them out to internal listeners and to the application's own
//! navigation delegate.

mod composer;
mod delegate;
mod event;

pub use composer::{DelegateComposer, MAX_DISPATCH_DEPTH};
pub use delegate::NavigationDelegate;
pub use event::{NavigationError, NavigationErrorKind, NavigationEvent, NavigationRequest};
