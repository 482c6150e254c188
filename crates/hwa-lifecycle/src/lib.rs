//! HWA Lifecycle
//!
//! Publishes navigation and manifest lifecycle notifications under a fixed,
//! documented vocabulary. Subscribers depend only on the notification
//! names, never on the components that produce them.

mod broadcaster;
mod notification;
mod relay;

pub use broadcaster::{LifecycleBroadcaster, SubscriptionId};
pub use notification::{Notification, NotificationName};
pub use relay::NavigationRelay;
