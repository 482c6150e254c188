//! Lifecycle broadcaster
//!
//! Synchronous publish/subscribe keyed by notification name. Emitting with
//! no subscribers is a no-op; handlers run on the emitting thread.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::notification::{Notification, NotificationName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(Uuid);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

type Handler = Arc<dyn Fn(&Notification) + Send + Sync>;

#[derive(Clone)]
struct Subscription {
    id: SubscriptionId,
    /// `None` receives every notification
    filter: Option<NotificationName>,
    handler: Handler,
}

pub struct LifecycleBroadcaster {
    subscriptions: Arc<RwLock<Vec<Subscription>>>,
}

impl LifecycleBroadcaster {
    pub fn new() -> Self {
        Self {
            subscriptions: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Receive every notification
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&Notification) + Send + Sync + 'static,
    {
        self.add(None, Arc::new(handler))
    }

    /// Receive notifications with one name only
    pub fn subscribe_to<F>(&self, name: NotificationName, handler: F) -> SubscriptionId
    where
        F: Fn(&Notification) + Send + Sync + 'static,
    {
        self.add(Some(name), Arc::new(handler))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscriptions = self.subscriptions.write();
        let before = subscriptions.len();
        subscriptions.retain(|s| s.id != id);
        before != subscriptions.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.read().len()
    }

    pub fn emit(&self, name: NotificationName, payload: Option<String>) {
        self.publish(Notification::new(name, payload));
    }

    pub fn emit_escalated(&self, name: NotificationName, payload: Option<String>) {
        self.publish(Notification::escalated(name, payload));
    }

    pub fn publish(&self, notification: Notification) {
        // Handlers may subscribe or emit themselves
        let targets: Vec<Handler> = self
            .subscriptions
            .read()
            .iter()
            .filter(|s| s.filter.map_or(true, |name| name == notification.name))
            .map(|s| Arc::clone(&s.handler))
            .collect();

        tracing::trace!(
            name = %notification.name,
            payload = notification.payload.as_deref().unwrap_or_default(),
            subscribers = targets.len(),
            "Lifecycle notification"
        );

        for handler in targets {
            handler(&notification);
        }
    }

    fn add(&self, filter: Option<NotificationName>, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(Uuid::new_v4());
        self.subscriptions.write().push(Subscription {
            id,
            filter,
            handler,
        });
        id
    }
}

impl Default for LifecycleBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LifecycleBroadcaster {
    fn clone(&self) -> Self {
        Self {
            subscriptions: Arc::clone(&self.subscriptions),
        }
    }
}
