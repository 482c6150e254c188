//! Delegate composition
//!
//! The content surface has a single navigation delegate slot. The composer
//! occupies it and forwards every event to the internal listeners first
//! and then to the delegate the application installed, so both observe the
//! same lifecycle and the application keeps the final say on decisions.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use crate::delegate::NavigationDelegate;
use crate::event::{NavigationError, NavigationEvent, NavigationRequest};

/// Nested dispatches beyond this depth are dropped
pub const MAX_DISPATCH_DEPTH: usize = 8;

pub struct DelegateComposer {
    /// Internal listeners, notified in registration order
    listeners: Arc<RwLock<Vec<Arc<dyn NavigationDelegate>>>>,
    /// Application delegate; not owned
    wrapped: Arc<RwLock<Option<Weak<dyn NavigationDelegate>>>>,
    /// Current dispatch nesting
    depth: Arc<AtomicUsize>,
}

struct DepthGuard {
    depth: Arc<AtomicUsize>,
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        self.depth.fetch_sub(1, Ordering::SeqCst);
    }
}

impl DelegateComposer {
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(RwLock::new(Vec::new())),
            wrapped: Arc::new(RwLock::new(None)),
            depth: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Install the application's delegate, replacing any previous one.
    ///
    /// Only a weak reference is kept; the caller owns the delegate.
    pub fn set_wrapped(&self, delegate: &Arc<dyn NavigationDelegate>) {
        *self.wrapped.write() = Some(Arc::downgrade(delegate));
        tracing::debug!("Navigation delegate installed");
    }

    pub fn clear_wrapped(&self) {
        *self.wrapped.write() = None;
    }

    /// True while an installed delegate is still alive
    pub fn has_wrapped(&self) -> bool {
        self.wrapped_delegate().is_some()
    }

    /// Register an internal listener. Listeners observe but never decide.
    pub fn add_listener(&self, listener: Arc<dyn NavigationDelegate>) {
        self.listeners.write().push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Ask whether a load may proceed.
    ///
    /// The installed delegate's answer is returned unchanged; with no live
    /// delegate the load is allowed.
    pub fn should_start_load(&self, request: &NavigationRequest) -> bool {
        if let Some(_guard) = self.enter() {
            for listener in self.snapshot() {
                listener.should_start_load(request);
            }
        }

        match self.wrapped_delegate() {
            Some(delegate) => delegate.should_start_load(request),
            None => true,
        }
    }

    pub fn did_start_load(&self, url: &str) {
        let Some(_guard) = self.enter() else {
            return;
        };

        for listener in self.snapshot() {
            listener.did_start_load(url);
        }
        if let Some(delegate) = self.wrapped_delegate() {
            delegate.did_start_load(url);
        }
    }

    pub fn did_finish_load(&self, url: &str) {
        let Some(_guard) = self.enter() else {
            return;
        };

        for listener in self.snapshot() {
            listener.did_finish_load(url);
        }
        if let Some(delegate) = self.wrapped_delegate() {
            delegate.did_finish_load(url);
        }
    }

    pub fn did_fail_load(&self, url: &str, error: &NavigationError) {
        let Some(_guard) = self.enter() else {
            return;
        };

        for listener in self.snapshot() {
            listener.did_fail_load(url, error);
        }
        if let Some(delegate) = self.wrapped_delegate() {
            delegate.did_fail_load(url, error);
        }
    }

    /// Route a lifecycle event to the matching callback
    pub fn dispatch(&self, event: &NavigationEvent) {
        match event {
            NavigationEvent::DidStart { url } => self.did_start_load(url),
            NavigationEvent::DidFinish { url } => self.did_finish_load(url),
            NavigationEvent::DidFail { url, error } => self.did_fail_load(url, error),
        }
    }

    fn wrapped_delegate(&self) -> Option<Arc<dyn NavigationDelegate>> {
        self.wrapped.read().as_ref().and_then(Weak::upgrade)
    }

    // No lock is held while delegates run, so they may re-enter.
    fn snapshot(&self) -> Vec<Arc<dyn NavigationDelegate>> {
        self.listeners.read().clone()
    }

    fn enter(&self) -> Option<DepthGuard> {
        let depth = self.depth.fetch_add(1, Ordering::SeqCst) + 1;
        let guard = DepthGuard {
            depth: Arc::clone(&self.depth),
        };

        if depth > MAX_DISPATCH_DEPTH {
            tracing::warn!(depth, "Navigation dispatch nested too deeply, dropping event");
            return None;
        }

        Some(guard)
    }
}

impl NavigationDelegate for DelegateComposer {
    fn should_start_load(&self, request: &NavigationRequest) -> bool {
        DelegateComposer::should_start_load(self, request)
    }

    fn did_start_load(&self, url: &str) {
        DelegateComposer::did_start_load(self, url)
    }

    fn did_finish_load(&self, url: &str) {
        DelegateComposer::did_finish_load(self, url)
    }

    fn did_fail_load(&self, url: &str, error: &NavigationError) {
        DelegateComposer::did_fail_load(self, url, error)
    }
}

impl Default for DelegateComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DelegateComposer {
    fn clone(&self) -> Self {
        Self {
            listeners: Arc::clone(&self.listeners),
            wrapped: Arc::clone(&self.wrapped),
            depth: Arc::clone(&self.depth),
        }
    }
}
