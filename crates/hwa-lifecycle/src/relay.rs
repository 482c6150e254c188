//! Navigation relay
//!
//! Internal navigation listener that republishes composer events as
//! `WebView*` notifications.

use hwa_navigation::{NavigationDelegate, NavigationError, NavigationRequest};

use crate::broadcaster::LifecycleBroadcaster;
use crate::notification::NotificationName;

pub struct NavigationRelay {
    broadcaster: LifecycleBroadcaster,
}

impl NavigationRelay {
    pub fn new(broadcaster: LifecycleBroadcaster) -> Self {
        Self { broadcaster }
    }
}

impl NavigationDelegate for NavigationRelay {
    fn should_start_load(&self, request: &NavigationRequest) -> bool {
        self.broadcaster.emit(
            NotificationName::WebViewShouldStartLoadWithRequest,
            Some(request.url.clone()),
        );
        true
    }

    fn did_start_load(&self, url: &str) {
        self.broadcaster
            .emit(NotificationName::WebViewDidStartLoad, Some(url.to_string()));
    }

    fn did_finish_load(&self, url: &str) {
        self.broadcaster
            .emit(NotificationName::WebViewDidFinishLoad, Some(url.to_string()));
    }

    fn did_fail_load(&self, url: &str, error: &NavigationError) {
        self.broadcaster.emit(
            NotificationName::WebViewDidFailLoadWithError,
            Some(format!("{}: {}", url, error)),
        );
    }
}
