//! Reachability probe for main-frame loads
//!
//! The system webview reports page loads starting and finishing but not
//! failing, so every remote load is probed alongside it and a failure is
//! fed back to the composer as a failed load.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use hwa_core::{NavigationError, NavigationErrorKind};
use reqwest::redirect::Policy;
use url::Url;

pub struct Prober {
    client: reqwest::Client,
}

impl Prober {
    pub fn new() -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(Policy::limited(5))
            .timeout(Duration::from_secs(6))
            .build()?;
        Ok(Self { client })
    }

    /// Whether a URL is worth probing at all
    pub fn applies_to(url: &Url) -> bool {
        matches!(url.scheme(), "http" | "https")
    }

    /// Probe a URL, returning the failure the load is going to hit
    pub async fn probe(&self, url: &Url) -> Option<NavigationError> {
        let response = match self.client.head(url.clone()).send().await {
            Ok(resp) => Ok(resp),
            Err(_) => {
                self.client
                    .get(url.clone())
                    .header(reqwest::header::RANGE, "bytes=0-0")
                    .send()
                    .await
            }
        };

        match response {
            Ok(resp) => failure_for_status(resp.status().as_u16()),
            Err(e) => {
                let kind = if e.is_timeout() {
                    NavigationErrorKind::Timeout
                } else if e.is_connect() {
                    connect_kind(&e.to_string())
                } else {
                    NavigationErrorKind::Other
                };
                Some(NavigationError::with_kind(kind, e.to_string()))
            }
        }
    }
}

/// Counts main-frame loads so a late probe result can tell whether the
/// webview has moved on since it started.
#[derive(Debug, Default)]
pub struct LoadGeneration(AtomicU64);

impl LoadGeneration {
    /// Record a new load and return its generation
    pub fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.0.load(Ordering::SeqCst) == generation
    }
}

fn failure_for_status(status: u16) -> Option<NavigationError> {
    (status == 404).then(|| NavigationError::from_status(status))
}

fn connect_kind(message: &str) -> NavigationErrorKind {
    let lowered = message.to_lowercase();
    if lowered.contains("dns") || lowered.contains("resolve") || lowered.contains("name") {
        NavigationErrorKind::HostLookup
    } else {
        NavigationErrorKind::Connect
    }
}
