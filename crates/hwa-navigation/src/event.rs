//! Navigation event types

use serde::{Deserialize, Serialize};

/// A request the content surface is about to load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationRequest {
    pub url: String,
    /// False for subframe loads
    #[serde(default = "default_main_frame")]
    pub is_main_frame: bool,
}

fn default_main_frame() -> bool {
    true
}

impl NavigationRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            is_main_frame: true,
        }
    }

    pub fn subframe(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            is_main_frame: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationErrorKind {
    HostLookup,
    Connect,
    Timeout,
    NotFound,
    Other,
}

impl NavigationErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavigationErrorKind::HostLookup => "host_lookup",
            NavigationErrorKind::Connect => "connect",
            NavigationErrorKind::Timeout => "timeout",
            NavigationErrorKind::NotFound => "not_found",
            NavigationErrorKind::Other => "other",
        }
    }

    /// Best-effort classification of a host error description
    pub fn classify(description: &str) -> Self {
        let lowered = description.to_lowercase();
        if lowered.contains("dns")
            || lowered.contains("resolve")
            || lowered.contains("host lookup")
            || lowered.contains("name not known")
        {
            NavigationErrorKind::HostLookup
        } else if lowered.contains("timed out") || lowered.contains("timeout") {
            NavigationErrorKind::Timeout
        } else if lowered.contains("unreachable")
            || lowered.contains("refused")
            || lowered.contains("connect")
            || lowered.contains("offline")
            || lowered.contains("network")
        {
            NavigationErrorKind::Connect
        } else if lowered.contains("404") || lowered.contains("not found") {
            NavigationErrorKind::NotFound
        } else {
            NavigationErrorKind::Other
        }
    }
}

impl std::fmt::Display for NavigationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Opaque failure reported by the content surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationError {
    pub kind: NavigationErrorKind,
    pub description: String,
}

impl NavigationError {
    /// Build from a host description, classifying it on the way
    pub fn new(description: impl Into<String>) -> Self {
        let description = description.into();
        Self {
            kind: NavigationErrorKind::classify(&description),
            description,
        }
    }

    pub fn with_kind(kind: NavigationErrorKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
        }
    }

    /// Build from an HTTP status of a main-frame response
    pub fn from_status(status: u16) -> Self {
        let kind = if status == 404 {
            NavigationErrorKind::NotFound
        } else {
            NavigationErrorKind::Other
        };
        Self {
            kind,
            description: format!("HTTP status {}", status),
        }
    }

    /// True for failures that mean the content could not be reached
    pub fn is_connectivity(&self) -> bool {
        !matches!(self.kind, NavigationErrorKind::Other)
    }
}

impl std::fmt::Display for NavigationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description)
    }
}

/// Lifecycle signal emitted by the content surface during a page load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavigationEvent {
    DidStart { url: String },
    DidFinish { url: String },
    DidFail { url: String, error: NavigationError },
}

impl NavigationEvent {
    pub fn url(&self) -> &str {
        match self {
            NavigationEvent::DidStart { url }
            | NavigationEvent::DidFinish { url }
            | NavigationEvent::DidFail { url, .. } => url,
        }
    }
}
