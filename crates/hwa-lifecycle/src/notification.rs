//! Notification vocabulary
//!
//! External code matches on these exact strings:
//! - `WebViewDidStartLoad`
//! - `WebViewShouldStartLoadWithRequest`
//! - `WebViewDidFinishLoad`
//! - `WebViewDidFailLoadWithError`
//! - `ManifestLoaded`
//! - `OfflineSubstitutionApplied`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationName {
    WebViewDidStartLoad,
    WebViewShouldStartLoadWithRequest,
    WebViewDidFinishLoad,
    WebViewDidFailLoadWithError,
    ManifestLoaded,
    OfflineSubstitutionApplied,
}

impl NotificationName {
    pub const ALL: [NotificationName; 6] = [
        NotificationName::WebViewDidStartLoad,
        NotificationName::WebViewShouldStartLoadWithRequest,
        NotificationName::WebViewDidFinishLoad,
        NotificationName::WebViewDidFailLoadWithError,
        NotificationName::ManifestLoaded,
        NotificationName::OfflineSubstitutionApplied,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationName::WebViewDidStartLoad => "WebViewDidStartLoad",
            NotificationName::WebViewShouldStartLoadWithRequest => {
                "WebViewShouldStartLoadWithRequest"
            }
            NotificationName::WebViewDidFinishLoad => "WebViewDidFinishLoad",
            NotificationName::WebViewDidFailLoadWithError => "WebViewDidFailLoadWithError",
            NotificationName::ManifestLoaded => "ManifestLoaded",
            NotificationName::OfflineSubstitutionApplied => "OfflineSubstitutionApplied",
        }
    }
}

impl std::fmt::Display for NotificationName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for NotificationName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NotificationName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| format!("Unknown notification: {}", s))
    }
}

/// A broadcast lifecycle notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub name: NotificationName,
    /// URL or error description, depending on the name
    pub payload: Option<String>,
    /// Set when the offline fallback itself could not be shown
    #[serde(default)]
    pub escalated: bool,
    pub emitted_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(name: NotificationName, payload: Option<String>) -> Self {
        Self {
            name,
            payload,
            escalated: false,
            emitted_at: Utc::now(),
        }
    }

    pub fn escalated(name: NotificationName, payload: Option<String>) -> Self {
        Self {
            escalated: true,
            ..Self::new(name, payload)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_stable() {
        let names: Vec<&str> = NotificationName::ALL.iter().map(|n| n.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "WebViewDidStartLoad",
                "WebViewShouldStartLoadWithRequest",
                "WebViewDidFinishLoad",
                "WebViewDidFailLoadWithError",
                "ManifestLoaded",
                "OfflineSubstitutionApplied",
            ]
        );
    }

    #[test]
    fn test_serialized_names_match() {
        for name in NotificationName::ALL {
            let json = serde_json::to_string(&name).unwrap();
            assert_eq!(json, format!("\"{}\"", name.as_str()));
            assert_eq!(name.as_str().parse::<NotificationName>().unwrap(), name);
        }
        assert!("webviewdidstartload".parse::<NotificationName>().is_err());
    }
}
