//! Offline page asset

use serde::{Deserialize, Serialize};

pub const DEFAULT_OFFLINE_MESSAGE: &str =
    "It looks like you are offline. Please reconnect to use this application.";

const INLINE_TEMPLATE: &str = "<html><body><div style=\"top:50%;text-align:center;position:absolute\">{message}</div></body></html>";

/// Page shown in place of content that failed to load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OfflineAsset {
    /// Page bundled with the application
    Bundled { url: String },
    /// Generated page showing a single message
    Inline { message: String },
}

impl OfflineAsset {
    pub fn bundled(url: impl Into<String>) -> Self {
        OfflineAsset::Bundled { url: url.into() }
    }

    pub fn inline(message: impl Into<String>) -> Self {
        OfflineAsset::Inline {
            message: message.into(),
        }
    }

    /// URL the content surface should load
    pub fn url(&self) -> String {
        match self {
            OfflineAsset::Bundled { url } => url.clone(),
            OfflineAsset::Inline { message } => {
                let html = INLINE_TEMPLATE.replace("{message}", &escape_html(message));
                format!("data:text/html;charset=utf-8,{}", urlencoding::encode(&html))
            }
        }
    }

    /// Whether a URL reported by the content surface is this asset.
    ///
    /// Surfaces report absolute URLs, so a relative bundled path also
    /// matches a local URL whose path ends with it. Network URLs only ever
    /// match exactly; a live page may share the asset's file name.
    pub fn matches(&self, reported: &str) -> bool {
        let reported = reported.split('#').next().unwrap_or(reported);

        match self {
            OfflineAsset::Bundled { url } => {
                let url = url.split('#').next().unwrap_or(url);
                if reported == url {
                    return true;
                }
                if url.contains("://") || is_network_url(reported) {
                    return false;
                }
                let relative = url.trim_start_matches('/');
                let path = reported.split('?').next().unwrap_or(reported);
                !relative.is_empty() && path.ends_with(&format!("/{}", relative))
            }
            OfflineAsset::Inline { .. } => reported == self.url(),
        }
    }
}

impl Default for OfflineAsset {
    fn default() -> Self {
        OfflineAsset::inline(DEFAULT_OFFLINE_MESSAGE)
    }
}

fn is_network_url(url: &str) -> bool {
    let lowered = url.to_ascii_lowercase();
    lowered.starts_with("http://") || lowered.starts_with("https://")
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
