//! Manifest document
//!
//! The W3C web app manifest, kept as the parsed JSON object so that
//! unknown members survive a round trip. Typed accessors cover the
//! members the host shell reads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Result;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Display mode preferred by the web application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    Fullscreen,
    Standalone,
    MinimalUi,
    Browser,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Fullscreen => "fullscreen",
            DisplayMode::Standalone => "standalone",
            DisplayMode::MinimalUi => "minimal-ui",
            DisplayMode::Browser => "browser",
        }
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fullscreen" => Ok(DisplayMode::Fullscreen),
            "standalone" => Ok(DisplayMode::Standalone),
            "minimal-ui" => Ok(DisplayMode::MinimalUi),
            "browser" => Ok(DisplayMode::Browser),
            _ => Err(format!("Unknown display mode: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestIcon {
    pub src: String,
    #[serde(default)]
    pub sizes: Option<String>,
    #[serde(default, rename = "type")]
    pub mime_type: Option<String>,
}

/// Parsed manifest document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    document: Map<String, Value>,
}

impl Manifest {
    /// Parse manifest text. The top level must be a JSON object.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
        let document: Map<String, Value> = serde_json::from_str(text)?;
        Ok(Self { document })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.document
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.document.clone())
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.document)?)
    }

    pub fn name(&self) -> Option<&str> {
        self.str_member("name")
    }

    pub fn short_name(&self) -> Option<&str> {
        self.str_member("short_name")
    }

    pub fn start_url(&self) -> Option<&str> {
        self.str_member("start_url")
    }

    pub fn scope(&self) -> Option<&str> {
        self.str_member("scope")
    }

    /// Display mode, falling back to `browser` when absent or unrecognized
    pub fn display(&self) -> DisplayMode {
        self.str_member("display")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DisplayMode::Browser)
    }

    pub fn orientation(&self) -> Option<&str> {
        self.str_member("orientation")
    }

    pub fn theme_color(&self) -> Option<&str> {
        self.str_member("theme_color")
    }

    pub fn background_color(&self) -> Option<&str> {
        self.str_member("background_color")
    }

    /// Declared icons. Entries without a usable `src` are skipped.
    pub fn icons(&self) -> Vec<ManifestIcon> {
        let Some(Value::Array(items)) = self.document.get("icons") else {
            return Vec::new();
        };

        items
            .iter()
            .filter_map(|item| serde_json::from_value::<ManifestIcon>(item.clone()).ok())
            .filter(|icon| !icon.src.trim().is_empty())
            .collect()
    }

    /// Name to show for the app: `short_name`, then `name`
    pub fn display_name(&self) -> Option<&str> {
        self.short_name()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.name())
    }

    fn str_member(&self, key: &str) -> Option<&str> {
        self.document.get(key).and_then(Value::as_str)
    }
}
