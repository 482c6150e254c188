//! Offline State Machine
//!
//! | from | enable | disable | manifest loaded |
//! |---|---|---|---|
//! | Disabled | ArmedWithManifest / ArmedNoManifest | Disabled | Disabled |
//! | ArmedNoManifest | - | Disabled | ArmedWithManifest |
//! | ArmedWithManifest | - | Disabled | - |
//! | Substituting | - | Disabled | - |
//!
//! Navigation failures and offline page loads are handled by the
//! controller, which owns the side effects.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfflineState {
    /// Offline page turned off
    Disabled,
    /// Turned on, waiting for a manifest
    ArmedNoManifest,
    /// Failures will be replaced by the offline page
    ArmedWithManifest,
    /// The offline page is being shown in place of failed content
    Substituting,
}

impl OfflineState {
    /// State for a freshly built controller
    pub fn initial(manifest_present: bool) -> Self {
        if manifest_present {
            OfflineState::ArmedWithManifest
        } else {
            OfflineState::Disabled
        }
    }

    pub fn enabled(self, manifest_present: bool) -> Self {
        match self {
            OfflineState::Disabled if manifest_present => OfflineState::ArmedWithManifest,
            OfflineState::Disabled => OfflineState::ArmedNoManifest,
            armed => armed,
        }
    }

    pub fn disabled(self) -> Self {
        OfflineState::Disabled
    }

    pub fn manifest_loaded(self) -> Self {
        match self {
            OfflineState::ArmedNoManifest => OfflineState::ArmedWithManifest,
            other => other,
        }
    }

    pub fn is_armed(&self) -> bool {
        !matches!(self, OfflineState::Disabled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OfflineState::Disabled => "disabled",
            OfflineState::ArmedNoManifest => "armed_no_manifest",
            OfflineState::ArmedWithManifest => "armed_with_manifest",
            OfflineState::Substituting => "substituting",
        }
    }
}

impl std::fmt::Display for OfflineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OfflineState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "disabled" => Ok(OfflineState::Disabled),
            "armed_no_manifest" => Ok(OfflineState::ArmedNoManifest),
            "armed_with_manifest" => Ok(OfflineState::ArmedWithManifest),
            "substituting" => Ok(OfflineState::Substituting),
            _ => Err(format!("Unknown offline state: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enable_transitions() {
        assert_eq!(
            OfflineState::Disabled.enabled(true),
            OfflineState::ArmedWithManifest
        );
        assert_eq!(
            OfflineState::Disabled.enabled(false),
            OfflineState::ArmedNoManifest
        );
        // Already armed: no-op
        assert_eq!(
            OfflineState::ArmedNoManifest.enabled(true),
            OfflineState::ArmedNoManifest
        );
        assert_eq!(
            OfflineState::Substituting.enabled(true),
            OfflineState::Substituting
        );
    }

    #[test]
    fn test_manifest_loaded_transitions() {
        assert_eq!(
            OfflineState::ArmedNoManifest.manifest_loaded(),
            OfflineState::ArmedWithManifest
        );
        assert_eq!(
            OfflineState::Disabled.manifest_loaded(),
            OfflineState::Disabled
        );
        assert_eq!(
            OfflineState::Substituting.manifest_loaded(),
            OfflineState::Substituting
        );
    }

    #[test]
    fn test_disable_from_anywhere() {
        for state in [
            OfflineState::Disabled,
            OfflineState::ArmedNoManifest,
            OfflineState::ArmedWithManifest,
            OfflineState::Substituting,
        ] {
            assert_eq!(state.disabled(), OfflineState::Disabled);
            assert_eq!(state.as_str().parse::<OfflineState>().unwrap(), state);
        }
    }

    #[test]
    fn test_initial() {
        assert_eq!(OfflineState::initial(false), OfflineState::Disabled);
        assert_eq!(OfflineState::initial(true), OfflineState::ArmedWithManifest);
    }
}
