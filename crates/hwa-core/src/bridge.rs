//! Bridge command surface
//!
//! Commands the web layer invokes by name with JSON arguments:
//! - `loadManifest`: load a manifest reference, returns the manifest
//! - `getManifest`: current manifest or `null`
//! - `enableOfflinePage` / `disableOfflinePage`: toggle the offline page
//! - `showOfflinePage` / `hideOfflinePage`: put the offline page up or
//!   take it down on demand
//! - `networkStatusChanged`: report reachability changes

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::app::HostedApp;
use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandFailure {
    pub code: String,
    pub message: String,
}

impl From<&CoreError> for CommandFailure {
    fn from(error: &CoreError) -> Self {
        Self {
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<CommandFailure>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: &CoreError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(CommandFailure::from(error)),
        }
    }
}

impl<T> From<Result<T>> for CommandResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => CommandResult::ok(data),
            Err(e) => CommandResult::err(&e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeCommand {
    LoadManifest { source: String },
    GetManifest,
    EnableOfflinePage,
    DisableOfflinePage,
    ShowOfflinePage,
    HideOfflinePage,
    NetworkStatusChanged { online: bool },
}

impl BridgeCommand {
    /// Parse a command name and its arguments.
    ///
    /// Arguments may be positional (`["manifest.json"]`), named
    /// (`{"source": "manifest.json"}`) or a bare value.
    pub fn parse(name: &str, args: &Value) -> Result<Self> {
        match name {
            "loadManifest" => {
                let source = argument(args, "source")
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .ok_or_else(|| {
                        CoreError::InvalidArguments("manifest source required".to_string())
                    })?;
                Ok(BridgeCommand::LoadManifest {
                    source: source.to_string(),
                })
            }
            "getManifest" => Ok(BridgeCommand::GetManifest),
            "enableOfflinePage" => Ok(BridgeCommand::EnableOfflinePage),
            "disableOfflinePage" => Ok(BridgeCommand::DisableOfflinePage),
            "showOfflinePage" => Ok(BridgeCommand::ShowOfflinePage),
            "hideOfflinePage" => Ok(BridgeCommand::HideOfflinePage),
            "networkStatusChanged" => {
                let online = argument(args, "online")
                    .and_then(Value::as_bool)
                    .ok_or_else(|| {
                        CoreError::InvalidArguments("online flag required".to_string())
                    })?;
                Ok(BridgeCommand::NetworkStatusChanged { online })
            }
            _ => Err(CoreError::UnknownCommand(name.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BridgeCommand::LoadManifest { .. } => "loadManifest",
            BridgeCommand::GetManifest => "getManifest",
            BridgeCommand::EnableOfflinePage => "enableOfflinePage",
            BridgeCommand::DisableOfflinePage => "disableOfflinePage",
            BridgeCommand::ShowOfflinePage => "showOfflinePage",
            BridgeCommand::HideOfflinePage => "hideOfflinePage",
            BridgeCommand::NetworkStatusChanged { .. } => "networkStatusChanged",
        }
    }
}

fn argument<'a>(args: &'a Value, key: &str) -> Option<&'a Value> {
    match args {
        Value::Array(items) => items.first(),
        Value::Object(map) => map.get(key),
        Value::Null => None,
        other => Some(other),
    }
}

/// Adapter between the web layer's invoke channel and the hosted app
pub struct BridgeCommandSurface {
    app: Arc<HostedApp>,
}

impl BridgeCommandSurface {
    pub fn new(app: Arc<HostedApp>) -> Self {
        Self { app }
    }

    pub fn app(&self) -> &HostedApp {
        &self.app
    }

    /// Run a command by name
    pub fn invoke(&self, name: &str, args: &Value) -> CommandResult<Value> {
        let result = BridgeCommand::parse(name, args).and_then(|command| self.execute(&command));

        if let Err(e) = &result {
            tracing::warn!(command = %name, code = e.code(), error = %e, "Bridge command failed");
        }

        result.into()
    }

    pub fn execute(&self, command: &BridgeCommand) -> Result<Value> {
        tracing::debug!(command = command.name(), "Bridge command");

        match command {
            BridgeCommand::LoadManifest { source } => {
                let manifest = self.app.load_manifest(source)?;
                Ok(manifest.to_value())
            }
            BridgeCommand::GetManifest => Ok(self
                .app
                .manifest()
                .map(|m| m.to_value())
                .unwrap_or(Value::Null)),
            BridgeCommand::EnableOfflinePage => {
                Ok(json!({ "state": self.app.enable_offline_page() }))
            }
            BridgeCommand::DisableOfflinePage => {
                Ok(json!({ "state": self.app.disable_offline_page() }))
            }
            BridgeCommand::ShowOfflinePage => {
                Ok(json!({ "state": self.app.show_offline_page() }))
            }
            BridgeCommand::HideOfflinePage => {
                Ok(json!({ "state": self.app.hide_offline_page() }))
            }
            BridgeCommand::NetworkStatusChanged { online } => {
                Ok(json!({ "state": self.app.connectivity_changed(*online) }))
            }
        }
    }
}

impl Clone for BridgeCommandSurface {
    fn clone(&self) -> Self {
        Self {
            app: Arc::clone(&self.app),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use hwa_offline::{ContentSurface, OfflineAsset};

    struct NullSurface;

    impl ContentSurface for NullSurface {
        fn load_offline_asset(&self, _asset: &OfflineAsset) -> hwa_offline::Result<()> {
            Ok(())
        }

        fn load_url(&self, _url: &str) -> hwa_offline::Result<()> {
            Ok(())
        }
    }

    fn surface() -> BridgeCommandSurface {
        let dir = std::env::temp_dir().join(format!("hwa-bridge-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let app = HostedApp::new(Config::new(dir), Arc::new(NullSurface));
        BridgeCommandSurface::new(Arc::new(app))
    }

    #[test]
    fn test_parse_arguments() {
        assert_eq!(
            BridgeCommand::parse("loadManifest", &json!(["manifest.json"])).unwrap(),
            BridgeCommand::LoadManifest {
                source: "manifest.json".to_string()
            }
        );
        assert_eq!(
            BridgeCommand::parse("loadManifest", &json!({"source": "a.json"})).unwrap(),
            BridgeCommand::LoadManifest {
                source: "a.json".to_string()
            }
        );
        assert_eq!(
            BridgeCommand::parse("networkStatusChanged", &json!({"online": false})).unwrap(),
            BridgeCommand::NetworkStatusChanged { online: false }
        );

        let err = BridgeCommand::parse("loadManifest", &json!([])).unwrap_err();
        assert_eq!(err.code(), "invalid_arguments");

        let err = BridgeCommand::parse("injectPluginScript", &Value::Null).unwrap_err();
        assert_eq!(err.code(), "unknown_command");
    }

    #[test]
    fn test_manifest_commands() {
        let bridge = surface();

        let none = bridge.invoke("getManifest", &Value::Null);
        assert!(none.success);
        assert_eq!(none.data, Some(Value::Null));

        let document = r#"{"name":"Demo","start_url":"/index.html"}"#;
        let loaded = bridge.invoke("loadManifest", &json!([document]));
        assert!(loaded.success);
        assert_eq!(
            loaded.data,
            Some(json!({"name": "Demo", "start_url": "/index.html"}))
        );

        let fetched = bridge.invoke("getManifest", &json!([]));
        assert_eq!(fetched.data, loaded.data);
    }

    #[test]
    fn test_manifest_failures() {
        let bridge = surface();
        bridge.invoke("loadManifest", &json!([r#"{"name":"Kept"}"#]));

        let missing = bridge.invoke("loadManifest", &json!(["nope.json"]));
        assert!(!missing.success);
        assert_eq!(missing.error.as_ref().unwrap().code, "not_found");

        let broken = bridge.invoke("loadManifest", &json!(["{\"name\":"]));
        let failure = broken.error.unwrap();
        assert_eq!(failure.code, "parse_failed");
        assert!(failure.message.starts_with("Manifest parse failed"));

        for document in ["[1,2]", "\"Demo\"", "null"] {
            let rejected = bridge.invoke("loadManifest", &json!([document]));
            assert_eq!(rejected.error.unwrap().code, "parse_failed");
        }

        let kept = bridge.invoke("getManifest", &Value::Null);
        assert_eq!(kept.data, Some(json!({"name": "Kept"})));
    }

    #[test]
    fn test_offline_toggle_acknowledgement() {
        let bridge = surface();

        let enabled = bridge.invoke("enableOfflinePage", &Value::Null);
        assert_eq!(enabled.data, Some(json!({"state": "armed_no_manifest"})));

        bridge.invoke("loadManifest", &json!({"source": r#"{"name":"Demo"}"#}));
        assert_eq!(
            bridge.app().offline_state(),
            hwa_offline::OfflineState::ArmedWithManifest
        );

        let disabled = bridge.invoke("disableOfflinePage", &json!([]));
        assert_eq!(disabled.data, Some(json!({"state": "disabled"})));

        let serialized = serde_json::to_value(&disabled).unwrap();
        assert_eq!(serialized["success"], json!(true));
        assert_eq!(serialized["error"], Value::Null);
    }

    #[test]
    fn test_show_and_hide_offline_page() {
        let bridge = surface();

        // No manifest yet: the page cannot be shown
        bridge.invoke("enableOfflinePage", &Value::Null);
        let refused = bridge.invoke("showOfflinePage", &Value::Null);
        assert_eq!(refused.data, Some(json!({"state": "armed_no_manifest"})));

        bridge.invoke("loadManifest", &json!([r#"{"name":"Demo"}"#]));
        bridge
            .app()
            .handle_navigation(&hwa_navigation::NavigationEvent::DidStart {
                url: "/index.html".to_string(),
            });

        let shown = bridge.invoke("showOfflinePage", &json!([]));
        assert_eq!(shown.data, Some(json!({"state": "substituting"})));
        assert_eq!(
            bridge.app().offline().last_failed_url().as_deref(),
            Some("/index.html")
        );

        let hidden = bridge.invoke("hideOfflinePage", &Value::Null);
        assert_eq!(hidden.data, Some(json!({"state": "armed_with_manifest"})));
        assert!(bridge.app().offline().last_failed_url().is_none());
    }
}
