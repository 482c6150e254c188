//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Manifest(#[from] hwa_manifest::ManifestError),

    #[error(transparent)]
    Offline(#[from] hwa_offline::OfflineError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Hosted app not initialized")]
    NotInitialized,

    #[error("Background task failed: {0}")]
    Task(String),
}

impl CoreError {
    /// Stable code reported to bridge callers
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::Manifest(e) => e.code(),
            CoreError::Offline(_) => "content_surface",
            CoreError::Serialization(_) => "serialization",
            CoreError::UnknownCommand(_) => "unknown_command",
            CoreError::InvalidArguments(_) => "invalid_arguments",
            CoreError::NotInitialized => "not_initialized",
            CoreError::Task(_) => "task_failed",
        }
    }
}
