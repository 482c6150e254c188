//! Manifest error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Manifest not found: {0}")]
    NotFound(String),

    #[error("Manifest parse failed: {0}")]
    ParseFailed(#[from] serde_json::Error),

    #[error("Manifest read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid manifest reference: {0}")]
    InvalidReference(String),
}

impl ManifestError {
    /// Stable code reported to bridge callers alongside the message
    pub fn code(&self) -> &'static str {
        match self {
            ManifestError::NotFound(_) => "not_found",
            ManifestError::ParseFailed(_) => "parse_failed",
            ManifestError::Io(_) => "io",
            ManifestError::InvalidReference(_) => "invalid_reference",
        }
    }
}
