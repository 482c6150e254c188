//! Manifest source references

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ManifestError;
use crate::Result;

/// Where a manifest comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    /// A bundled or previously downloaded file
    File(PathBuf),
    /// Manifest text that is already in memory
    Document(String),
}

impl ManifestSource {
    /// Resolve a bridge reference.
    ///
    /// Accepts inline JSON, `file://` URLs, absolute paths, and paths
    /// relative to `assets_dir`.
    pub fn resolve(reference: &str, assets_dir: &Path) -> Result<Self> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(ManifestError::InvalidReference(
                "reference cannot be empty".to_string(),
            ));
        }

        if looks_like_document(reference) {
            return Ok(ManifestSource::Document(reference.to_string()));
        }

        if reference.starts_with("file://") {
            let url = Url::parse(reference)
                .map_err(|e| ManifestError::InvalidReference(format!("{}: {}", reference, e)))?;
            let path = url
                .to_file_path()
                .map_err(|_| ManifestError::InvalidReference(reference.to_string()))?;
            return Ok(ManifestSource::File(path));
        }

        if reference.contains("://") {
            return Err(ManifestError::InvalidReference(format!(
                "only local references are supported: {}",
                reference
            )));
        }

        let path = Path::new(reference);
        if path.is_absolute() {
            Ok(ManifestSource::File(path.to_path_buf()))
        } else {
            Ok(ManifestSource::File(assets_dir.join(path)))
        }
    }

    /// Human readable description for logs and notifications
    pub fn describe(&self) -> String {
        match self {
            ManifestSource::File(path) => path.display().to_string(),
            ManifestSource::Document(_) => "<inline document>".to_string(),
        }
    }

    pub(crate) fn read(&self) -> Result<String> {
        match self {
            ManifestSource::File(path) => std::fs::read_to_string(path).map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    ManifestError::NotFound(path.display().to_string())
                } else {
                    ManifestError::Io(e)
                }
            }),
            ManifestSource::Document(text) => Ok(text.clone()),
        }
    }
}

/// JSON text of any shape, so non-object documents fail to parse instead of
/// being looked up as file names
fn looks_like_document(reference: &str) -> bool {
    reference.starts_with(['{', '[', '"'])
        || serde_json::from_str::<serde_json::Value>(reference).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative() {
        let source = ManifestSource::resolve("manifest.json", Path::new("/app/www")).unwrap();
        assert_eq!(
            source,
            ManifestSource::File(PathBuf::from("/app/www/manifest.json"))
        );
    }

    #[test]
    fn test_resolve_document() {
        let source = ManifestSource::resolve("  {\"name\":\"Demo\"}", Path::new("/app")).unwrap();
        assert_eq!(
            source,
            ManifestSource::Document("{\"name\":\"Demo\"}".to_string())
        );
    }

    #[test]
    fn test_resolve_non_object_documents() {
        for text in ["[1,2]", "\"Demo\"", "null", "true", "42", "[broken"] {
            let source = ManifestSource::resolve(text, Path::new("/app")).unwrap();
            assert_eq!(source, ManifestSource::Document(text.to_string()));
        }

        let source = ManifestSource::resolve("2024-manifest.json", Path::new("/app")).unwrap();
        assert_eq!(
            source,
            ManifestSource::File(PathBuf::from("/app/2024-manifest.json"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_file_url() {
        let source =
            ManifestSource::resolve("file:///app/www/manifest.json", Path::new("/other")).unwrap();
        assert_eq!(
            source,
            ManifestSource::File(PathBuf::from("/app/www/manifest.json"))
        );
    }

    #[test]
    fn test_resolve_rejects_remote_and_empty() {
        let err = ManifestSource::resolve("https://example.com/manifest.json", Path::new("/app"))
            .unwrap_err();
        assert_eq!(err.code(), "invalid_reference");

        let err = ManifestSource::resolve("   ", Path::new("/app")).unwrap_err();
        assert_eq!(err.code(), "invalid_reference");
    }

    #[test]
    fn test_read_missing_file() {
        let source = ManifestSource::File(std::env::temp_dir().join("hwa-does-not-exist.json"));
        let err = source.read().unwrap_err();
        assert!(matches!(err, ManifestError::NotFound(_)));
    }
}
