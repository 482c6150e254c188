//! Manifest store
//!
//! Holds the latest manifest in a slot that is swapped as a whole.
//! Readers clone the `Arc` and never observe a partially built document.

use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::manifest::Manifest;
use crate::source::ManifestSource;
use crate::Result;

type LoadedListener = Arc<dyn Fn(&Arc<Manifest>) + Send + Sync>;

pub struct ManifestStore {
    /// Latest successfully loaded manifest
    current: Arc<RwLock<Option<Arc<Manifest>>>>,
    /// Receivers of the "manifest loaded" signal
    listeners: Arc<RwLock<Vec<LoadedListener>>>,
    /// Base directory for relative references
    assets_dir: PathBuf,
}

impl ManifestStore {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            listeners: Arc::new(RwLock::new(Vec::new())),
            assets_dir: assets_dir.into(),
        }
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    /// Resolve a bridge reference against the assets directory and load it
    pub fn load_reference(&self, reference: &str) -> Result<Arc<Manifest>> {
        let source = ManifestSource::resolve(reference, &self.assets_dir)?;
        self.load(&source)
    }

    /// Load and publish a manifest.
    ///
    /// On failure the previously published manifest stays in place.
    pub fn load(&self, source: &ManifestSource) -> Result<Arc<Manifest>> {
        let parsed = source.read().and_then(|text| Manifest::parse(&text));

        let manifest = match parsed {
            Ok(manifest) => Arc::new(manifest),
            Err(e) => {
                tracing::warn!(
                    source = %source.describe(),
                    error = %e,
                    "Manifest load failed"
                );
                return Err(e);
            }
        };

        *self.current.write() = Some(Arc::clone(&manifest));

        tracing::info!(
            source = %source.describe(),
            name = manifest.name().unwrap_or_default(),
            "Manifest loaded"
        );

        // Snapshot so listeners may register or read the store themselves
        let listeners: Vec<LoadedListener> = self.listeners.read().iter().cloned().collect();
        for listener in listeners {
            listener(&manifest);
        }

        Ok(manifest)
    }

    pub fn current(&self) -> Option<Arc<Manifest>> {
        self.current.read().clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.read().is_some()
    }

    /// Register a receiver for the "manifest loaded" signal
    pub fn on_loaded<F>(&self, listener: F)
    where
        F: Fn(&Arc<Manifest>) + Send + Sync + 'static,
    {
        self.listeners.write().push(Arc::new(listener));
    }
}

impl Clone for ManifestStore {
    fn clone(&self) -> Self {
        Self {
            current: Arc::clone(&self.current),
            listeners: Arc::clone(&self.listeners),
            assets_dir: self.assets_dir.clone(),
        }
    }
}
