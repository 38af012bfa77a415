//! One-time initialization guard around the artifact bundle.
//!
//! The bundle is loaded at most once per `ArtifactCache` and shared
//! read-only afterwards. Reads after initialization take no lock; the
//! mutex only serializes the first load.

use crate::error::PredictorResult;
use crate::models::loader::{ArtifactBundle, ArtifactLoader};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::debug;

/// Lazily-initialized holder of the process's `ArtifactBundle`.
#[derive(Debug, Default)]
pub struct ArtifactCache {
    bundle: OnceLock<Arc<ArtifactBundle>>,
    init: Mutex<()>,
}

impl ArtifactCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached bundle, loading it on first use.
    ///
    /// A failed load leaves the cache empty so the caller can report the
    /// startup error; nothing partial is ever stored.
    pub fn get_or_load(
        &self,
        loader: &ArtifactLoader,
        candidates: &[PathBuf],
    ) -> PredictorResult<Arc<ArtifactBundle>> {
        if let Some(bundle) = self.bundle.get() {
            return Ok(Arc::clone(bundle));
        }

        // A poisoned lock only means another loader panicked; the cell is
        // still either empty or fully set.
        let _guard = self.init.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(bundle) = self.bundle.get() {
            debug!("Artifact bundle initialized by another caller");
            return Ok(Arc::clone(bundle));
        }

        let bundle = Arc::new(loader.load(candidates)?);
        let _ = self.bundle.set(Arc::clone(&bundle));
        Ok(bundle)
    }

    /// The bundle, if it has been loaded.
    pub fn get(&self) -> Option<Arc<ArtifactBundle>> {
        self.bundle.get().cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.bundle.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_load_leaves_cache_empty() {
        let cache = ArtifactCache::new();
        let loader = ArtifactLoader::new();

        let missing = vec![PathBuf::from("/nonexistent/loan-predictor/Model")];
        assert!(cache.get_or_load(&loader, &missing).is_err());
        assert!(!cache.is_loaded());
        assert!(cache.get().is_none());
    }
}
