use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use super::error::Result;
use super::model::Catalog;
use super::pipeline::load_catalog;

/// Memoized load-and-clean result, shared read-only between readers.
///
/// The catalog is produced on the first [`get`](CatalogCache::get) and reused
/// until [`invalidate`](CatalogCache::invalidate) or a source change.
#[derive(Debug)]
pub struct CatalogCache {
    source: RwLock<PathBuf>,
    slot: RwLock<Option<Arc<Catalog>>>,
}

impl CatalogCache {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        CatalogCache {
            source: RwLock::new(source.into()),
            slot: RwLock::new(None),
        }
    }

    /// Path the next load will read from.
    pub fn source(&self) -> PathBuf {
        self.source
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Return the cached catalog, loading it on first access.
    pub fn get(&self) -> Result<Arc<Catalog>> {
        if let Some(catalog) = self
            .slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            log::debug!("catalog cache hit");
            return Ok(Arc::clone(catalog));
        }

        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        // Another writer may have filled the slot while we waited.
        if let Some(catalog) = slot.as_ref() {
            return Ok(Arc::clone(catalog));
        }
        let catalog = Arc::new(load_catalog(&self.source())?);
        *slot = Some(Arc::clone(&catalog));
        Ok(catalog)
    }

    /// Drop the cached catalog; the next `get` reloads from the source.
    pub fn invalidate(&self) {
        log::debug!("catalog cache invalidated");
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Load `path` and make it the cached catalog. On failure the previous
    /// source and catalog stay in place.
    pub fn replace_source(&self, path: &Path) -> Result<Arc<Catalog>> {
        let catalog = Arc::new(load_catalog(path)?);
        *self.source.write().unwrap_or_else(PoisonError::into_inner) = path.to_path_buf();
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&catalog));
        Ok(catalog)
    }
}
