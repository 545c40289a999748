//! Single-slot cache over the catalog source.
//!
//! There is exactly one catalog file, so the cache holds at most one
//! whole-load result and is not keyed. Readers receive a shared
//! [`Arc`] to the immutable record slice; [`CatalogCache::invalidate`] is
//! the only way to force a reload.
//!
//! # Concurrency
//!
//! Safe to share across threads. Cache hits take only the read lock. A miss
//! takes the write lock and loads while holding it, so concurrent misses
//! trigger one load. A poisoned lock is recovered: the slot holds either a
//! complete result or nothing, never a partial one.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use orbital_types::CatalogRecord;

use crate::error::CatalogError;
use crate::loader::{CatalogSource, SourceTimestamp};

/// Load-once cache of the catalog records.
#[derive(Debug)]
pub struct CatalogCache {
    /// The catalog file backing the cache.
    source: CatalogSource,
    /// The cached load result, if any.
    slot: RwLock<Option<Arc<[CatalogRecord]>>>,
}

impl CatalogCache {
    /// Create an empty cache over a source.
    pub const fn new(source: CatalogSource) -> Self {
        Self {
            source,
            slot: RwLock::new(None),
        }
    }

    /// The source this cache loads from.
    pub const fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Last-modified time of the underlying source.
    pub fn timestamp(&self) -> SourceTimestamp {
        self.source.timestamp()
    }

    /// Return the cached records, loading them on first use.
    ///
    /// A failed load leaves the cache empty, so the next call retries.
    ///
    /// # Errors
    ///
    /// Propagates any [`CatalogError`] from [`CatalogSource::load`].
    pub fn get(&self) -> Result<Arc<[CatalogRecord]>, CatalogError> {
        if let Some(cached) = self.read_slot().as_ref() {
            tracing::trace!("Catalog cache hit");
            return Ok(Arc::clone(cached));
        }

        let mut slot = self.write_slot();
        // Another caller may have filled the slot while we waited.
        if let Some(cached) = slot.as_ref() {
            return Ok(Arc::clone(cached));
        }

        let records: Arc<[CatalogRecord]> = self.source.load()?.into();
        *slot = Some(Arc::clone(&records));
        tracing::debug!(records = records.len(), "Catalog cache filled");
        Ok(records)
    }

    /// Drop the cached result; the next [`get`](Self::get) reloads.
    pub fn invalidate(&self) {
        let mut slot = self.write_slot();
        if slot.take().is_some() {
            tracing::debug!("Catalog cache invalidated");
        }
    }

    /// Whether a result is currently cached.
    pub fn is_loaded(&self) -> bool {
        self.read_slot().is_some()
    }

    fn read_slot(&self) -> RwLockReadGuard<'_, Option<Arc<[CatalogRecord]>>> {
        self.slot.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_slot(&self) -> RwLockWriteGuard<'_, Option<Arc<[CatalogRecord]>>> {
        self.slot.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::path::Path;

    use super::*;

    const HEADER: &str = "OBJECT_NAME,MEAN_MOTION,ECCENTRICITY\n";

    fn write_catalog(path: &Path, body: &str) {
        std::fs::write(path, format!("{HEADER}{body}")).unwrap();
    }

    #[test]
    fn get_loads_once_and_shares_the_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("active.csv");
        write_catalog(&path, "A,15.0,0.001\n");

        let cache = CatalogCache::new(CatalogSource::new(&path));
        assert!(!cache.is_loaded());

        let first = cache.get().unwrap();
        let second = cache.get().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.is_loaded());
    }

    #[test]
    fn stale_until_invalidated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("active.csv");
        write_catalog(&path, "A,15.0,0.001\n");
        let cache = CatalogCache::new(CatalogSource::new(&path));
        assert_eq!(cache.get().unwrap().len(), 1);

        write_catalog(&path, "A,15.0,0.001\nB,1.0,0.0\n");
        assert_eq!(cache.get().unwrap().len(), 1);

        cache.invalidate();
        assert!(!cache.is_loaded());
        assert_eq!(cache.get().unwrap().len(), 2);
    }

    #[test]
    fn failed_load_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("active.csv");
        let cache = CatalogCache::new(CatalogSource::new(&path));

        assert!(matches!(
            cache.get(),
            Err(CatalogError::SourceUnavailable { .. })
        ));
        assert!(!cache.is_loaded());

        write_catalog(&path, "A,15.0,0.001\n");
        assert_eq!(cache.get().unwrap().len(), 1);
    }

    #[test]
    fn concurrent_readers_share_one_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("active.csv");
        write_catalog(&path, "A,15.0,0.001\nB,5.0,0.01\n");
        let cache = CatalogCache::new(CatalogSource::new(&path));

        let results: Vec<Arc<[CatalogRecord]>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8).map(|_| scope.spawn(|| cache.get())).collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap().unwrap())
                .collect()
        });

        assert!(results.iter().all(|r| Arc::ptr_eq(r, &results[0])));
    }
}
