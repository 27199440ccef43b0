//! Time-boxed memoization of the last worksheet read.
//!
//! `CachedStore` answers `read_all` from memory until the entry is older
//! than the configured TTL. Writes always go straight to the inner store
//! and drop the cached entry, so the next read observes the new rows.

use super::{Dataset, TabularStore};
use crate::core::StoreError;
use parking_lot::Mutex;
use std::time::{Duration, Instant};

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

#[derive(Debug)]
struct CacheEntry {
    dataset: Dataset,
    loaded_at: Instant,
}

/// Read-through cache with a declared TTL and explicit invalidation.
#[derive(Debug)]
pub struct CachedStore<S> {
    inner: S,
    ttl: Duration,
    entry: Mutex<Option<CacheEntry>>,
}

impl<S: TabularStore> CachedStore<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entry: Mutex::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Bypass the cache and read straight from the backing store.
    ///
    /// The fresh result replaces any cached entry.
    pub fn read_fresh(&self) -> Result<Dataset, StoreError> {
        let dataset = self.inner.read_all()?;
        *self.entry.lock() = Some(CacheEntry {
            dataset: dataset.clone(),
            loaded_at: Instant::now(),
        });
        Ok(dataset)
    }

    /// Drop the cached entry so the next read hits the backing store.
    pub fn invalidate(&self) {
        if self.entry.lock().take().is_some() {
            log::debug!("Invalidated cached worksheet '{}'", self.inner.worksheet());
        }
    }

    pub fn is_cached(&self) -> bool {
        self.cached_at(Instant::now()).is_some()
    }

    fn cached_at(&self, now: Instant) -> Option<Dataset> {
        let guard = self.entry.lock();
        let entry = guard.as_ref()?;
        if now.saturating_duration_since(entry.loaded_at) < self.ttl {
            Some(entry.dataset.clone())
        } else {
            None
        }
    }
}

impl<S: TabularStore> TabularStore for CachedStore<S> {
    fn worksheet(&self) -> &str {
        self.inner.worksheet()
    }

    fn read_all(&self) -> Result<Dataset, StoreError> {
        if let Some(dataset) = self.cached_at(Instant::now()) {
            log::debug!("Cache hit for worksheet '{}'", self.worksheet());
            return Ok(dataset);
        }
        log::debug!("Cache miss for worksheet '{}'", self.worksheet());
        self.read_fresh()
    }

    fn replace_all(&self, dataset: &Dataset) -> Result<(), StoreError> {
        self.inner.replace_all(dataset)?;
        self.invalidate();
        Ok(())
    }
}
