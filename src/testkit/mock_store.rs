//! Fault-injecting worksheet for exercising failure paths.
//!
//! [`FaultyStore`] wraps a [`MemoryStore`] and can be told to fail reads or
//! writes on demand. It also counts how often each operation reached the
//! backend, which is how tests observe cache hits and skipped writes.
//!
//! # Example
//!
//! ```rust
//! use hoardrisk::store::TabularStore;
//! use hoardrisk::testkit::FaultyStore;
//!
//! let store = FaultyStore::new("Avaliacoes");
//! store.fail_writes(true);
//! assert!(store.replace_all(&Default::default()).is_err());
//! assert_eq!(store.write_count(), 0);
//! ```

use crate::core::StoreError;
use crate::store::{Dataset, MemoryStore, TabularStore};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct FaultyStore {
    inner: MemoryStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl FaultyStore {
    pub fn new(worksheet: impl Into<String>) -> Self {
        Self::with_dataset(worksheet, Dataset::default())
    }

    pub fn with_dataset(worksheet: impl Into<String>, dataset: Dataset) -> Self {
        Self {
            inner: MemoryStore::with_dataset(worksheet, dataset),
            ..Default::default()
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Successful reads that reached the backend.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Successful writes that reached the backend.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Dataset {
        self.inner.snapshot()
    }
}

impl TabularStore for FaultyStore {
    fn worksheet(&self) -> &str {
        self.inner.worksheet()
    }

    fn read_all(&self) -> Result<Dataset, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection reset".to_string()));
        }
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read_all()
    }

    fn replace_all(&self, dataset: &Dataset) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("write quota exceeded".to_string()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.replace_all(dataset)
    }
}
