//! Process-local preview cache.
//!
//! Every save also writes a denormalized snapshot here, keyed by document
//! id, so early drafts and previews survive a gateway outage. The cache is
//! an explicit service created at process start and injected where needed;
//! it is never synchronized across processes, and divergence from the
//! gateway is resolved by read precedence in [`crate::store`], not by
//! reconciliation.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;

use crate::form::FormDocument;
use crate::types::FormId;

/// Maximum number of snapshots retained; overflow evicts the
/// least-recently-touched id.
pub const PREVIEW_CACHE_CAPACITY: usize = 100;

/// LRU snapshot store for form documents.
///
/// A put moves the id to the front of the index; reads do not reorder, so
/// eviction tracks write recency, matching the front-inserted, deduplicated,
/// truncated-to-100 id index this cache replaces.
pub struct PreviewCache {
    inner: Mutex<LruCache<FormId, FormDocument>>,
}

impl Default for PreviewCache {
    fn default() -> Self {
        Self::with_capacity(PREVIEW_CACHE_CAPACITY)
    }
}

impl PreviewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        PreviewCache {
            inner: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity).expect("cache capacity must be non-zero"),
            )),
        }
    }

    /// Store a snapshot. A document without an id cannot be keyed and is
    /// silently skipped.
    pub fn put(&self, doc: &FormDocument) {
        let Some(id) = doc.id.clone() else {
            return;
        };
        let mut inner = self.inner.lock().expect("preview cache poisoned");
        inner.put(id, doc.clone());
    }

    /// Fetch a snapshot without touching the eviction order.
    pub fn get(&self, id: &str) -> Option<FormDocument> {
        let inner = self.inner.lock().expect("preview cache poisoned");
        inner.peek(id).cloned()
    }

    /// Drop a snapshot and its index entry.
    pub fn remove(&self, id: &str) {
        let mut inner = self.inner.lock().expect("preview cache poisoned");
        inner.pop(id);
    }

    /// Known ids, newest-touched first.
    pub fn ids(&self) -> Vec<FormId> {
        let inner = self.inner.lock().expect("preview cache poisoned");
        inner.iter().map(|(id, _)| id.clone()).collect()
    }

    /// Snapshots in index order (newest-touched first).
    pub fn snapshots(&self) -> Vec<FormDocument> {
        let inner = self.inner.lock().expect("preview cache poisoned");
        inner.iter().map(|(_, doc)| doc.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("preview cache poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.inner.lock().expect("preview cache poisoned").clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
