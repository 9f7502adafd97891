//! Concurrent cache façade over the LRU store.

use parking_lot::RwLock;

use super::lru::LruStore;
use super::view::ByteView;

/// Thread-safe, lazily initialized cache of [`ByteView`]s.
///
/// The inner [`LruStore`] is only allocated on the first `add`, so creating a
/// `MemoryCache` per namespace costs nothing until the namespace is written.
///
/// Both `add` and `get` take the write lock: a hit promotes the entry to most
/// recent, which mutates the order list. The read lock covers the counters
/// only.
pub struct MemoryCache {
    max_bytes: usize,
    inner: RwLock<Option<LruStore<ByteView>>>,
}

impl MemoryCache {
    pub fn new(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            inner: RwLock::new(None),
        }
    }

    pub fn add(&self, key: &str, value: ByteView) {
        let mut guard = self.inner.write();
        let store = guard.get_or_insert_with(|| LruStore::new(self.max_bytes, None));
        store.add(key, value);
    }

    pub fn get(&self, key: &str) -> Option<ByteView> {
        let mut guard = self.inner.write();
        guard.as_mut().and_then(|store| store.get(key).cloned())
    }

    /// Number of entries currently cached.
    pub fn len(&self) -> usize {
        self.inner.read().as_ref().map_or(0, LruStore::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes currently charged against the budget.
    pub fn used_bytes(&self) -> usize {
        self.inner.read().as_ref().map_or(0, LruStore::used_bytes)
    }
}
