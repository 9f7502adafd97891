//! Size-constrained LRU store.
//!
//! The order list and the key index are one structure: a [`LinkedHashMap`]
//! whose back is the most recently used entry and whose front is the next
//! eviction victim. Eviction is driven by the byte budget, never by entry
//! count, and a single insert may cascade several evictions.

use linked_hash_map::LinkedHashMap;

use super::view::ByteSize;

/// Observes an entry as it leaves the store. Called exactly once per evicted
/// or removed entry, before the value is dropped.
pub type EvictionHook<V> = Box<dyn FnMut(String, V) + Send + Sync>;

pub struct LruStore<V: ByteSize> {
    /// Byte budget. Zero disables eviction entirely.
    max_bytes: usize,
    /// Running total of `key.len() + value.byte_size()` over all entries.
    used_bytes: usize,
    entries: LinkedHashMap<String, V>,
    on_evict: Option<EvictionHook<V>>,
}

impl<V: ByteSize> LruStore<V> {
    pub fn new(max_bytes: usize, on_evict: Option<EvictionHook<V>>) -> Self {
        Self {
            max_bytes,
            used_bytes: 0,
            entries: LinkedHashMap::new(),
            on_evict,
        }
    }

    /// Inserts or replaces `key`, making it the most recent entry, then
    /// evicts from the cold end until the budget is respected.
    ///
    /// The entry being added is never its own eviction victim: a value larger
    /// than the whole budget is admitted and left as the sole occupant. The
    /// budget is a ceiling enforced by eviction, not an admission gate.
    pub fn add(&mut self, key: &str, value: V) {
        let added = key.len() + value.byte_size();

        match self.entries.insert(key.to_string(), value) {
            Some(old) => {
                self.used_bytes -= key.len() + old.byte_size();
                self.used_bytes += added;
            }
            None => {
                self.used_bytes += added;
            }
        }

        while self.max_bytes > 0 && self.used_bytes > self.max_bytes && self.entries.len() > 1 {
            self.remove_oldest();
        }
    }

    /// Looks up `key`, promoting it to most recent on a hit.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        self.entries.get_refresh(key).map(|value| &*value)
    }

    /// Drops the least recently used entry, if any, notifying the hook.
    pub fn remove_oldest(&mut self) {
        if let Some((key, value)) = self.entries.pop_front() {
            self.used_bytes -= key.len() + value.byte_size();
            if let Some(hook) = self.on_evict.as_mut() {
                hook(key, value);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn used_bytes(&self) -> usize {
        self.used_bytes
    }

    /// Key of the most recently used entry. Test and introspection aid.
    pub fn most_recent(&self) -> Option<&str> {
        self.entries.back().map(|(key, _)| key.as_str())
    }
}
