#[cfg(test)]
mod tests {
    use crate::store::lru::LruStore;
    use crate::store::memory::MemoryCache;
    use crate::store::view::{ByteSize, ByteView};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn view(s: &str) -> ByteView {
        ByteView::copy_from(s.as_bytes())
    }

    // ============================================================
    // BYTE VIEW TESTS
    // ============================================================

    #[test]
    fn test_view_copies_source_buffer() {
        let mut source = b"hello".to_vec();
        let v = ByteView::copy_from(&source);

        // Mutating the source afterwards must not show through the view.
        source[0] = b'X';

        assert_eq!(v.to_vec(), b"hello");
        assert_eq!(v.len(), 5);
    }

    #[test]
    fn test_view_to_vec_is_detached() {
        let v = view("abc");
        let mut out = v.to_vec();
        out[0] = b'z';

        assert_eq!(v.to_vec(), b"abc");
    }

    #[test]
    fn test_view_equality_by_content() {
        assert_eq!(view("same"), ByteView::from(b"same".to_vec()));
        assert_ne!(view("same"), view("other"));
    }

    #[test]
    fn test_view_display() {
        assert_eq!(view("630").to_string(), "630");
    }

    // ============================================================
    // LRU STORE TESTS
    // ============================================================

    #[test]
    fn test_lru_add_get() {
        let mut lru: LruStore<ByteView> = LruStore::new(0, None);
        lru.add("key1", view("value1"));

        assert_eq!(lru.get("key1"), Some(&view("value1")));
        assert_eq!(lru.get("missing"), None);
        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_lru_byte_accounting() {
        let mut lru: LruStore<ByteView> = LruStore::new(0, None);
        lru.add("k1", view("1234"));
        lru.add("k2", view("12"));
        assert_eq!(lru.used_bytes(), 2 + 4 + 2 + 2);

        // Replacing a value adjusts by the size delta.
        lru.add("k1", view("1"));
        assert_eq!(lru.used_bytes(), 2 + 1 + 2 + 2);
    }

    #[test]
    fn test_lru_eviction_on_budget() {
        // Three entries of 16 bytes each against a 32 byte budget: the third
        // add must push out the first key.
        let evicted: Arc<parking_lot::Mutex<Vec<String>>> = Arc::default();
        let evicted_hook = evicted.clone();
        let mut lru: LruStore<ByteView> = LruStore::new(
            32,
            Some(Box::new(move |key, _value| {
                evicted_hook.lock().push(key);
            })),
        );

        lru.add("k1", view("value12345678["));
        lru.add("k2", view("value12345678["));
        assert_eq!(lru.used_bytes(), 32);

        lru.add("k3", view("value12345678["));

        assert_eq!(lru.get("k1"), None);
        assert!(lru.get("k2").is_some());
        assert!(lru.get("k3").is_some());
        assert_eq!(evicted.lock().as_slice(), ["k1".to_string()]);
        assert!(lru.used_bytes() <= 32);
    }

    #[test]
    fn test_lru_eviction_cascades() {
        let mut lru: LruStore<ByteView> = LruStore::new(20, None);
        lru.add("a", view("1234"));
        lru.add("b", view("1234"));
        lru.add("c", view("1234"));
        assert_eq!(lru.len(), 3);

        // 14 + key makes 15; both cold entries must go to fit it.
        lru.add("d", view("12345678901234"));

        assert_eq!(lru.len(), 2);
        assert_eq!(lru.get("a"), None);
        assert_eq!(lru.get("b"), None);
        assert!(lru.get("c").is_some());
        assert!(lru.get("d").is_some());
    }

    #[test]
    fn test_lru_oversized_entry_is_admitted() {
        let mut lru: LruStore<ByteView> = LruStore::new(8, None);
        lru.add("small", view("x"));
        lru.add("big", view("way-over-the-whole-budget"));

        // The oversized entry stays as the sole occupant.
        assert_eq!(lru.len(), 1);
        assert!(lru.get("big").is_some());
        assert!(lru.used_bytes() > 8);
    }

    #[test]
    fn test_lru_get_promotes_recency() {
        let mut lru: LruStore<ByteView> = LruStore::new(0, None);
        lru.add("a", view("1"));
        lru.add("b", view("2"));
        assert_eq!(lru.most_recent(), Some("b"));

        lru.get("a");
        assert_eq!(lru.most_recent(), Some("a"));

        // The un-touched entry is now the eviction victim.
        lru.remove_oldest();
        assert_eq!(lru.get("b"), None);
        assert!(lru.get("a").is_some());
    }

    #[test]
    fn test_lru_add_promotes_recency() {
        let mut lru: LruStore<ByteView> = LruStore::new(0, None);
        lru.add("a", view("1"));
        lru.add("b", view("2"));
        lru.add("a", view("3"));

        assert_eq!(lru.most_recent(), Some("a"));
        lru.remove_oldest();
        assert_eq!(lru.get("b"), None);
        assert_eq!(lru.get("a"), Some(&view("3")));
    }

    #[test]
    fn test_lru_zero_budget_never_evicts() {
        let mut lru: LruStore<ByteView> = LruStore::new(0, None);
        for i in 0..1000 {
            lru.add(&format!("key-{i}"), view("some-value"));
        }
        assert_eq!(lru.len(), 1000);
    }

    #[test]
    fn test_lru_remove_oldest_on_empty() {
        let mut lru: LruStore<ByteView> = LruStore::new(16, None);
        lru.remove_oldest();
        assert_eq!(lru.len(), 0);
        assert_eq!(lru.used_bytes(), 0);
    }

    #[test]
    fn test_lru_bytes_match_entry_sum() {
        // Property: used_bytes always equals the sum over live entries.
        let mut lru: LruStore<ByteView> = LruStore::new(64, None);
        let mut shadow: std::collections::HashMap<String, usize> = Default::default();

        for i in 0..200 {
            let key = format!("k{}", i % 17);
            let value = "v".repeat(i % 9);
            lru.add(&key, view(&value));
            shadow.insert(key.clone(), key.len() + value.len());

            // Mirror evictions: drop shadow keys no longer present.
            shadow.retain(|k, _| {
                // get() would disturb recency; probe via a fresh lookup on a
                // clone-free path instead.
                lru_contains(&mut lru, k)
            });

            let expected: usize = shadow.values().sum();
            assert_eq!(lru.used_bytes(), expected);
            assert!(lru.used_bytes() <= 64 || lru.len() == 1);
        }
    }

    fn lru_contains(lru: &mut LruStore<ByteView>, key: &str) -> bool {
        lru.get(key).is_some()
    }

    // ============================================================
    // MEMORY CACHE TESTS
    // ============================================================

    #[test]
    fn test_memory_cache_usable_without_setup() {
        let cache = MemoryCache::new(1024);

        // Get before any add must miss, not initialize.
        assert_eq!(cache.get("anything"), None);
        assert_eq!(cache.len(), 0);

        cache.add("k", view("v"));
        assert_eq!(cache.get("k"), Some(view("v")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_memory_cache_budget_applies() {
        let cache = MemoryCache::new(32);
        cache.add("k1", view("value12345678["));
        cache.add("k2", view("value12345678["));
        cache.add("k3", view("value12345678["));

        assert_eq!(cache.get("k1"), None);
        assert!(cache.used_bytes() <= 32);
    }

    #[tokio::test]
    async fn test_memory_cache_concurrent_add_get() {
        let cache = Arc::new(MemoryCache::new(0));
        let hits = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for task in 0..8 {
            let cache = cache.clone();
            let hits = hits.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..200 {
                    let key = format!("key-{}-{}", task, i);
                    cache.add(&key, ByteView::from(vec![task as u8; 16]));
                    if cache.get(&key).is_some() {
                        hits.fetch_add(1, Ordering::Relaxed);
                    }
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // No eviction configured, so every write must be readable.
        assert_eq!(hits.load(Ordering::Relaxed), 8 * 200);
        assert_eq!(cache.len(), 8 * 200);
    }

    #[test]
    fn test_byte_size_for_view() {
        assert_eq!(view("1234").byte_size(), 4);
        assert_eq!(ByteView::default().byte_size(), 0);
    }
}
