//! The namespace read path and the process-wide registry.

use anyhow::Result;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::future::Future;
use std::sync::{Arc, OnceLock};

use crate::flight::SingleFlight;
use crate::store::memory::MemoryCache;
use crate::store::view::ByteView;

use super::types::{LoaderFn, PeerPicker, loader_fn};

/// Coalesced load result. Errors travel refcounted so every waiter of a
/// single-flight call can observe the same one.
type LoadOutcome = Result<ByteView, Arc<anyhow::Error>>;

/// Process-wide registry of groups by name.
static GROUPS: Lazy<DashMap<String, Arc<Group>>> = Lazy::new(DashMap::new);

/// A named cache namespace.
pub struct Group {
    name: String,
    loader: LoaderFn,
    cache: MemoryCache,
    flight: SingleFlight<LoadOutcome>,
    /// Assigned at most once; a second registration is a programming error.
    peers: OnceLock<Arc<dyn PeerPicker>>,
}

impl Group {
    /// Creates a group and installs it in the registry under `name`.
    ///
    /// `max_bytes` is the local store's eviction budget (0 disables
    /// eviction). Re-using a name replaces the previous group; the earlier
    /// instance keeps serving callers that already hold it.
    pub fn new<F, Fut>(name: &str, max_bytes: usize, loader: F) -> Arc<Self>
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<u8>>> + Send + 'static,
    {
        let group = Arc::new(Self {
            name: name.to_string(),
            loader: loader_fn(loader),
            cache: MemoryCache::new(max_bytes),
            flight: SingleFlight::new(),
            peers: OnceLock::new(),
        });

        if GROUPS.insert(name.to_string(), group.clone()).is_some() {
            tracing::warn!("Group {} re-registered, replacing previous instance", name);
        }

        group
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wires in the peer picker. Panics when called twice on the same group.
    pub fn register_peers(&self, picker: Arc<dyn PeerPicker>) {
        if self.peers.set(picker).is_err() {
            panic!("register_peers called more than once for group {}", self.name);
        }
    }

    /// Reads a value: local store, then the peer owning the key, then the
    /// loader.
    ///
    /// Concurrent misses for the same key are coalesced into one load; every
    /// caller observes the identical bytes (or the identical error). Loader
    /// errors surface verbatim and are never cached.
    pub async fn get(&self, key: &str) -> Result<ByteView> {
        if let Some(view) = self.cache.get(key) {
            tracing::debug!("Cache hit for {}/{}", self.name, key);
            return Ok(view);
        }

        let outcome = self.flight.run(key, || self.load(key.to_string())).await;
        outcome.map_err(|err| anyhow::anyhow!(err))
    }

    /// The miss path, executed once per coalesced load. Peer failures are
    /// logged and downgraded to a loader attempt; only loader errors escape.
    async fn load(&self, key: String) -> LoadOutcome {
        if let Some(picker) = self.peers.get() {
            if let Some(peer) = picker.pick_peer(&key) {
                match peer.fetch(&self.name, &key).await {
                    Ok(bytes) => {
                        let view = ByteView::from(bytes);
                        self.cache.add(&key, view.clone());
                        return Ok(view);
                    }
                    Err(err) => {
                        tracing::warn!(
                            "Peer fetch for {}/{} failed, falling back to loader: {}",
                            self.name,
                            key,
                            err
                        );
                    }
                }
            }
        }

        match (self.loader)(key.clone()).await {
            Ok(bytes) => {
                let view = ByteView::from(bytes);
                self.cache.add(&key, view.clone());
                Ok(view)
            }
            Err(err) => Err(Arc::new(err)),
        }
    }

    /// Entries currently held in the local store.
    pub fn entry_count(&self) -> usize {
        self.cache.len()
    }

    /// Bytes currently held in the local store.
    pub fn used_bytes(&self) -> usize {
        self.cache.used_bytes()
    }
}

/// Looks up a registered group by name.
pub fn get_group(name: &str) -> Option<Arc<Group>> {
    GROUPS.get(name).map(|entry| entry.value().clone())
}

/// Names of all registered groups, for the stats surface.
pub fn group_names() -> Vec<String> {
    GROUPS.iter().map(|entry| entry.key().clone()).collect()
}
