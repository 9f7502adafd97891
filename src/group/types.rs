//! Contracts crossing the cache boundary.

use anyhow::Result;
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Materializes a value's authoritative bytes on a cache miss.
///
/// Any closure of the right shape adapts into this via [`loader_fn`]; the
/// returned bytes are copied into the cache's own buffer, so the loader may
/// reuse its allocation afterwards.
pub type LoaderFn =
    Arc<dyn Fn(String) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send>> + Send + Sync>;

/// Fetches a key's bytes from a remote peer.
#[async_trait]
pub trait PeerFetch: Send + Sync {
    async fn fetch(&self, group: &str, key: &str) -> Result<Vec<u8>>;
}

/// Chooses the remote peer owning a key.
///
/// `None` means the key is served locally: the ring is empty, or the ring
/// selected this node itself.
pub trait PeerPicker: Send + Sync {
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerFetch>>;
}

/// Boxes a plain async closure into a [`LoaderFn`].
pub fn loader_fn<F, Fut>(load: F) -> LoaderFn
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<u8>>> + Send + 'static,
{
    Arc::new(move |key: String| {
        Box::pin(load(key)) as Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send>>
    })
}
