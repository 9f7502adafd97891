//! Peer membership and client handle management.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use crate::group::types::{PeerFetch, PeerPicker};
use crate::transport::client::HttpClient;

use super::ring::HashRing;

/// Routes keys to the peers that own them.
///
/// Holds the consistent-hash ring and one HTTP client handle per peer, both
/// guarded by a single mutex so a membership swap is observed atomically.
/// The peer set is replaced wholesale by [`set_peers`](Self::set_peers);
/// there is no incremental join or leave.
pub struct PeerRouter {
    /// The local node's own identity, excluded from routing decisions.
    host: String,
    /// URL prefix under which every peer mounts its cache routes.
    base_path: String,
    replicas: usize,
    state: Mutex<RouterState>,
}

struct RouterState {
    ring: HashRing,
    clients: HashMap<String, Arc<HttpClient>>,
}

impl PeerRouter {
    pub fn new(host: impl Into<String>, base_path: &str, replicas: usize) -> Self {
        let host = host.into().trim_end_matches('/').to_string();
        Self {
            host,
            base_path: normalize_base_path(base_path),
            replicas,
            state: Mutex::new(RouterState {
                ring: HashRing::new(replicas, None),
                clients: HashMap::new(),
            }),
        }
    }

    /// Replaces the peer membership wholesale.
    ///
    /// Rebuilds the ring and the handle map from scratch; peers absent from
    /// `peers` are forgotten together with their handles. Idempotent.
    pub fn set_peers<S: AsRef<str>>(&self, peers: &[S]) {
        let peers: Vec<String> = peers
            .iter()
            .map(|peer| peer.as_ref().trim_end_matches('/').to_string())
            .collect();

        let mut ring = HashRing::new(self.replicas, None);
        ring.add_nodes(&peers);

        let clients = peers
            .iter()
            .map(|peer| {
                let base_url = format!("{}{}", peer, self.base_path);
                (peer.clone(), Arc::new(HttpClient::new(base_url)))
            })
            .collect();

        let mut state = self.state.lock();
        state.ring = ring;
        state.clients = clients;
        tracing::info!("Peer set replaced: {} peer(s)", peers.len());
    }

    /// Concrete counterpart of [`PeerPicker::pick_peer`]: the handle for the
    /// peer owning `key`, or `None` when the ring is empty or the key belongs
    /// to the local node.
    pub fn pick_client(&self, key: &str) -> Option<Arc<HttpClient>> {
        let state = self.state.lock();
        let owner = state.ring.get(key)?;
        if owner == self.host {
            return None;
        }
        tracing::debug!("Key {} routed to peer {}", key, owner);
        state.clients.get(owner).cloned()
    }

    pub fn peer_count(&self) -> usize {
        self.state.lock().clients.len()
    }
}

impl PeerPicker for PeerRouter {
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerFetch>> {
        self.pick_client(key).map(|client| client as Arc<dyn PeerFetch>)
    }
}

/// Forces a single leading and trailing slash, the shape route nesting and
/// URL concatenation both expect.
fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}
