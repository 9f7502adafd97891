//! Consistent-hash ring over virtual nodes.

use std::collections::HashMap;
use std::sync::Arc;

/// Hash placing a byte string on the 32-bit circle.
pub type HashFn = Arc<dyn Fn(&[u8]) -> u32 + Send + Sync>;

/// Number of virtual points each node contributes by default. More points
/// smooth the distribution at the cost of ring memory.
pub const DEFAULT_REPLICAS: usize = 50;

pub struct HashRing {
    replicas: usize,
    hash: HashFn,
    /// Virtual point hashes, sorted ascending after every membership change.
    points: Vec<u32>,
    /// Virtual point hash to owning node. On the (vanishingly rare) collision
    /// of two virtual points, the last writer wins.
    owners: HashMap<u32, String>,
}

impl HashRing {
    /// Creates an empty ring. `hash` defaults to CRC-32 (IEEE) of the key's
    /// UTF-8 bytes when not supplied.
    pub fn new(replicas: usize, hash: Option<HashFn>) -> Self {
        let hash = hash.unwrap_or_else(|| Arc::new(|data: &[u8]| crc32fast::hash(data)));
        Self {
            replicas,
            hash,
            points: Vec::new(),
            owners: HashMap::new(),
        }
    }

    /// Projects each node onto the circle as `replicas` virtual points.
    ///
    /// The virtual key for replica `i` of node `n` is the decimal rendering
    /// of `i` concatenated with `n`, so distinct replicas land on distinct
    /// positions while remaining deterministic across processes.
    pub fn add_nodes<S: AsRef<str>>(&mut self, nodes: &[S]) {
        for node in nodes {
            let node = node.as_ref();
            for i in 0..self.replicas {
                let point = (self.hash)(format!("{i}{node}").as_bytes());
                self.points.push(point);
                self.owners.insert(point, node.to_string());
            }
        }
        self.points.sort_unstable();
    }

    /// Returns the node owning `key`, or `None` on an empty ring.
    ///
    /// Pure for a fixed membership: the same key always lands on the same
    /// node, on every process that built the ring from the same node set.
    pub fn get(&self, key: &str) -> Option<&str> {
        if self.points.is_empty() {
            return None;
        }

        let target = (self.hash)(key.as_bytes());

        // First virtual point at or after the key's hash, wrapping to the
        // start of the circle past the last point.
        let idx = self.points.partition_point(|&point| point < target);
        let point = if idx == self.points.len() {
            self.points[0]
        } else {
            self.points[idx]
        };

        self.owners.get(&point).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
