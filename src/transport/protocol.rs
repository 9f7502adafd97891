//! Transport Protocol
//!
//! Route prefixes and the data transfer objects exchanged over HTTP. The
//! peer envelope is bincode-encoded and rides under
//! `application/octet-stream`; the stats surface is JSON.

use serde::{Deserialize, Serialize};

/// Prefix under which every node mounts its peer-to-peer cache route.
pub const DEFAULT_BASE_PATH: &str = "/_cache/";
/// Client-facing read endpoint prefix.
pub const ENDPOINT_API: &str = "/api";
/// Per-group counters, for operators.
pub const ENDPOINT_STATS: &str = "/health/stats";

/// Envelope for a successful peer read.
#[derive(Debug, Serialize, Deserialize)]
pub struct PeerResponse {
    /// The value's bytes, opaque to the transport.
    pub value: Vec<u8>,
}

/// Counters for a single group.
#[derive(Debug, Serialize, Deserialize)]
pub struct GroupStats {
    pub group: String,
    pub entries: usize,
    pub used_bytes: usize,
}

/// Response format of the stats endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub groups: Vec<GroupStats>,
}
