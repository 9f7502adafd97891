//! Distributed Read-Through Cache Library
//!
//! This library crate defines the core subsystems of a peer-sharded,
//! in-memory key→bytes cache. It serves as the foundation for the node
//! executable (`main.rs`).
//!
//! ## Architecture Modules
//! The cache is composed of five loosely coupled subsystems:
//!
//! - **`store`**: The node-local storage layer. An immutable byte value type
//!   (`ByteView`), a byte-budget LRU store, and a concurrent lazily
//!   initialized wrapper around it.
//! - **`flight`**: The request coalescer. Guarantees at most one in-flight
//!   load per key; concurrent callers share the winner's result.
//! - **`routing`**: The placement layer. A consistent-hash ring over virtual
//!   nodes, and the router that maps keys to peer client handles while
//!   excluding the local node.
//! - **`group`**: The namespace layer. Composes store, flight, and routing
//!   into the read path (local hit → peer fetch → loader fallback) and keeps
//!   the process-wide registry of named groups.
//! - **`transport`**: The HTTP layer. Peer-to-peer routes with a compact
//!   binary envelope, the client-facing API, and the outbound peer client.

pub mod flight;
pub mod group;
pub mod routing;
pub mod store;
pub mod transport;
