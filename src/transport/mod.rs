//! HTTP Transport
//!
//! Carries cache reads between nodes and exposes them to clients.
//!
//! Three surfaces share one route tree:
//! - the peer route (`{base}/{group}/{key}`), answering other nodes with a
//!   compact binary envelope,
//! - the client API (`/api/{group}/{key}`), answering operators with the raw
//!   value bytes,
//! - the stats endpoint (`/health/stats`), reporting per-group counters.
//!
//! The [`client`] half is the outbound mirror of the peer route: it is the
//! handle the router hands to a group when a key lives elsewhere.

pub mod client;
pub mod handlers;
pub mod protocol;
