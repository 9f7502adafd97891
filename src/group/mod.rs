//! Cache Namespaces
//!
//! A [`Group`](group::Group) is one named cache: its own local store, its own
//! loader for authoritative data, and (optionally) a peer picker that routes
//! misses to the rest of the fleet. Several groups coexist in one process and
//! are found by name through the process-wide registry.
//!
//! ## Read Path
//! `Group::get` answers from the local store, otherwise coalesces concurrent
//! misses per key and resolves the winner through the peer owning the key or,
//! failing that, the loader. Values are immutable once observed, so bytes
//! fetched from a peer are as cacheable as bytes the loader produced.

pub mod group;
pub mod types;

pub use group::{Group, get_group, group_names};
