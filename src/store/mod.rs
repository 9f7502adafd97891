//! Local Cache Storage
//!
//! Implements the node-local half of the cache: an immutable byte value type,
//! a size-constrained LRU store, and a concurrent read-through wrapper.
//!
//! ## Core Concepts
//! - **ByteView**: the unit of storage. Immutable once constructed, cheap to
//!   clone, safe to hand to any number of readers.
//! - **Budget**: eviction is driven by bytes, not entry counts. Every entry
//!   costs `key.len() + value.byte_size()`.
//! - **Laziness**: `MemoryCache` allocates its inner store on first write, so
//!   a zero-cost handle can be created per namespace up front.

pub mod lru;
pub mod memory;
pub mod view;

#[cfg(test)]
mod tests;
