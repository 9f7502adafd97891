//! Key Placement
//!
//! Decides which node of the fleet owns a key, and hands out a client handle
//! for it.
//!
//! ## Mechanism
//! - **Consistent hashing**: every peer is projected onto a 32-bit circular
//!   key space as a set of virtual points; a key belongs to the first point
//!   at or after its own hash, wrapping around the circle. Membership changes
//!   move only a small fraction of keys.
//! - **Self-exclusion**: the router never returns a handle to the local node;
//!   if the ring selects it, the caller serves the key locally instead of
//!   looping over the network.

pub mod ring;
pub mod router;
