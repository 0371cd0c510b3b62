//! Keyed async cache for API-backed entities.
//!
//! Reads are coalesced so a key is fetched at most once at a time, writes
//! invalidate instead of patching, and optimistic updates carry a snapshot
//! that can be rolled back. Everything is single-threaded; the cache hands
//! fetch futures to a caller-supplied spawner.

mod cache;
mod mutation;

pub use cache::{Cache, CacheError, Spawner};
pub use mutation::Snapshot;
