//! Time-boxed response cache for TMDB requests.
//!
//! This module provides a provider-agnostic caching mechanism that:
//! - Stores opaque JSON payloads keyed by request identity
//! - Treats entries older than the TTL (24 hours) as absent
//! - Evicts lazily on lookup - no background sweep, no capacity policy
//! - Never caches failures (no negative caching)

mod layer;
mod storage;
mod traits;

pub use layer::CacheLayer;
#[cfg(test)]
pub use storage::MemoryStorage;
pub use storage::{CacheStorage, NoopStorage, SqliteStorage};
// CacheResult is named by CacheLayer::fetch's signature; CacheSource is how
// callers and tests inspect where a result came from.
pub use traits::{CacheResult, CacheSource};
