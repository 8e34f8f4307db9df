//! Cache layer that orchestrates TTL-bounded caching with network fetching.

use chrono::{Duration, Utc};
use color_eyre::Result;
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

use super::storage::CacheStorage;
use super::traits::CacheResult;

/// Cache layer that manages lookup, expiry, and network fetching.
///
/// Entries are valid for a fixed time-to-live window. Expired entries are
/// evicted lazily when looked up; there is no background sweep and no
/// capacity-based eviction.
#[derive(Clone)]
pub struct CacheLayer {
  storage: Arc<dyn CacheStorage>,
  /// How long an entry stays valid after being stored
  ttl: Duration,
}

impl CacheLayer {
  /// Create a new cache layer with the default 24 hour TTL.
  pub fn new(storage: Arc<dyn CacheStorage>) -> Self {
    Self {
      storage,
      ttl: Duration::hours(24),
    }
  }

  /// Override the TTL. Used by tests to exercise the expiry boundary.
  pub fn with_ttl(mut self, ttl: Duration) -> Self {
    self.ttl = ttl;
    self
  }

  /// Check whether a stored_at timestamp is past the validity window.
  fn is_expired(&self, stored_at: chrono::DateTime<Utc>) -> bool {
    Utc::now() - stored_at >= self.ttl
  }

  /// Fetch a value with cache-first semantics.
  ///
  /// 1. Look up `key` - if the entry is within the TTL, return it without
  ///    invoking the fetcher.
  /// 2. If the entry is expired, remove it and fall through to a fetch.
  /// 3. On a miss, invoke the fetcher. A successful result is stored under
  ///    `key` before being returned. A failed fetch propagates the error and
  ///    stores nothing (no negative caching).
  ///
  /// A stored payload that no longer deserializes is treated as a miss: the
  /// entry is removed and the fetcher runs.
  pub async fn fetch<T, F, Fut>(&self, key: &str, fetcher: F) -> Result<CacheResult<T>>
  where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
  {
    if let Some(cached) = self.storage.load(key)? {
      if self.is_expired(cached.stored_at) {
        debug!(key, "cache entry expired, evicting");
        self.storage.remove(key)?;
      } else {
        match serde_json::from_slice::<T>(&cached.payload) {
          Ok(data) => {
            debug!(key, "cache hit");
            return Ok(CacheResult::from_cache(data, cached.stored_at));
          }
          Err(e) => {
            // Corrupt entry - same as a miss
            warn!(key, error = %e, "unreadable cache entry, evicting");
            self.storage.remove(key)?;
          }
        }
      }
    }

    debug!(key, "cache miss, fetching");
    let data = fetcher().await?;
    let payload = serde_json::to_vec(&data)?;
    self.storage.store(key, &payload, Utc::now())?;
    Ok(CacheResult::from_network(data))
  }
}
