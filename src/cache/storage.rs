//! Cache storage trait and its SQLite, in-memory, and no-op backends.

use chrono::{DateTime, Utc};
use color_eyre::{eyre::eyre, Result};
use rusqlite::{params, Connection};
#[cfg(test)]
use std::collections::HashMap;
use std::sync::Mutex;

/// A stored response payload with its storage timestamp.
#[derive(Debug, Clone)]
pub struct CachedPayload {
  /// Serialized JSON payload, exactly as handed to `store`
  pub payload: Vec<u8>,
  /// When the payload was stored
  pub stored_at: DateTime<Utc>,
}

/// Trait for cache storage backends.
///
/// Payloads are opaque blobs keyed by request identity. Entries are only ever
/// overwritten wholesale or removed, never updated in place.
pub trait CacheStorage: Send + Sync {
  /// Store a payload under a key, replacing any previous entry.
  fn store(&self, key: &str, payload: &[u8], stored_at: DateTime<Utc>) -> Result<()>;

  /// Get the payload stored under a key, if any.
  fn load(&self, key: &str) -> Result<Option<CachedPayload>>;

  /// Remove the entry stored under a key. Removing a missing key is not an error.
  fn remove(&self, key: &str) -> Result<()>;
}

/// Storage implementation that doesn't cache anything.
/// Used when caching is disabled - all operations are no-ops.
pub struct NoopStorage;

impl CacheStorage for NoopStorage {
  fn store(&self, _key: &str, _payload: &[u8], _stored_at: DateTime<Utc>) -> Result<()> {
    Ok(()) // Discard
  }

  fn load(&self, _key: &str) -> Result<Option<CachedPayload>> {
    Ok(None) // Always miss
  }

  fn remove(&self, _key: &str) -> Result<()> {
    Ok(())
  }
}

/// HashMap-backed storage for tests; only the SQLite and no-op backends ship.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStorage {
  entries: Mutex<HashMap<String, CachedPayload>>,
}

#[cfg(test)]
impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }
}

#[cfg(test)]
impl CacheStorage for MemoryStorage {
  fn store(&self, key: &str, payload: &[u8], stored_at: DateTime<Utc>) -> Result<()> {
    let mut entries = self
      .entries
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;
    entries.insert(
      key.to_string(),
      CachedPayload {
        payload: payload.to_vec(),
        stored_at,
      },
    );
    Ok(())
  }

  fn load(&self, key: &str) -> Result<Option<CachedPayload>> {
    let entries = self
      .entries
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;
    Ok(entries.get(key).cloned())
  }

  fn remove(&self, key: &str) -> Result<()> {
    let mut entries = self
      .entries
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;
    entries.remove(key);
    Ok(())
  }
}

/// SQLite-based cache storage. The database file outlives the session, so
/// unexpired entries survive restarts.
pub struct SqliteStorage {
  conn: Mutex<Connection>,
}

impl SqliteStorage {
  /// Create a new SQLite storage at the default location.
  pub fn open() -> Result<Self> {
    let path = Self::default_path()?;

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)
        .map_err(|e| eyre!("Failed to create cache directory: {}", e))?;
    }

    let conn = Connection::open(&path)
      .map_err(|e| eyre!("Failed to open cache database at {}: {}", path.display(), e))?;

    let storage = Self {
      conn: Mutex::new(conn),
    };
    storage.run_migrations()?;

    Ok(storage)
  }

  /// Get the default database path.
  fn default_path() -> Result<std::path::PathBuf> {
    let data_dir = dirs::data_dir()
      .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
      .ok_or_else(|| eyre!("Could not determine data directory"))?;

    Ok(data_dir.join("flicks").join("cache.db"))
  }

  /// Run database migrations for the cache table.
  fn run_migrations(&self) -> Result<()> {
    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    conn
      .execute_batch(CACHE_SCHEMA)
      .map_err(|e| eyre!("Failed to run cache migrations: {}", e))?;

    Ok(())
  }
}

/// Schema for the response cache.
const CACHE_SCHEMA: &str = r#"
-- Response cache (stores serialized JSON payloads keyed by request identity)
CREATE TABLE IF NOT EXISTS response_cache (
    cache_key TEXT PRIMARY KEY,
    payload BLOB NOT NULL,
    stored_at TEXT NOT NULL
);
"#;

impl CacheStorage for SqliteStorage {
  fn store(&self, key: &str, payload: &[u8], stored_at: DateTime<Utc>) -> Result<()> {
    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    conn
      .execute(
        "INSERT OR REPLACE INTO response_cache (cache_key, payload, stored_at)
         VALUES (?, ?, ?)",
        params![key, payload, stored_at.to_rfc3339()],
      )
      .map_err(|e| eyre!("Failed to store cache entry: {}", e))?;

    Ok(())
  }

  fn load(&self, key: &str) -> Result<Option<CachedPayload>> {
    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    let mut stmt = conn
      .prepare("SELECT payload, stored_at FROM response_cache WHERE cache_key = ?")
      .map_err(|e| eyre!("Failed to prepare cache query: {}", e))?;

    let row: Option<(Vec<u8>, String)> = stmt
      .query_row(params![key], |row| Ok((row.get(0)?, row.get(1)?)))
      .ok();

    match row {
      Some((payload, stored_at_str)) => {
        let stored_at = parse_datetime(&stored_at_str)?;
        Ok(Some(CachedPayload { payload, stored_at }))
      }
      None => Ok(None),
    }
  }

  fn remove(&self, key: &str) -> Result<()> {
    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    conn
      .execute(
        "DELETE FROM response_cache WHERE cache_key = ?",
        params![key],
      )
      .map_err(|e| eyre!("Failed to remove cache entry: {}", e))?;

    Ok(())
  }
}

/// Parse an RFC 3339 datetime string stored by `store`.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| eyre!("Failed to parse datetime '{}': {}", s, e))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_memory_storage_roundtrip() {
    let storage = MemoryStorage::new();
    let stored_at = Utc::now();

    storage.store("tmdb_test", b"{\"x\":1}", stored_at).unwrap();
    let entry = storage.load("tmdb_test").unwrap().unwrap();
    assert_eq!(entry.payload, b"{\"x\":1}");
    assert_eq!(entry.stored_at, stored_at);
  }

  #[test]
  fn test_memory_storage_overwrite() {
    let storage = MemoryStorage::new();
    storage.store("k", b"old", Utc::now()).unwrap();
    storage.store("k", b"new", Utc::now()).unwrap();

    let entry = storage.load("k").unwrap().unwrap();
    assert_eq!(entry.payload, b"new");
  }

  #[test]
  fn test_memory_storage_remove() {
    let storage = MemoryStorage::new();
    storage.store("k", b"v", Utc::now()).unwrap();
    storage.remove("k").unwrap();
    assert!(storage.load("k").unwrap().is_none());

    // Removing a missing key is fine
    storage.remove("missing").unwrap();
  }

  #[test]
  fn test_noop_storage_always_misses() {
    let storage = NoopStorage;
    storage.store("k", b"v", Utc::now()).unwrap();
    assert!(storage.load("k").unwrap().is_none());
  }
}
