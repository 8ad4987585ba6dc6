//! Time-bounded price cache persisted in SQLite.
//!
//! One row per release: key `discogs:price:{id}`, value JSON `{"ts": <epoch ms>, "v": <estimate>}`.
//! - Entries at or past the TTL read as absent; nothing is ever deleted.
//! - Caching is best-effort: storage failures are logged and never returned.

use crate::error::Result;
use crate::models::PriceEstimate;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Time-to-live of a cached estimate (24 hours)
pub const PRICE_TTL_MS: i64 = 24 * 60 * 60 * 1000;

const KEY_PREFIX: &str = "discogs:price:";

#[derive(Debug, Serialize, Deserialize)]
struct CacheRecord {
    ts: i64,
    v: Option<PriceEstimate>,
}

/// Price cache shared by every search session
pub struct PriceCache {
    /// `None` when caching is disabled or the store could not be opened
    conn: Option<Mutex<Connection>>,
}

impl PriceCache {
    /// Returns the default cache database path: <cache dir>/vinyl_catalog/price_cache.db
    pub fn default_path() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vinyl_catalog")
            .join("price_cache.db")
    }

    /// Opens (or creates) the cache database at `path`
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        init_schema(&conn)?;
        log::info!("Price cache: {}", path.display());
        Ok(Self::from_connection(conn))
    }

    /// Opens the cache at `path`, or runs without a cache if that fails
    pub fn open_or_disabled(path: &Path) -> Self {
        match Self::open(path) {
            Ok(cache) => cache,
            Err(e) => {
                log::warn!("Failed to open price cache, continuing without it: {}", e);
                Self::disabled()
            }
        }
    }

    /// Non-persistent cache, for tests and one-off runs
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self::from_connection(conn))
    }

    /// Cache that stores nothing and never hits
    pub fn disabled() -> Self {
        Self { conn: None }
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Some(Mutex::new(conn)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.conn.is_some()
    }

    /// Namespaced storage key for a release
    pub fn key(id: u64) -> String {
        format!("{}{}", KEY_PREFIX, id)
    }

    /// Fresh cached estimate for `id`, if any
    pub fn read(&self, id: u64) -> Option<PriceEstimate> {
        self.read_at(id, now_millis())
    }

    /// Stores `estimate` for `id`, stamped with the current time
    pub fn write(&self, id: u64, estimate: &PriceEstimate) {
        self.write_at(id, estimate, now_millis());
    }

    /// Read against an explicit clock (epoch milliseconds)
    pub fn read_at(&self, id: u64, now_ms: i64) -> Option<PriceEstimate> {
        let raw = match self.load_raw(&Self::key(id)) {
            Ok(raw) => raw?,
            Err(e) => {
                log::warn!("Price cache read failed for {}: {}", id, e);
                return None;
            }
        };

        let record: CacheRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                log::debug!("Ignoring malformed price cache entry for {}: {}", id, e);
                return None;
            }
        };

        match now_ms.checked_sub(record.ts) {
            Some(age) if age < PRICE_TTL_MS => {}
            Some(_) => {
                log::debug!("Price cache entry for {} expired", id);
                return None;
            }
            None => {
                log::debug!("Ignoring price cache entry for {} with bad timestamp", id);
                return None;
            }
        }
        record.v
    }

    /// Write against an explicit clock (epoch milliseconds)
    pub fn write_at(&self, id: u64, estimate: &PriceEstimate, now_ms: i64) {
        let record = CacheRecord {
            ts: now_ms,
            v: Some(estimate.clone()),
        };
        let result = match serde_json::to_string(&record) {
            Ok(value) => self.store_raw(&Self::key(id), &value),
            Err(e) => Err(e.into()),
        };
        if let Err(e) = result {
            log::warn!("Failed to cache price for {}: {}", id, e);
        }
    }

    /// Number of stored entries, fresh or not
    pub fn len(&self) -> usize {
        let Some(conn) = &self.conn else {
            return 0;
        };
        let Ok(conn) = conn.lock() else {
            return 0;
        };
        conn.query_row("SELECT COUNT(*) FROM price_cache", [], |r| r.get::<_, i64>(0))
            .map(|n| n as usize)
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn load_raw(&self, key: &str) -> Result<Option<String>> {
        let Some(conn) = &self.conn else {
            return Ok(None);
        };
        let conn = conn.lock().map_err(|_| poisoned())?;
        Ok(conn
            .query_row(
                "SELECT value FROM price_cache WHERE key = ?1",
                params![key],
                |r| r.get(0),
            )
            .optional()?)
    }

    fn store_raw(&self, key: &str, value: &str) -> Result<()> {
        let Some(conn) = &self.conn else {
            return Ok(());
        };
        let conn = conn.lock().map_err(|_| poisoned())?;
        conn.execute(
            "INSERT INTO price_cache (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Creates the `price_cache` table if it does not already exist.
fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS price_cache (
            key   TEXT NOT NULL PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )
}

fn poisoned() -> crate::error::CatalogError {
    crate::error::CatalogError::Config("price cache lock poisoned".to_string())
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
