//! SQLite implementation of the persistence layer.

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use super::models::StoredSlot;
use crate::domain::Wager;
use crate::error::TrackerError;

/// SQLite-backed key/value slot store using `sqlx::SqlitePool`.
#[derive(Debug, Clone)]
pub struct SqliteSlotStore {
    pool: SqlitePool,
}

impl SqliteSlotStore {
    /// Wraps an existing connection pool. Call
    /// [`SqliteSlotStore::ensure_schema`] before first use.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if missing) the database at `url` and prepares the
    /// schema.
    ///
    /// In-memory URLs get a single connection that is never recycled,
    /// since each SQLite memory connection is its own database.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::PersistenceError`] if the URL is invalid or
    /// the database cannot be opened.
    pub async fn connect(
        url: &str,
        max_connections: u32,
        connect_timeout: Duration,
    ) -> Result<Self, TrackerError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool_options = SqlitePoolOptions::new().acquire_timeout(connect_timeout);
        let pool_options = if url.contains(":memory:") {
            pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options.max_connections(max_connections.max(1))
        };

        let store = Self::new(pool_options.connect_with(options).await?);
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Creates the `kv_slots` table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::PersistenceError`] on database failure.
    pub async fn ensure_schema(&self) -> Result<(), TrackerError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS kv_slots (\
                slot TEXT PRIMARY KEY NOT NULL, \
                value TEXT NOT NULL, \
                updated_at TEXT NOT NULL)",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Writes `value` under `slot`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::PersistenceError`] on database failure.
    pub async fn save_slot(&self, slot: &str, value: &str) -> Result<(), TrackerError> {
        sqlx::query(
            "INSERT INTO kv_slots (slot, value, updated_at) VALUES (?1, ?2, ?3) \
             ON CONFLICT(slot) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(slot)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Reads the row stored under `slot`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::PersistenceError`] on database failure.
    pub async fn load_slot(&self, slot: &str) -> Result<Option<StoredSlot>, TrackerError> {
        let row = sqlx::query_as::<_, (String, String, DateTime<Utc>)>(
            "SELECT slot, value, updated_at FROM kv_slots WHERE slot = ?1",
        )
        .bind(slot)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(slot, value, updated_at)| StoredSlot {
            slot,
            value,
            updated_at,
        }))
    }

    /// Deletes the row stored under `slot`. Returns `true` if a row existed.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::PersistenceError`] on database failure.
    pub async fn delete_slot(&self, slot: &str) -> Result<bool, TrackerError> {
        let result = sqlx::query("DELETE FROM kv_slots WHERE slot = ?1")
            .bind(slot)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Serializes the wager list into `slot`.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::PersistenceError`] on serialization or
    /// database failure.
    pub async fn save_wagers(&self, slot: &str, wagers: &[Wager]) -> Result<(), TrackerError> {
        let json = serde_json::to_string(wagers)
            .map_err(|e| TrackerError::PersistenceError(e.to_string()))?;
        self.save_slot(slot, &json).await
    }

    /// Loads the wager list from `slot`.
    ///
    /// A missing slot or a payload that fails to parse yields an empty
    /// list; the parse failure is logged and the bad payload left in place
    /// until the next save overwrites it.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError::PersistenceError`] only when the database
    /// itself cannot be read.
    pub async fn load_wagers(&self, slot: &str) -> Result<Vec<Wager>, TrackerError> {
        let Some(stored) = self.load_slot(slot).await? else {
            tracing::info!(slot, "no stored wagers, starting empty");
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Wager>>(&stored.value) {
            Ok(wagers) => {
                tracing::info!(slot, count = wagers.len(), "loaded stored wagers");
                Ok(wagers)
            }
            Err(e) => {
                tracing::warn!(slot, error = %e, "stored wagers unreadable, starting empty");
                Ok(Vec::new())
            }
        }
    }
}
