// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed [`KeyValueStore`].
//!
//! One connection guarded by a mutex. Every `get`/`set` is a single
//! statement, so each call is atomic with respect to other callers.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use booklane_config::StorageConfig;
use booklane_core::{Adapter, AdapterType, BooklaneError, HealthStatus, KeyValueStore};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, info};

use crate::migrations;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// The `kv_store` table in a SQLite database file.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `config.database_path`
    /// and apply pending migrations.
    pub fn open(config: &StorageConfig) -> Result<Self, BooklaneError> {
        let path = Path::new(&config.database_path);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(BooklaneError::storage)?;
            }
        }

        let conn = Connection::open(path).map_err(BooklaneError::storage)?;
        let store = Self::from_connection(conn, config.wal_mode)?;
        info!(path = %path.display(), wal = config.wal_mode, "sqlite store ready");
        Ok(store)
    }

    /// A private in-memory database, mainly for tests.
    pub fn open_in_memory() -> Result<Self, BooklaneError> {
        let conn = Connection::open_in_memory().map_err(BooklaneError::storage)?;
        Self::from_connection(conn, false)
    }

    fn from_connection(mut conn: Connection, wal_mode: bool) -> Result<Self, BooklaneError> {
        conn.busy_timeout(BUSY_TIMEOUT).map_err(BooklaneError::storage)?;
        if wal_mode {
            let mode: String = conn
                .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
                .map_err(BooklaneError::storage)?;
            debug!(journal_mode = %mode, "journal mode set");
        }
        migrations::run_migrations(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Adapter for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    fn health_check(&self) -> Result<HealthStatus, BooklaneError> {
        match self.conn().execute_batch("SELECT 1;") {
            Ok(()) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, BooklaneError> {
        self.conn()
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(BooklaneError::storage)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BooklaneError> {
        let updated_at = chrono::Utc::now().to_rfc3339();
        self.conn()
            .execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                                updated_at = excluded.updated_at",
                params![key, value, updated_at],
            )
            .map_err(BooklaneError::storage)?;
        Ok(())
    }
}
