// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistent key-value stores for the Booklane engine.
//!
//! The engine keeps every collection as a JSON blob under a fixed logical
//! key. This crate provides the in-memory and SQLite implementations of
//! [`KeyValueStore`] plus typed snapshot helpers used by the repositories.

pub mod keys;
pub mod memory;
pub mod migrations;
pub mod snapshot;
pub mod sqlite;

use std::sync::Arc;

use booklane_config::{StorageBackend, StorageConfig};
use booklane_core::{BooklaneError, KeyValueStore};
use tracing::info;

pub use memory::MemoryStore;
pub use snapshot::{load_json, save_json};
pub use sqlite::SqliteStore;

/// Open the store selected by `config.backend`.
pub fn open_store(config: &StorageConfig) -> Result<Arc<dyn KeyValueStore>, BooklaneError> {
    let store: Arc<dyn KeyValueStore> = match config.backend {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::Sqlite => Arc::new(SqliteStore::open(config)?),
    };
    info!(backend = store.name(), "persistent store opened");
    Ok(store)
}
