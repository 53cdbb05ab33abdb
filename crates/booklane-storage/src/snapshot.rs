// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed JSON snapshots over a [`KeyValueStore`].
//!
//! Repositories call [`load_json`] at the start of every operation and
//! [`save_json`] after mutating, so each mutation starts from the latest
//! persisted state.

use booklane_core::{BooklaneError, KeyValueStore};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Read and decode the blob under `key`. An absent key yields `T::default()`.
///
/// A blob that fails to decode is a [`BooklaneError::Storage`] error rather
/// than an empty collection, so a bad write never silently drops data.
pub fn load_json<T>(store: &dyn KeyValueStore, key: &str) -> Result<T, BooklaneError>
where
    T: DeserializeOwned + Default,
{
    match store.get(key)? {
        Some(blob) if !blob.trim().is_empty() => Ok(serde_json::from_str(&blob)?),
        _ => Ok(T::default()),
    }
}

/// Encode `value` and replace the blob under `key`.
pub fn save_json<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), BooklaneError>
where
    T: Serialize + ?Sized,
{
    let blob = serde_json::to_string(value)?;
    store.set(key, &blob)
}
