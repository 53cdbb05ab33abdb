// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistent store trait: the engine's only persistence mechanism.

use crate::error::BooklaneError;
use crate::traits::adapter::Adapter;

/// A durable key-value map of string blobs.
///
/// The engine treats the store as total: an absent key means an empty
/// collection. Every call is synchronous start-to-finish.
pub trait KeyValueStore: Adapter {
    /// Returns the blob stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, BooklaneError>;

    /// Replaces the blob stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), BooklaneError>;
}
