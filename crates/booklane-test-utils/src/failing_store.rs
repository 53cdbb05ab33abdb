// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store wrapper for exercising storage-error propagation.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use booklane_core::{Adapter, AdapterType, BooklaneError, KeyValueStore};
use booklane_storage::MemoryStore;

const UNLIMITED: usize = usize::MAX;

/// A [`MemoryStore`] whose writes fail while `fail_writes` is set, and whose
/// reads can be made to fail after a number of successful ones.
pub struct FailingStore {
    inner: MemoryStore,
    fail_writes: AtomicBool,
    reads_left: AtomicUsize,
}

impl Default for FailingStore {
    fn default() -> Self {
        Self {
            inner: MemoryStore::default(),
            fail_writes: AtomicBool::new(false),
            reads_left: AtomicUsize::new(UNLIMITED),
        }
    }
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let `reads` more reads succeed, then fail every read. `None` lifts
    /// the limit.
    pub fn fail_reads_after(&self, reads: Option<usize>) {
        self.reads_left.store(reads.unwrap_or(UNLIMITED), Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl Adapter for FailingStore {
    fn name(&self) -> &str {
        "failing"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, BooklaneError> {
        let left = self.reads_left.load(Ordering::SeqCst);
        if left == 0 {
            return Err(BooklaneError::storage(std::io::Error::other("read failed")));
        }
        if left != UNLIMITED {
            self.reads_left.store(left - 1, Ordering::SeqCst);
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BooklaneError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BooklaneError::storage(std::io::Error::other("disk full")));
        }
        self.inner.set(key, value)
    }
}
