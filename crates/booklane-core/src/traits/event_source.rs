// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event source trait for injectable notification producers.

use crate::error::BooklaneError;
use crate::traits::adapter::Adapter;

/// A background producer of notifications (a stand-in for server push).
///
/// `start` and `stop` are both idempotent. After `stop`, no further
/// notifications are produced, even by a tick that was already scheduled.
pub trait EventSource: Adapter {
    /// Starts producing events. Requires a running async runtime.
    fn start(&self) -> Result<(), BooklaneError>;

    /// Stops producing events.
    fn stop(&self);

    /// Returns whether the source is currently scheduled.
    fn is_running(&self) -> bool;
}
