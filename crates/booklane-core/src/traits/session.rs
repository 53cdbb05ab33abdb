// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session provider trait standing in for the auth collaborator.

use crate::traits::adapter::Adapter;
use crate::types::User;

/// Read-only view of the current browsing session.
///
/// The engine never mutates the session; it only reads it to gate
/// notification creation and to scope per-user lists.
pub trait SessionProvider: Adapter {
    /// Returns the logged-in user, or `None` for an anonymous session.
    fn current_user(&self) -> Option<User>;
}
