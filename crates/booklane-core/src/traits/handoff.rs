// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Handoff adapter trait for continuing a conversation on an external channel.

use crate::error::BooklaneError;
use crate::traits::adapter::Adapter;
use crate::types::{Conversation, UserId};

/// Formats a conversation's context into a deep link for a third-party channel.
pub trait HandoffAdapter: Adapter {
    /// Builds an opaque deep link from `sender` to their counterpart in `conversation`.
    ///
    /// Fails with [`BooklaneError::HandleRequired`] when the counterpart has
    /// no external handle on record.
    fn deep_link(&self, conversation: &Conversation, sender: &UserId)
    -> Result<String, BooklaneError>;
}
