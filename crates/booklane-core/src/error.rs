// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Booklane engine.

use thiserror::Error;

/// The primary error type used across all Booklane repositories, adapters and surfaces.
///
/// Every variant is recoverable: callers either show inline feedback
/// (`EmptyBody`), prompt for login (`NoUser`), or treat the condition as
/// "nothing to do" (`NotFound`).
#[derive(Debug, Error)]
pub enum BooklaneError {
    /// Configuration errors (invalid TOML, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Persistent store errors (backend failure, blob serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A referenced conversation, notification or participant does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A message body was empty after trimming.
    #[error("message body must not be empty")]
    EmptyBody,

    /// The action requires a logged-in user and there is none.
    #[error("no user is logged in")]
    NoUser,

    /// The acting user is not one of the conversation's two participants.
    #[error("user {user_id} is not a participant of conversation {conversation_id}")]
    NotParticipant {
        conversation_id: String,
        user_id: String,
    },

    /// The handoff target has no external-channel handle on record.
    #[error("an external handle is required for user {user_id}")]
    HandleRequired { user_id: String },

    /// Caller-correctable input that fails a domain rule.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl BooklaneError {
    /// Shorthand for a [`BooklaneError::Storage`] wrapping any error source.
    pub fn storage(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        BooklaneError::Storage {
            source: source.into(),
        }
    }

    /// Shorthand for a [`BooklaneError::NotFound`].
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        BooklaneError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Returns `true` for the "nothing to do" class of failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BooklaneError::NotFound { .. })
    }
}

impl From<serde_json::Error> for BooklaneError {
    fn from(err: serde_json::Error) -> Self {
        BooklaneError::storage(err)
    }
}
