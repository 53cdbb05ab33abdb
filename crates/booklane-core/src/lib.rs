// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Booklane conversation and notification engine.
//!
//! This crate provides the error taxonomy, the shared domain types and the
//! collaborator traits used throughout the workspace. Repositories and
//! surfaces depend only on the traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::BooklaneError;
pub use types::{
    AdapterType, Conversation, ConversationId, HealthStatus, ItemRef, Message, MessageId,
    Notification, NotificationDraft, NotificationFilter, NotificationId, NotificationKind,
    Participant, User, UserId,
};

// Re-export all collaborator traits at crate root.
pub use traits::{
    Adapter, Clock, EventSource, HandoffAdapter, KeyValueStore, SessionProvider, SystemClock,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booklane_error_has_all_variants() {
        let _config = BooklaneError::Config("test".into());
        let _storage = BooklaneError::storage(std::io::Error::other("test"));
        let _not_found = BooklaneError::not_found("conversation", "c1");
        let _empty = BooklaneError::EmptyBody;
        let _no_user = BooklaneError::NoUser;
        let _not_participant = BooklaneError::NotParticipant {
            conversation_id: "c1".into(),
            user_id: "carol".into(),
        };
        let _handle = BooklaneError::HandleRequired {
            user_id: "bob".into(),
        };
        let _invalid = BooklaneError::InvalidInput("test".into());
        let _internal = BooklaneError::Internal("test".into());
    }

    #[test]
    fn not_found_message_names_entity() {
        let err = BooklaneError::not_found("notification", "n-9");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "notification not found: n-9");
        assert!(!BooklaneError::EmptyBody.is_not_found());
    }

    #[test]
    fn adapter_type_display_round_trip() {
        use std::str::FromStr;

        for variant in [
            AdapterType::Store,
            AdapterType::Session,
            AdapterType::EventSource,
            AdapterType::Handoff,
        ] {
            let parsed = AdapterType::from_str(&variant.to_string()).expect("should parse back");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn all_traits_are_exported() {
        fn _assert_adapter<T: Adapter>() {}
        fn _assert_store<T: KeyValueStore>() {}
        fn _assert_session<T: SessionProvider>() {}
        fn _assert_event_source<T: EventSource>() {}
        fn _assert_handoff<T: HandoffAdapter>() {}
        fn _assert_clock<T: Clock>() {}
        _assert_clock::<SystemClock>();
    }
}
