// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across repositories, adapters and surfaces.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Borrow the raw identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Stable identifier of a marketplace member.
    UserId
);
string_id!(
    /// Unique identifier for a conversation.
    ConversationId
);
string_id!(
    /// Unique identifier for a message.
    MessageId
);
string_id!(
    /// Unique identifier for a notification.
    NotificationId
);

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of collaborator behind an [`Adapter`](crate::Adapter).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Store,
    Session,
    EventSource,
    Handoff,
}

/// A logged-in marketplace member, as supplied by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

impl User {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One side of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: UserId,
    pub display_name: String,
    /// Handle on the external messaging channel (a phone number for WhatsApp).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_handle: Option<String>,
}

impl Participant {
    pub fn new(user_id: impl Into<UserId>, display_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            external_handle: None,
        }
    }

    pub fn with_handle(mut self, handle: impl Into<String>) -> Self {
        self.external_handle = Some(handle.into());
        self
    }
}

impl From<&User> for Participant {
    fn from(user: &User) -> Self {
        Participant::new(user.id.clone(), user.name.clone())
    }
}

/// The listing a conversation is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: String,
    pub title: String,
}

impl ItemRef {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// A single message inside a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender_id: UserId,
    pub body: String,
    pub created_at: DateTime<Utc>,
    /// Whether the participant who did not send this message has seen it.
    /// Only ever flips from `false` to `true`.
    #[serde(default)]
    pub read: bool,
}

/// A conversation between exactly two participants about one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub participants: [Participant; 2],
    pub item: ItemRef,
    /// Insertion order is chronological order.
    #[serde(default)]
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    /// Whether this conversation is the one identified by (item, unordered pair).
    pub fn matches(&self, item_id: &str, a: &UserId, b: &UserId) -> bool {
        if self.item.id != item_id {
            return false;
        }
        let [first, second] = &self.participants;
        (&first.user_id == a && &second.user_id == b)
            || (&first.user_id == b && &second.user_id == a)
    }

    pub fn involves(&self, user: &UserId) -> bool {
        self.participant(user).is_some()
    }

    pub fn participant(&self, user: &UserId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.user_id == user)
    }

    pub fn participant_mut(&mut self, user: &UserId) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| &p.user_id == user)
    }

    /// The participant on the other side from `user`.
    pub fn counterpart(&self, user: &UserId) -> Option<&Participant> {
        if !self.involves(user) {
            return None;
        }
        self.participants.iter().find(|p| &p.user_id != user)
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Timestamp used for list ordering: the last message, or creation for empty threads.
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_message()
            .map(|m| m.created_at)
            .unwrap_or(self.created_at)
    }

    /// Number of messages sent by the counterpart that `user` has not read.
    pub fn unread_count_for(&self, user: &UserId) -> usize {
        self.messages
            .iter()
            .filter(|m| &m.sender_id != user && !m.read)
            .count()
    }

    pub fn has_unread_for(&self, user: &UserId) -> bool {
        self.unread_count_for(user) > 0
    }

    /// Flip `read` on every message `reader` did not send. Returns how many flipped.
    pub fn mark_read_by(&mut self, reader: &UserId) -> usize {
        let mut flipped = 0;
        for message in self.messages.iter_mut() {
            if &message.sender_id != reader && !message.read {
                message.read = true;
                flipped += 1;
            }
        }
        flipped
    }
}

/// Closed set of notification kinds.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum NotificationKind {
    NewListing,
    Message,
    Transaction,
    Review,
    System,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 5] = [
        NotificationKind::NewListing,
        NotificationKind::Message,
        NotificationKind::Transaction,
        NotificationKind::Review,
        NotificationKind::System,
    ];

    /// Icon name rendered next to the notification.
    pub fn icon(self) -> &'static str {
        match self {
            NotificationKind::NewListing => "book-open",
            NotificationKind::Message => "comment",
            NotificationKind::Transaction => "receipt",
            NotificationKind::Review => "star",
            NotificationKind::System => "bell",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NotificationKind::NewListing => "New listing",
            NotificationKind::Message => "Message",
            NotificationKind::Transaction => "Transaction",
            NotificationKind::Review => "Review",
            NotificationKind::System => "System",
        }
    }

    /// Where activating a notification of this kind leads when it carries no link.
    pub fn default_destination(self) -> Option<&'static str> {
        match self {
            NotificationKind::NewListing => Some("/browse"),
            NotificationKind::Message => Some("/messages"),
            NotificationKind::Transaction => Some("/orders"),
            NotificationKind::Review => Some("/profile#reviews"),
            NotificationKind::System => None,
        }
    }
}

/// A persisted notification in a user's list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
    /// Set when the dropdown was opened while this notification existed.
    #[serde(default)]
    pub seen: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl Notification {
    /// The explicit link, falling back to the kind's default destination.
    pub fn destination(&self) -> Option<String> {
        self.link
            .clone()
            .or_else(|| self.kind.default_destination().map(str::to_string))
    }
}

/// Input for creating a notification, from any producer.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationDraft {
    pub kind: NotificationKind,
    pub message: String,
    pub link: Option<String>,
    pub payload: Option<serde_json::Value>,
}

impl NotificationDraft {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            link: None,
            payload: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// A counterpart sent a message in a conversation.
    pub fn message_from(sender_name: &str, item: &ItemRef, conversation: &ConversationId) -> Self {
        Self::new(
            NotificationKind::Message,
            format!("New message from {sender_name} about \"{}\"", item.title),
        )
        .with_link(format!("/messages/{conversation}"))
        .with_payload(serde_json::json!({
            "conversation_id": conversation.as_str(),
            "book_id": item.id,
            "sender": sender_name,
        }))
    }

    /// One of the user's listings was sold.
    pub fn item_sold(item: &ItemRef, buyer_name: &str) -> Self {
        Self::new(
            NotificationKind::Transaction,
            format!("\"{}\" was bought by {buyer_name}", item.title),
        )
        .with_payload(serde_json::json!({
            "book_id": item.id,
            "title": item.title,
            "buyer": buyer_name,
        }))
    }

    /// A listing matching the user's interests went up.
    pub fn new_listing(item: &ItemRef, seller_name: &str) -> Self {
        Self::new(
            NotificationKind::NewListing,
            format!("{seller_name} just listed \"{}\"", item.title),
        )
        .with_link(format!("/books/{}", item.id))
        .with_payload(serde_json::json!({
            "book_id": item.id,
            "title": item.title,
            "seller": seller_name,
        }))
    }

    /// Someone reviewed the user.
    pub fn review_received(reviewer_name: &str, stars: u8) -> Self {
        Self::new(
            NotificationKind::Review,
            format!("{reviewer_name} left you a {stars}-star review"),
        )
        .with_payload(serde_json::json!({
            "reviewer": reviewer_name,
            "rating": stars,
        }))
    }

    pub fn system(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::System, message)
    }
}

/// The "all / unread / by-kind" views over a notification list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationFilter {
    #[default]
    All,
    Unread,
    Kind(NotificationKind),
}

impl NotificationFilter {
    pub fn matches(&self, notification: &Notification) -> bool {
        match self {
            NotificationFilter::All => true,
            NotificationFilter::Unread => !notification.read,
            NotificationFilter::Kind(kind) => notification.kind == *kind,
        }
    }
}

impl FromStr for NotificationFilter {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(NotificationFilter::All),
            "unread" => Ok(NotificationFilter::Unread),
            other => NotificationKind::from_str(other).map(NotificationFilter::Kind),
        }
    }
}
