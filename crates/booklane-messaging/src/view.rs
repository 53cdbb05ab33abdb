// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbox and thread view-models, always built for one viewer.

use booklane_core::{
    Conversation, ConversationId, ItemRef, Message, MessageId, Participant, UserId,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Maximum preview length, in characters, before an ellipsis is appended.
pub const PREVIEW_CHARS: usize = 60;

/// One row of a user's inbox.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationSummary {
    pub id: ConversationId,
    pub counterpart_name: String,
    pub item_title: String,
    /// Last message body, prefixed with "You: " when the viewer sent it.
    pub preview: Option<String>,
    pub last_activity: DateTime<Utc>,
    pub unread: bool,
    pub unread_count: usize,
}

impl ConversationSummary {
    /// `None` when `viewer` is not a participant.
    pub fn for_viewer(conversation: &Conversation, viewer: &UserId) -> Option<Self> {
        let counterpart = conversation.counterpart(viewer)?;
        let preview = conversation.last_message().map(|m| {
            let body = truncate(&m.body, PREVIEW_CHARS);
            if &m.sender_id == viewer {
                format!("You: {body}")
            } else {
                body
            }
        });
        let unread_count = conversation.unread_count_for(viewer);

        Some(Self {
            id: conversation.id.clone(),
            counterpart_name: counterpart.display_name.clone(),
            item_title: conversation.item.title.clone(),
            preview,
            last_activity: conversation.last_activity(),
            unread: unread_count > 0,
            unread_count,
        })
    }
}

/// Build the inbox for `viewer` from an already-ordered conversation list.
pub fn inbox(conversations: &[Conversation], viewer: &UserId) -> Vec<ConversationSummary> {
    conversations
        .iter()
        .filter_map(|c| ConversationSummary::for_viewer(c, viewer))
        .collect()
}

/// A message as seen by one side of the thread.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadMessage {
    pub id: MessageId,
    pub sender_name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub is_own: bool,
    /// Read receipt. Only ever true for the viewer's own messages.
    pub seen_by_counterpart: bool,
}

/// A full conversation as seen by one participant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadView {
    pub conversation_id: ConversationId,
    pub item: ItemRef,
    pub counterpart: Participant,
    pub messages: Vec<ThreadMessage>,
}

impl ThreadView {
    pub fn for_viewer(conversation: &Conversation, viewer: &UserId) -> Option<Self> {
        let counterpart = conversation.counterpart(viewer)?.clone();
        let messages = conversation
            .messages
            .iter()
            .map(|m| thread_message(conversation, m, viewer))
            .collect();

        Some(Self {
            conversation_id: conversation.id.clone(),
            item: conversation.item.clone(),
            counterpart,
            messages,
        })
    }
}

fn thread_message(
    conversation: &Conversation,
    message: &Message,
    viewer: &UserId,
) -> ThreadMessage {
    let is_own = &message.sender_id == viewer;
    let sender_name = conversation
        .participant(&message.sender_id)
        .map(|p| p.display_name.clone())
        .unwrap_or_else(|| message.sender_id.to_string());

    ThreadMessage {
        id: message.id.clone(),
        sender_name,
        body: message.body.clone(),
        created_at: message.created_at,
        is_own,
        seen_by_counterpart: is_own && message.read,
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", text[..cut].trim_end()),
        None => text.to_string(),
    }
}
