// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation repository over the persistent store.
//!
//! Every operation re-reads the `conversations` blob, so a mutation always
//! starts from the latest persisted snapshot. Nothing is cached between
//! calls.

use std::sync::Arc;

use booklane_core::{
    BooklaneError, Clock, Conversation, ConversationId, ItemRef, KeyValueStore, Message,
    MessageId, Participant, UserId,
};
use booklane_storage::keys::CONVERSATIONS_KEY;
use booklane_storage::{load_json, save_json};
use tracing::{debug, info};

/// Owns the set of conversations, for every user.
pub struct ConversationRepository {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl ConversationRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    fn load(&self) -> Result<Vec<Conversation>, BooklaneError> {
        load_json(self.store.as_ref(), CONVERSATIONS_KEY)
    }

    fn save(&self, conversations: &[Conversation]) -> Result<(), BooklaneError> {
        save_json(self.store.as_ref(), CONVERSATIONS_KEY, conversations)
    }

    /// Return the conversation for (item, {a, b}), creating an empty one if
    /// none exists. An existing conversation is returned unchanged, whatever
    /// order the participants are given in.
    pub fn resolve_or_create(
        &self,
        a: &Participant,
        b: &Participant,
        item: &ItemRef,
    ) -> Result<Conversation, BooklaneError> {
        if a.user_id == b.user_id {
            return Err(BooklaneError::InvalidInput(format!(
                "cannot open a conversation between {} and themselves",
                a.user_id
            )));
        }

        let mut conversations = self.load()?;
        if let Some(existing) = conversations
            .iter()
            .find(|c| c.matches(&item.id, &a.user_id, &b.user_id))
        {
            debug!(conversation_id = %existing.id, "conversation resolved");
            return Ok(existing.clone());
        }

        let conversation = Conversation {
            id: ConversationId(uuid::Uuid::new_v4().to_string()),
            participants: [a.clone(), b.clone()],
            item: item.clone(),
            messages: Vec::new(),
            created_at: self.clock.now(),
        };
        conversations.push(conversation.clone());
        self.save(&conversations)?;

        info!(
            conversation_id = %conversation.id,
            item_id = %item.id,
            "conversation created"
        );
        Ok(conversation)
    }

    /// Load a single conversation.
    pub fn get(&self, id: &ConversationId) -> Result<Conversation, BooklaneError> {
        self.load()?
            .into_iter()
            .find(|c| &c.id == id)
            .ok_or_else(|| BooklaneError::not_found("conversation", id.as_str()))
    }

    /// Append a message from `sender`. The stored body is trimmed.
    pub fn append_message(
        &self,
        id: &ConversationId,
        sender: &UserId,
        body: &str,
    ) -> Result<Message, BooklaneError> {
        let mut conversations = self.load()?;
        let conversation = conversations
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| BooklaneError::not_found("conversation", id.as_str()))?;

        let body = body.trim();
        if body.is_empty() {
            return Err(BooklaneError::EmptyBody);
        }
        if !conversation.involves(sender) {
            return Err(BooklaneError::NotParticipant {
                conversation_id: id.to_string(),
                user_id: sender.to_string(),
            });
        }

        let message = Message {
            id: MessageId(uuid::Uuid::new_v4().to_string()),
            sender_id: sender.clone(),
            body: body.to_string(),
            created_at: self.clock.now(),
            read: false,
        };
        conversation.messages.push(message.clone());
        self.save(&conversations)?;

        debug!(conversation_id = %id, message_id = %message.id, "message appended");
        Ok(message)
    }

    /// Mark every message `reader` did not send as read.
    ///
    /// Returns how many messages flipped. A missing conversation is a no-op
    /// returning zero, and nothing is written when nothing flipped.
    pub fn mark_read(&self, id: &ConversationId, reader: &UserId) -> Result<usize, BooklaneError> {
        let mut conversations = self.load()?;
        let Some(conversation) = conversations.iter_mut().find(|c| &c.id == id) else {
            debug!(conversation_id = %id, "mark_read on unknown conversation ignored");
            return Ok(0);
        };

        let flipped = conversation.mark_read_by(reader);
        if flipped > 0 {
            self.save(&conversations)?;
            debug!(
                conversation_id = %id,
                reader = %reader,
                count = flipped,
                "messages marked read"
            );
        }
        Ok(flipped)
    }

    /// Conversations `user` takes part in, most recent activity first.
    ///
    /// Activity is the last message's timestamp, or the creation time for a
    /// conversation with no messages. Ties break on id ascending.
    pub fn list_for_user(&self, user: &UserId) -> Result<Vec<Conversation>, BooklaneError> {
        let mut mine: Vec<Conversation> = self
            .load()?
            .into_iter()
            .filter(|c| c.involves(user))
            .collect();
        mine.sort_by(|x, y| {
            y.last_activity()
                .cmp(&x.last_activity())
                .then_with(|| x.id.cmp(&y.id))
        });
        Ok(mine)
    }

    /// Whether `user` has any unread message from the counterpart.
    /// An unknown conversation has nothing unread.
    pub fn has_unread(&self, id: &ConversationId, user: &UserId) -> Result<bool, BooklaneError> {
        Ok(self
            .load()?
            .iter()
            .find(|c| &c.id == id)
            .is_some_and(|c| c.has_unread_for(user)))
    }

    /// How many of `user`'s conversations hold at least one unread message.
    pub fn unread_conversation_count(&self, user: &UserId) -> Result<usize, BooklaneError> {
        Ok(self
            .load()?
            .iter()
            .filter(|c| c.involves(user) && c.has_unread_for(user))
            .count())
    }

    /// Cache `user`'s external-channel handle on their participant record.
    pub fn set_external_handle(
        &self,
        id: &ConversationId,
        user: &UserId,
        handle: &str,
    ) -> Result<Conversation, BooklaneError> {
        let handle = handle.trim();
        if handle.is_empty() {
            return Err(BooklaneError::HandleRequired {
                user_id: user.to_string(),
            });
        }

        let mut conversations = self.load()?;
        let conversation = conversations
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| BooklaneError::not_found("conversation", id.as_str()))?;
        let participant =
            conversation
                .participant_mut(user)
                .ok_or_else(|| BooklaneError::NotParticipant {
                    conversation_id: id.to_string(),
                    user_id: user.to_string(),
                })?;

        participant.external_handle = Some(handle.to_string());
        let updated = conversation.clone();
        self.save(&conversations)?;

        info!(conversation_id = %id, user = %user, "external handle cached");
        Ok(updated)
    }
}
