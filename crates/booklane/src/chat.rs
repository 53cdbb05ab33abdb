// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `send`, `inbox`, `thread` and `handoff` commands.

use booklane_core::{BooklaneError, ConversationId, Message, NotificationDraft, UserId};
use booklane_messaging::{ThreadView, prepare_handoff, view};
use serde::Serialize;
use tracing::info;

use crate::args::{ItemArg, UserArg};
use crate::engine::Engine;
use crate::output::Output;

#[derive(Serialize)]
struct Sent<'a> {
    conversation_id: &'a ConversationId,
    message: &'a Message,
}

/// Post a message about an item, opening the conversation if needed.
///
/// The recipient also gets a message notification.
pub fn run_send(
    engine: &Engine,
    out: &Output,
    from: &UserArg,
    to: &UserArg,
    item: &ItemArg,
    body: &str,
) -> Result<(), BooklaneError> {
    let conversation = engine
        .conversations
        .resolve_or_create(&from.participant(), &to.participant(), &item.0)?;
    let message = engine
        .conversations
        .append_message(&conversation.id, &from.0.id, body)?;

    let draft = NotificationDraft::message_from(&from.0.name, &item.0, &conversation.id);
    engine.notifications.add(Some(&to.0.id), draft)?;
    info!(conversation_id = %conversation.id, "message sent");

    if out.json {
        out.print_json(&Sent {
            conversation_id: &conversation.id,
            message: &message,
        });
    } else {
        out.ok(&format!(
            "sent to {} about \"{}\" ({})",
            to.0.name, item.0.title, conversation.id
        ));
    }
    Ok(())
}

pub fn run_inbox(engine: &Engine, out: &Output, user: &UserId) -> Result<(), BooklaneError> {
    let conversations = engine.conversations.list_for_user(user)?;
    let rows = view::inbox(&conversations, user);
    if out.json {
        out.print_json(&rows);
    } else {
        let unread = engine.conversations.unread_conversation_count(user)?;
        println!("  Inbox ({unread} unread)");
        out.inbox(&rows);
    }
    Ok(())
}

/// Show a conversation and mark the counterpart's messages read.
pub fn run_thread(
    engine: &Engine,
    out: &Output,
    user: &UserId,
    id: &ConversationId,
) -> Result<(), BooklaneError> {
    let conversation = engine.conversations.get(id)?;
    if !conversation.involves(user) {
        return Err(BooklaneError::NotParticipant {
            conversation_id: id.to_string(),
            user_id: user.to_string(),
        });
    }
    engine.conversations.mark_read(id, user)?;

    let conversation = engine.conversations.get(id)?;
    let thread = ThreadView::for_viewer(&conversation, user).ok_or_else(|| {
        BooklaneError::Internal(format!("conversation {id} lost participant {user}"))
    })?;
    if out.json {
        out.print_json(&thread);
    } else {
        out.thread(&thread);
    }
    Ok(())
}

#[derive(Serialize)]
struct Handoff<'a> {
    conversation_id: &'a ConversationId,
    link: &'a str,
}

pub fn run_handoff(
    engine: &Engine,
    out: &Output,
    user: &UserId,
    id: &ConversationId,
    handle: Option<&str>,
) -> Result<(), BooklaneError> {
    let link = prepare_handoff(&engine.conversations, &engine.handoff, id, user, handle)?;
    if out.json {
        out.print_json(&Handoff {
            conversation_id: id,
            link: &link,
        });
    } else {
        println!("{link}");
    }
    Ok(())
}
