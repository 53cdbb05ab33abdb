// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WhatsApp click-to-chat handoff.
//!
//! Builds `<base>/<digits>?text=<message>` links so a buyer and seller can
//! continue outside the marketplace. The adapter holds no state; the only
//! thing persisted is the handle, cached on the participant record.

use booklane_config::HandoffConfig;
use booklane_core::{
    Adapter, AdapterType, BooklaneError, Conversation, ConversationId, HandoffAdapter, UserId,
};
use tracing::debug;
use url::Url;

use crate::repository::ConversationRepository;

pub struct WhatsAppHandoff {
    base: Url,
    app_name: String,
}

impl WhatsAppHandoff {
    pub fn new(config: &HandoffConfig) -> Result<Self, BooklaneError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| BooklaneError::Config(format!("handoff.base_url: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(BooklaneError::Config(format!(
                "handoff.base_url `{}` cannot carry a path",
                config.base_url
            )));
        }
        Ok(Self {
            base,
            app_name: config.app_name.clone(),
        })
    }

    /// The prefilled message text.
    pub fn compose(
        &self,
        conversation: &Conversation,
        sender: &UserId,
    ) -> Result<String, BooklaneError> {
        let (from, to) = sides(conversation, sender)?;
        Ok(format!(
            "Hi {to}, this is {from} from {app}. I'm interested in \"{title}\" (ref {item}).",
            app = self.app_name,
            title = conversation.item.title,
            item = conversation.item.id,
        ))
    }
}

fn sides<'a>(
    conversation: &'a Conversation,
    sender: &UserId,
) -> Result<(&'a str, &'a str), BooklaneError> {
    let not_participant = || BooklaneError::NotParticipant {
        conversation_id: conversation.id.to_string(),
        user_id: sender.to_string(),
    };
    let from = conversation.participant(sender).ok_or_else(not_participant)?;
    let to = conversation.counterpart(sender).ok_or_else(not_participant)?;
    Ok((&from.display_name, &to.display_name))
}

/// Keep only the digits of a phone-number handle.
fn digits(handle: &str) -> String {
    handle.chars().filter(char::is_ascii_digit).collect()
}

impl Adapter for WhatsAppHandoff {
    fn name(&self) -> &str {
        "whatsapp"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Handoff
    }
}

impl HandoffAdapter for WhatsAppHandoff {
    fn deep_link(
        &self,
        conversation: &Conversation,
        sender: &UserId,
    ) -> Result<String, BooklaneError> {
        let text = self.compose(conversation, sender)?;
        let target = conversation.counterpart(sender).ok_or_else(|| {
            BooklaneError::Internal("counterpart vanished after compose".to_string())
        })?;

        let number = target
            .external_handle
            .as_deref()
            .map(digits)
            .unwrap_or_default();
        if number.is_empty() {
            return Err(BooklaneError::HandleRequired {
                user_id: target.user_id.to_string(),
            });
        }

        let mut link = self.base.clone();
        link.path_segments_mut()
            .map_err(|()| BooklaneError::Internal("handoff base url has no path".to_string()))?
            .pop_if_empty()
            .push(&number);
        link.query_pairs_mut().append_pair("text", &text);

        debug!(conversation_id = %conversation.id, "handoff link built");
        Ok(link.into())
    }
}

/// Cache `handle` for the sender's counterpart when given, then build the link.
pub fn prepare_handoff(
    repo: &ConversationRepository,
    adapter: &dyn HandoffAdapter,
    id: &ConversationId,
    sender: &UserId,
    handle: Option<&str>,
) -> Result<String, BooklaneError> {
    let mut conversation = repo.get(id)?;
    if let Some(handle) = handle {
        let target = conversation
            .counterpart(sender)
            .map(|p| p.user_id.clone())
            .ok_or_else(|| BooklaneError::NotParticipant {
                conversation_id: id.to_string(),
                user_id: sender.to_string(),
            })?;
        conversation = repo.set_external_handle(id, &target, handle)?;
    }
    adapter.deep_link(&conversation, sender)
}
