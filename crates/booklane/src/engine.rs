// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wires repositories and surfaces over the configured store.

use std::sync::Arc;

use booklane_config::BooklaneConfig;
use booklane_core::{BooklaneError, Clock, SystemClock};
use booklane_messaging::{ConversationRepository, WhatsAppHandoff};
use booklane_notify::{NotificationDispatcher, NotificationRepository};

pub struct Engine {
    pub config: BooklaneConfig,
    pub clock: Arc<dyn Clock>,
    pub conversations: ConversationRepository,
    pub notifications: NotificationRepository,
    pub dispatcher: NotificationDispatcher,
    pub handoff: WhatsAppHandoff,
}

impl Engine {
    pub fn open(config: BooklaneConfig) -> Result<Self, BooklaneError> {
        let store = booklane_storage::open_store(&config.storage)?;
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let conversations = ConversationRepository::new(store.clone(), clock.clone());
        let notifications = NotificationRepository::new(store, clock.clone());
        let dispatcher = NotificationDispatcher::new(
            notifications.clone(),
            clock.clone(),
            &config.notifications,
        );
        let handoff = WhatsAppHandoff::new(&config.handoff)?;

        Ok(Self {
            config,
            clock,
            conversations,
            notifications,
            dispatcher,
            handoff,
        })
    }
}
