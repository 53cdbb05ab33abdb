// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Buyer/seller conversations for the Booklane engine.
//!
//! - [`ConversationRepository`] resolves the single conversation for an
//!   (item, participant pair), appends messages and tracks read state.
//! - [`view`] turns conversations into inbox and thread view-models for
//!   one viewer.
//! - [`WhatsAppHandoff`] continues a conversation on WhatsApp through a
//!   click-to-chat deep link.

pub mod handoff;
pub mod repository;
pub mod view;

pub use handoff::{WhatsAppHandoff, prepare_handoff};
pub use repository::ConversationRepository;
pub use view::{ConversationSummary, ThreadMessage, ThreadView};
