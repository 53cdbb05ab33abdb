// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions for the Booklane engine.
//!
//! All collaborator adapters extend the [`Adapter`] base trait. They are
//! synchronous: the engine runs on a single cooperative execution context.

pub mod adapter;
pub mod clock;
pub mod event_source;
pub mod handoff;
pub mod session;
pub mod store;

// Re-export all traits at the traits module level for convenience.
pub use adapter::Adapter;
pub use clock::{Clock, SystemClock};
pub use event_source::EventSource;
pub use handoff::HandoffAdapter;
pub use session::SessionProvider;
pub use store::KeyValueStore;
