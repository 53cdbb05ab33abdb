// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification pipeline for the Booklane engine.
//!
//! Notifications flow from producers (user actions, the simulated event
//! source, other components) through [`NotificationDispatcher::notify`]
//! into the per-user [`NotificationRepository`], and out to three surfaces:
//! the unread badge, the dropdown list and auto-expiring toasts. Surface
//! changes are published as [`SurfaceEvent`]s, one unbounded queue per
//! subscriber so no event is ever dropped.

pub mod badge;
pub mod dispatcher;
pub mod repository;
pub mod simulator;
pub mod templates;
pub mod toast;
pub mod view;

pub use badge::BadgeState;
pub use dispatcher::{Activation, NotificationDispatcher, SurfaceEvent};
pub use repository::NotificationRepository;
pub use simulator::SimulatedEventSource;
pub use toast::{ToastPhase, ToastTiming};
pub use view::NotificationView;
