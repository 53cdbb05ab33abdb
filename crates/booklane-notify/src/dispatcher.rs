// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Renders notifications onto the badge, dropdown and toast surfaces.
//!
//! The dispatcher is the single intake path for new notifications: it
//! persists through the repository, raises a toast, refreshes the badge
//! and re-renders an open dropdown. Every surface change is published as a
//! [`SurfaceEvent`]. The current user is always passed in explicitly.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use booklane_config::NotificationConfig;
use booklane_core::{BooklaneError, Clock, Notification, NotificationDraft, NotificationId, UserId};
use serde::Serialize;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::badge::BadgeState;
use crate::repository::NotificationRepository;
use crate::toast::{ToastHost, ToastPhase, ToastTiming, run_toast};
use crate::view::NotificationView;

/// A change on one of the notification surfaces.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum SurfaceEvent {
    BadgeChanged(BadgeState),
    DropdownOpened(Vec<NotificationView>),
    /// The open dropdown was re-rendered after its contents changed.
    DropdownUpdated(Vec<NotificationView>),
    DropdownClosed,
    ToastEntered(NotificationView),
    ToastVisible(NotificationId),
    ToastLeaving(NotificationId),
    ToastRemoved(NotificationId),
    Navigate(String),
}

/// What activating a toast or dropdown entry resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Navigate(String),
    /// No destination: the surface simply closes.
    Closed,
}

struct ToastEntry {
    id: NotificationId,
    phase: ToastPhase,
    close: CancellationToken,
}

#[derive(Default)]
struct Surfaces {
    toasts: Vec<ToastEntry>,
    dropdown_for: Option<UserId>,
    badge: BadgeState,
}

struct Inner {
    repo: NotificationRepository,
    clock: Arc<dyn Clock>,
    timing: ToastTiming,
    dropdown_limit: usize,
    badge_cap: usize,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<SurfaceEvent>>>,
    surfaces: Mutex<Surfaces>,
}

impl Inner {
    fn surfaces(&self) -> MutexGuard<'_, Surfaces> {
        self.surfaces.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Delivers to every live subscriber in emission order. Receivers that
    /// were dropped are pruned.
    fn emit(&self, event: SurfaceEvent) {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|tx| tx.send(event.clone()).is_ok());
    }
}

impl ToastHost for Inner {
    fn promote(&self, id: &NotificationId) {
        let promoted = {
            let mut surfaces = self.surfaces();
            match surfaces.toasts.iter_mut().find(|t| &t.id == id) {
                Some(toast) if toast.phase == ToastPhase::Entering => {
                    toast.phase = ToastPhase::Visible;
                    true
                }
                _ => false,
            }
        };
        if promoted {
            self.emit(SurfaceEvent::ToastVisible(id.clone()));
        }
    }

    fn begin_leaving(&self, id: &NotificationId) -> bool {
        let leaving = {
            let mut surfaces = self.surfaces();
            match surfaces.toasts.iter_mut().find(|t| &t.id == id) {
                Some(toast) if toast.phase.is_dismissable() => {
                    toast.phase = ToastPhase::Leaving;
                    true
                }
                _ => false,
            }
        };
        if leaving {
            self.emit(SurfaceEvent::ToastLeaving(id.clone()));
        }
        leaving
    }

    fn detach(&self, id: &NotificationId) {
        let removed = {
            let mut surfaces = self.surfaces();
            surfaces
                .toasts
                .iter()
                .position(|t| &t.id == id)
                .map(|pos| surfaces.toasts.remove(pos))
        };
        match removed {
            Some(_) => self.emit(SurfaceEvent::ToastRemoved(id.clone())),
            None => debug!(notification_id = %id, "toast already detached"),
        }
    }
}

/// Cheap to clone; clones share the same surfaces and event channel.
#[derive(Clone)]
pub struct NotificationDispatcher {
    inner: Arc<Inner>,
}

impl NotificationDispatcher {
    pub fn new(
        repo: NotificationRepository,
        clock: Arc<dyn Clock>,
        config: &NotificationConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                repo,
                clock,
                timing: ToastTiming::from(config),
                dropdown_limit: config.dropdown_limit,
                badge_cap: config.badge_cap,
                subscribers: Mutex::new(Vec::new()),
                surfaces: Mutex::new(Surfaces::default()),
            }),
        }
    }

    /// A lossless stream of every surface change from now on.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<SurfaceEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    pub fn repository(&self) -> &NotificationRepository {
        &self.inner.repo
    }

    /// Persist a new notification for `user` and put it on every surface.
    ///
    /// Fails with [`BooklaneError::NoUser`] for an anonymous session, in
    /// which case no surface changes. Once the notification is stored the
    /// call succeeds; a failed badge or dropdown refresh is only logged.
    pub fn notify(
        &self,
        user: Option<&UserId>,
        draft: NotificationDraft,
    ) -> Result<Notification, BooklaneError> {
        let notification = self.inner.repo.add(user, draft)?;
        self.show_toast(&notification);
        if let Some(user) = user {
            if let Err(e) = self.refresh_badge(user) {
                warn!(notification_id = %notification.id, error = %e, "badge refresh failed");
            }
            if let Err(e) = self.rerender_dropdown(user) {
                warn!(notification_id = %notification.id, error = %e, "dropdown refresh failed");
            }
        }
        Ok(notification)
    }

    fn show_toast(&self, notification: &Notification) {
        let Ok(runtime) = Handle::try_current() else {
            warn!(notification_id = %notification.id, "no async runtime, toast skipped");
            return;
        };

        let deadline = Instant::now() + self.inner.timing.timeout;
        let close = CancellationToken::new();
        self.inner.surfaces().toasts.push(ToastEntry {
            id: notification.id.clone(),
            phase: ToastPhase::Entering,
            close: close.clone(),
        });
        self.inner.emit(SurfaceEvent::ToastEntered(NotificationView::new(
            notification,
            self.inner.clock.now(),
        )));

        runtime.spawn(run_toast(
            Arc::clone(&self.inner),
            notification.id.clone(),
            self.inner.timing,
            deadline,
            close,
        ));
    }

    /// Request an early close. Returns `false` when the toast is unknown,
    /// already leaving, or already asked to close.
    pub fn dismiss_toast(&self, id: &NotificationId) -> bool {
        let surfaces = self.inner.surfaces();
        match surfaces.toasts.iter().find(|t| &t.id == id) {
            Some(toast) if toast.phase.is_dismissable() && !toast.close.is_cancelled() => {
                toast.close.cancel();
                true
            }
            _ => {
                debug!(notification_id = %id, "dismiss ignored");
                false
            }
        }
    }

    /// Toasts on screen, oldest first.
    pub fn active_toasts(&self) -> Vec<NotificationId> {
        self.inner
            .surfaces()
            .toasts
            .iter()
            .map(|t| t.id.clone())
            .collect()
    }

    pub fn toast_phase(&self, id: &NotificationId) -> Option<ToastPhase> {
        self.inner
            .surfaces()
            .toasts
            .iter()
            .find(|t| &t.id == id)
            .map(|t| t.phase)
    }

    /// Recompute the badge from the persisted unread count.
    pub fn refresh_badge(&self, user: &UserId) -> Result<BadgeState, BooklaneError> {
        let count = self.inner.repo.unread_count(user)?;
        let badge = BadgeState::new(count, self.inner.badge_cap);
        self.set_badge(badge.clone());
        Ok(badge)
    }

    fn set_badge(&self, badge: BadgeState) {
        let changed = {
            let mut surfaces = self.inner.surfaces();
            if surfaces.badge == badge {
                false
            } else {
                surfaces.badge = badge.clone();
                true
            }
        };
        if changed {
            self.inner.emit(SurfaceEvent::BadgeChanged(badge));
        }
    }

    pub fn badge(&self) -> BadgeState {
        self.inner.surfaces().badge.clone()
    }

    fn render(&self, user: &UserId) -> Result<Vec<NotificationView>, BooklaneError> {
        let now = self.inner.clock.now();
        Ok(self
            .inner
            .repo
            .recent_for_user(user, self.inner.dropdown_limit)?
            .iter()
            .map(|n| NotificationView::new(n, now))
            .collect())
    }

    /// Open the dropdown: everything currently listed becomes seen, and the
    /// most recent entries are rendered.
    pub fn open_dropdown(&self, user: &UserId) -> Result<Vec<NotificationView>, BooklaneError> {
        self.inner.repo.mark_all_seen(user)?;
        let items = self.render(user)?;
        self.inner.surfaces().dropdown_for = Some(user.clone());
        self.inner.emit(SurfaceEvent::DropdownOpened(items.clone()));
        Ok(items)
    }

    /// Returns whether the dropdown was open.
    pub fn close_dropdown(&self) -> bool {
        let was_open = self.inner.surfaces().dropdown_for.take().is_some();
        if was_open {
            self.inner.emit(SurfaceEvent::DropdownClosed);
        }
        was_open
    }

    /// Flip the dropdown. Returns the new open state.
    pub fn toggle_dropdown(&self, user: &UserId) -> Result<bool, BooklaneError> {
        if self.close_dropdown() {
            return Ok(false);
        }
        self.open_dropdown(user)?;
        Ok(true)
    }

    /// A click anywhere outside the dropdown closes it. Clicks inside never
    /// reach the dispatcher.
    pub fn click_outside(&self) -> bool {
        self.close_dropdown()
    }

    pub fn is_dropdown_open(&self) -> bool {
        self.inner.surfaces().dropdown_for.is_some()
    }

    fn rerender_dropdown(&self, user: &UserId) -> Result<(), BooklaneError> {
        let open_for_user = self.inner.surfaces().dropdown_for.as_ref() == Some(user);
        if open_for_user {
            let items = self.render(user)?;
            self.inner.emit(SurfaceEvent::DropdownUpdated(items));
        }
        Ok(())
    }

    /// A click on a toast or dropdown entry: mark it read, then navigate to
    /// its destination or just close the surfaces.
    pub fn activate(
        &self,
        user: &UserId,
        id: &NotificationId,
    ) -> Result<Activation, BooklaneError> {
        let notification = self.inner.repo.get(user, id)?;
        self.inner.repo.mark_read(user, id)?;
        self.refresh_badge(user)?;
        self.dismiss_toast(id);
        self.close_dropdown();

        match notification.destination() {
            Some(destination) => {
                debug!(notification_id = %id, %destination, "navigating");
                self.inner.emit(SurfaceEvent::Navigate(destination.clone()));
                Ok(Activation::Navigate(destination))
            }
            None => Ok(Activation::Closed),
        }
    }

    pub fn mark_all_read(&self, user: &UserId) -> Result<usize, BooklaneError> {
        let flipped = self.inner.repo.mark_all_read(user)?;
        self.refresh_badge(user)?;
        self.rerender_dropdown(user)?;
        Ok(flipped)
    }

    /// Tear surfaces down on logout: toasts start leaving, the dropdown
    /// closes and the badge hides. Persisted notifications are untouched.
    pub fn clear_session(&self) {
        let ids = self.active_toasts();
        for id in &ids {
            self.dismiss_toast(id);
        }
        self.close_dropdown();
        self.set_badge(BadgeState::Hidden);
        debug!(toasts = ids.len(), "surfaces cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booklane_storage::MemoryStore;
    use booklane_test_utils::{FailingStore, ManualClock};
    use tracing_test::traced_test;

    fn dispatcher() -> NotificationDispatcher {
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::fixed());
        let repo = NotificationRepository::new(Arc::new(MemoryStore::new()), clock.clone());
        NotificationDispatcher::new(repo, clock, &NotificationConfig::default())
    }

    fn alice() -> UserId {
        UserId::from("alice")
    }

    #[test]
    #[traced_test]
    fn notify_without_runtime_still_persists() {
        let d = dispatcher();
        let n = d
            .notify(Some(&alice()), NotificationDraft::system("no runtime here"))
            .unwrap();
        assert!(d.active_toasts().is_empty());
        assert_eq!(d.badge().count(), 1);
        assert_eq!(d.repository().get(&alice(), &n.id).unwrap().message, "no runtime here");
        assert!(logs_contain("toast skipped"));
    }

    #[test]
    #[traced_test]
    fn notify_succeeds_once_stored_even_if_badge_refresh_fails() {
        let store = Arc::new(FailingStore::new());
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::fixed());
        let repo = NotificationRepository::new(store.clone(), clock.clone());
        let d = NotificationDispatcher::new(repo, clock, &NotificationConfig::default());

        // `add` reads once; the badge refresh after it hits the failure.
        store.fail_reads_after(Some(1));
        let n = d
            .notify(Some(&alice()), NotificationDraft::system("delivered"))
            .unwrap();
        assert!(logs_contain("badge refresh failed"));

        store.fail_reads_after(None);
        assert_eq!(d.repository().get(&alice(), &n.id).unwrap().message, "delivered");
        assert_eq!(d.refresh_badge(&alice()).unwrap(), BadgeState::new(1, 9));
    }

    #[test]
    fn anonymous_notify_changes_nothing() {
        let d = dispatcher();
        let mut events = d.subscribe();
        let err = d
            .notify(None, NotificationDraft::system("hello?"))
            .unwrap_err();
        assert!(matches!(err, BooklaneError::NoUser));
        assert!(events.try_recv().is_err());
        assert_eq!(d.badge(), BadgeState::Hidden);
    }

    #[test]
    fn toggle_and_outside_click() {
        let d = dispatcher();
        assert!(d.toggle_dropdown(&alice()).unwrap());
        assert!(d.is_dropdown_open());
        assert!(!d.toggle_dropdown(&alice()).unwrap());
        assert!(!d.is_dropdown_open());

        d.open_dropdown(&alice()).unwrap();
        assert!(d.click_outside());
        assert!(!d.click_outside());
    }

    #[test]
    fn system_without_link_just_closes() {
        let d = dispatcher();
        let n = d
            .notify(Some(&alice()), NotificationDraft::system("maintenance"))
            .unwrap();
        d.open_dropdown(&alice()).unwrap();
        assert_eq!(d.activate(&alice(), &n.id).unwrap(), Activation::Closed);
        assert!(!d.is_dropdown_open());
        assert_eq!(d.badge(), BadgeState::Hidden);
    }

    #[test]
    fn activation_falls_back_to_kind_destination() {
        let d = dispatcher();
        let n = d
            .notify(Some(&alice()), NotificationDraft::review_received("Bob", 5))
            .unwrap();
        let mut events = d.subscribe();
        assert_eq!(
            d.activate(&alice(), &n.id).unwrap(),
            Activation::Navigate("/profile#reviews".into())
        );
        let mut saw_navigate = false;
        while let Ok(event) = events.try_recv() {
            if event == SurfaceEvent::Navigate("/profile#reviews".into()) {
                saw_navigate = true;
            }
        }
        assert!(saw_navigate);
    }

    #[test]
    fn activating_unknown_notification_is_not_found() {
        let d = dispatcher();
        let err = d
            .activate(&alice(), &NotificationId::from("ghost"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn badge_event_only_on_change() {
        let d = dispatcher();
        let mut events = d.subscribe();
        d.refresh_badge(&alice()).unwrap();
        assert!(events.try_recv().is_err(), "hidden -> hidden emits nothing");

        d.notify(Some(&alice()), NotificationDraft::system("one")).unwrap();
        let badges: Vec<_> = std::iter::from_fn(|| events.try_recv().ok())
            .filter_map(|e| match e {
                SurfaceEvent::BadgeChanged(b) => Some(b),
                _ => None,
            })
            .collect();
        assert_eq!(badges, vec![BadgeState::new(1, 9)]);
    }
}
