// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user notification lists over the persistent store.
//!
//! Each user's list lives under its own key, newest first. Every method
//! reads the latest snapshot before acting, and mutators write back only
//! when something changed.

use std::sync::Arc;

use booklane_core::{
    BooklaneError, Clock, KeyValueStore, Notification, NotificationDraft, NotificationId, UserId,
};
use booklane_storage::keys::notifications_key;
use booklane_storage::{load_json, save_json};
use tracing::{debug, info};

#[derive(Clone)]
pub struct NotificationRepository {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl NotificationRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    fn load(&self, user: &UserId) -> Result<Vec<Notification>, BooklaneError> {
        load_json(self.store.as_ref(), &notifications_key(user))
    }

    fn save(&self, user: &UserId, list: &[Notification]) -> Result<(), BooklaneError> {
        save_json(self.store.as_ref(), &notifications_key(user), list)
    }

    /// Create a notification at the head of `user`'s list.
    ///
    /// Anonymous sessions get nothing: with no user this fails with
    /// [`BooklaneError::NoUser`] and nothing is queued.
    pub fn add(
        &self,
        user: Option<&UserId>,
        draft: NotificationDraft,
    ) -> Result<Notification, BooklaneError> {
        let user = user.ok_or(BooklaneError::NoUser)?;

        let notification = Notification {
            id: NotificationId(uuid::Uuid::new_v4().to_string()),
            kind: draft.kind,
            message: draft.message,
            created_at: self.clock.now(),
            read: false,
            seen: false,
            link: draft.link,
            payload: draft.payload,
        };

        let mut list = self.load(user)?;
        list.insert(0, notification.clone());
        self.save(user, &list)?;

        info!(
            user = %user,
            notification_id = %notification.id,
            kind = %notification.kind,
            "notification added"
        );
        Ok(notification)
    }

    pub fn get(&self, user: &UserId, id: &NotificationId) -> Result<Notification, BooklaneError> {
        self.load(user)?
            .into_iter()
            .find(|n| &n.id == id)
            .ok_or_else(|| BooklaneError::not_found("notification", id.as_str()))
    }

    /// Mark one notification read. Returns `false` when it already was.
    pub fn mark_read(&self, user: &UserId, id: &NotificationId) -> Result<bool, BooklaneError> {
        let mut list = self.load(user)?;
        let notification = list
            .iter_mut()
            .find(|n| &n.id == id)
            .ok_or_else(|| BooklaneError::not_found("notification", id.as_str()))?;

        if notification.read {
            debug!(notification_id = %id, "already read");
            return Ok(false);
        }
        notification.read = true;
        self.save(user, &list)?;
        Ok(true)
    }

    /// Mark every notification read. Returns how many flipped.
    pub fn mark_all_read(&self, user: &UserId) -> Result<usize, BooklaneError> {
        self.flip_all(user, |n| &mut n.read)
    }

    /// Mark every notification seen, leaving `read` untouched.
    pub fn mark_all_seen(&self, user: &UserId) -> Result<usize, BooklaneError> {
        self.flip_all(user, |n| &mut n.seen)
    }

    fn flip_all(
        &self,
        user: &UserId,
        flag: impl Fn(&mut Notification) -> &mut bool,
    ) -> Result<usize, BooklaneError> {
        let mut list = self.load(user)?;
        let mut flipped = 0;
        for notification in list.iter_mut() {
            let slot = flag(notification);
            if !*slot {
                *slot = true;
                flipped += 1;
            }
        }
        if flipped > 0 {
            self.save(user, &list)?;
        }
        Ok(flipped)
    }

    pub fn unread_count(&self, user: &UserId) -> Result<usize, BooklaneError> {
        Ok(self.load(user)?.iter().filter(|n| !n.read).count())
    }

    /// The whole list, newest first.
    pub fn list_for_user(&self, user: &UserId) -> Result<Vec<Notification>, BooklaneError> {
        self.load(user)
    }

    /// The first `n` in stored (newest-first) order.
    pub fn recent_for_user(
        &self,
        user: &UserId,
        n: usize,
    ) -> Result<Vec<Notification>, BooklaneError> {
        let mut list = self.load(user)?;
        list.truncate(n);
        Ok(list)
    }

    /// Notifications matching `predicate`, in stored order.
    ///
    /// Pass `|n| filter.matches(n)` for the all / unread / by-kind views.
    pub fn filtered_for_user(
        &self,
        user: &UserId,
        predicate: impl Fn(&Notification) -> bool,
    ) -> Result<Vec<Notification>, BooklaneError> {
        Ok(self
            .load(user)?
            .into_iter()
            .filter(|n| predicate(n))
            .collect())
    }
}
