// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Render-ready notification rows for the dropdown and toasts.

use booklane_core::{Notification, NotificationId, NotificationKind};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationView {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub icon: &'static str,
    pub label: &'static str,
    pub message: String,
    pub age: String,
    pub read: bool,
    pub seen: bool,
    pub destination: Option<String>,
}

impl NotificationView {
    pub fn new(notification: &Notification, now: DateTime<Utc>) -> Self {
        Self {
            id: notification.id.clone(),
            kind: notification.kind,
            icon: notification.kind.icon(),
            label: notification.kind.label(),
            message: notification.message.clone(),
            age: relative_age(notification.created_at, now),
            read: notification.read,
            seen: notification.seen,
            destination: notification.destination(),
        }
    }
}

/// "just now", "5m ago", "3h ago", "2d ago". Future timestamps read as "just now".
pub fn relative_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(created_at);
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if elapsed.num_hours() < 24 {
        format!("{}h ago", elapsed.num_hours())
    } else {
        format!("{}d ago", elapsed.num_days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booklane_core::NotificationDraft;
    use chrono::Duration;

    #[test]
    fn ages_bucket_by_unit() {
        let now = Utc::now();
        let cases = [
            (Duration::seconds(-5), "just now"),
            (Duration::seconds(59), "just now"),
            (Duration::minutes(5), "5m ago"),
            (Duration::minutes(59), "59m ago"),
            (Duration::hours(3), "3h ago"),
            (Duration::hours(47), "1d ago"),
            (Duration::days(2), "2d ago"),
        ];
        for (ago, expected) in cases {
            assert_eq!(relative_age(now - ago, now), expected, "{ago:?}");
        }
    }

    #[test]
    fn view_carries_kind_table() {
        let draft = NotificationDraft::review_received("Bob", 4);
        let n = Notification {
            id: NotificationId::from("n1"),
            kind: draft.kind,
            message: draft.message,
            created_at: Utc::now(),
            read: false,
            seen: true,
            link: None,
            payload: draft.payload,
        };
        let view = NotificationView::new(&n, n.created_at);
        assert_eq!(view.icon, "star");
        assert_eq!(view.destination.as_deref(), Some("/profile#reviews"));
        assert_eq!(view.age, "just now");
        assert!(view.seen && !view.read);
    }
}
