// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `notify`, `notifications` and `read` commands.

use booklane_core::{
    BooklaneError, NotificationDraft, NotificationFilter, NotificationId, NotificationKind, UserId,
};
use booklane_notify::{Activation, BadgeState, NotificationView};
use serde::Serialize;

use crate::engine::Engine;
use crate::output::Output;

/// Record a notification for `user` as an external producer would.
pub fn run_notify(
    engine: &Engine,
    out: &Output,
    user: &UserId,
    kind: NotificationKind,
    message: &str,
    link: Option<&str>,
) -> Result<(), BooklaneError> {
    let mut draft = NotificationDraft::new(kind, message);
    if let Some(link) = link {
        draft = draft.with_link(link);
    }
    let notification = engine.notifications.add(Some(user), draft)?;
    let view = NotificationView::new(&notification, engine.clock.now());
    if out.json {
        out.print_json(&view);
    } else {
        out.notification(&view);
    }
    Ok(())
}

#[derive(Serialize)]
struct Listing {
    badge: BadgeState,
    notifications: Vec<NotificationView>,
}

/// List notifications. `open` behaves like opening the bell dropdown:
/// only the most recent entries, all of which become seen.
pub fn run_list(
    engine: &Engine,
    out: &Output,
    user: &UserId,
    filter: &NotificationFilter,
    open: bool,
) -> Result<(), BooklaneError> {
    let now = engine.clock.now();
    let notifications = if open {
        engine.dispatcher.open_dropdown(user)?
    } else {
        engine
            .notifications
            .filtered_for_user(user, |n| filter.matches(n))?
            .iter()
            .map(|n| NotificationView::new(n, now))
            .collect()
    };
    let badge = engine.dispatcher.refresh_badge(user)?;

    if out.json {
        out.print_json(&Listing {
            badge,
            notifications,
        });
    } else {
        out.badge(&badge);
        out.notifications(&notifications);
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum ReadOutcome {
    Navigate { destination: String },
    Closed,
    AllRead { marked: usize },
}

/// Activate one notification, or mark everything read with `all`.
pub fn run_read(
    engine: &Engine,
    out: &Output,
    user: &UserId,
    id: Option<&NotificationId>,
    all: bool,
) -> Result<(), BooklaneError> {
    let outcome = match (id, all) {
        (_, true) => ReadOutcome::AllRead {
            marked: engine.dispatcher.mark_all_read(user)?,
        },
        (Some(id), false) => match engine.dispatcher.activate(user, id)? {
            Activation::Navigate(destination) => ReadOutcome::Navigate { destination },
            Activation::Closed => ReadOutcome::Closed,
        },
        (None, false) => {
            return Err(BooklaneError::InvalidInput(
                "give a notification id or --all".to_string(),
            ));
        }
    };

    if out.json {
        out.print_json(&outcome);
        return Ok(());
    }
    match outcome {
        ReadOutcome::Navigate { destination } => out.ok(&format!("read, open {destination}")),
        ReadOutcome::Closed => out.ok("read"),
        ReadOutcome::AllRead { marked } => out.ok(&format!("marked {marked} read")),
    }
    Ok(())
}
