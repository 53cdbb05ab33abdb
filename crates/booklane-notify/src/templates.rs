// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sample content for simulated notifications.

use booklane_core::{ItemRef, NotificationDraft, NotificationKind};
use rand::Rng;
use rand::seq::SliceRandom;

pub const BOOK_TITLES: &[&str] = &[
    "Dune",
    "Emma",
    "The Left Hand of Darkness",
    "Middlemarch",
    "Beloved",
    "The Name of the Rose",
    "A Wizard of Earthsea",
    "Things Fall Apart",
];

pub const MEMBER_NAMES: &[&str] = &["Priya", "Tomás", "Mei", "Jonah", "Amara", "Lukas"];

const SYSTEM_MESSAGES: &[&str] = &[
    "Scheduled maintenance tonight from 02:00 to 03:00",
    "Your listing photos are now shown in higher resolution",
    "New: save searches and get alerted when a match is listed",
];

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, options: &[&'a str]) -> &'a str {
    options.choose(rng).copied().unwrap_or_default()
}

fn random_item<R: Rng + ?Sized>(rng: &mut R) -> ItemRef {
    let index = rng.gen_range(0..BOOK_TITLES.len());
    ItemRef::new(format!("book-{}", 100 + index), BOOK_TITLES[index])
}

/// A notification of a uniformly random kind.
pub fn random_draft<R: Rng + ?Sized>(rng: &mut R) -> NotificationDraft {
    let kind = NotificationKind::ALL
        .choose(rng)
        .copied()
        .unwrap_or(NotificationKind::System);
    draft_for(kind, rng)
}

/// A templated notification of `kind`, with a kind-appropriate payload.
pub fn draft_for<R: Rng + ?Sized>(kind: NotificationKind, rng: &mut R) -> NotificationDraft {
    let member = pick(rng, MEMBER_NAMES);
    match kind {
        NotificationKind::NewListing => NotificationDraft::new_listing(&random_item(rng), member),
        NotificationKind::Transaction => NotificationDraft::item_sold(&random_item(rng), member),
        NotificationKind::Review => {
            NotificationDraft::review_received(member, rng.gen_range(3..=5))
        }
        NotificationKind::Message => {
            let item = random_item(rng);
            NotificationDraft::new(
                NotificationKind::Message,
                format!("{member} asked about \"{}\"", item.title),
            )
            .with_payload(serde_json::json!({
                "book_id": item.id,
                "sender": member,
            }))
        }
        NotificationKind::System => NotificationDraft::system(pick(rng, SYSTEM_MESSAGES)),
    }
}
