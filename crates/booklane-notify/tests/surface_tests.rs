// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Timer-driven surface behaviour, run on tokio's paused clock.

use std::sync::Arc;
use std::time::Duration;

use booklane_config::{NotificationConfig, SimulatorConfig};
use booklane_core::{
    Clock, EventSource, NotificationDraft, NotificationId, NotificationKind, UserId,
};
use booklane_notify::{
    BadgeState, NotificationDispatcher, NotificationRepository, SimulatedEventSource,
    SurfaceEvent, ToastPhase,
};
use booklane_storage::MemoryStore;
use booklane_test_utils::fixtures::alice;
use booklane_test_utils::{ManualClock, MockSession};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{advance, sleep};

fn dispatcher() -> NotificationDispatcher {
    let clock: Arc<dyn Clock> = Arc::new(ManualClock::fixed());
    let repo = NotificationRepository::new(Arc::new(MemoryStore::new()), clock.clone());
    NotificationDispatcher::new(repo, clock, &NotificationConfig::default())
}

fn drain(events: &mut UnboundedReceiver<SurfaceEvent>) -> Vec<SurfaceEvent> {
    std::iter::from_fn(|| events.try_recv().ok()).collect()
}

fn removals(events: &[SurfaceEvent], id: &NotificationId) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, SurfaceEvent::ToastRemoved(removed) if removed == id))
        .count()
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[tokio::test(start_paused = true)]
async fn toast_walks_every_phase_on_timeout() {
    let d = dispatcher();
    let mut events = d.subscribe();
    let user = alice().id;

    let n = d.notify(Some(&user), NotificationDraft::system("hello")).unwrap();
    assert_eq!(d.toast_phase(&n.id), Some(ToastPhase::Entering));

    sleep(ms(25)).await;
    assert_eq!(d.toast_phase(&n.id), Some(ToastPhase::Visible));

    sleep(ms(4_980)).await; // t = 5005
    assert_eq!(d.toast_phase(&n.id), Some(ToastPhase::Leaving));

    sleep(ms(400)).await;
    assert_eq!(d.toast_phase(&n.id), None);
    assert!(d.active_toasts().is_empty());

    let seen = drain(&mut events);
    let phases: Vec<&str> = seen
        .iter()
        .filter_map(|e| match e {
            SurfaceEvent::ToastEntered(_) => Some("entered"),
            SurfaceEvent::ToastVisible(_) => Some("visible"),
            SurfaceEvent::ToastLeaving(_) => Some("leaving"),
            SurfaceEvent::ToastRemoved(_) => Some("removed"),
            _ => None,
        })
        .collect();
    assert_eq!(phases, vec!["entered", "visible", "leaving", "removed"]);
}

#[tokio::test(start_paused = true)]
async fn timeout_counts_from_creation_not_first_poll() {
    let d = dispatcher();
    let n = d
        .notify(Some(&alice().id), NotificationDraft::system("late start"))
        .unwrap();

    // The clock moves before the toast task has had a chance to run.
    advance(ms(3_000)).await;
    sleep(ms(2_100)).await; // t = 5100
    assert_eq!(d.toast_phase(&n.id), Some(ToastPhase::Leaving));

    sleep(ms(400)).await;
    assert_eq!(d.toast_phase(&n.id), None);
}

#[tokio::test(start_paused = true)]
async fn slow_subscriber_receives_every_event() {
    let d = dispatcher();
    let mut events = d.subscribe();
    let user = alice().id;

    let ids: Vec<NotificationId> = (0..100)
        .map(|i| {
            d.notify(Some(&user), NotificationDraft::system(format!("n{i}")))
                .unwrap()
                .id
        })
        .collect();

    let entered: Vec<NotificationId> = drain(&mut events)
        .into_iter()
        .filter_map(|e| match e {
            SurfaceEvent::ToastEntered(view) => Some(view.id),
            _ => None,
        })
        .collect();
    assert_eq!(entered, ids);

    sleep(ms(6_000)).await;
    let seen = drain(&mut events);
    for id in &ids {
        assert_eq!(removals(&seen, id), 1);
    }
}

#[tokio::test(start_paused = true)]
async fn dismiss_before_timeout_removes_exactly_once() {
    let d = dispatcher();
    let mut events = d.subscribe();
    let n = d
        .notify(Some(&alice().id), NotificationDraft::system("close me"))
        .unwrap();

    sleep(ms(1_000)).await;
    assert!(d.dismiss_toast(&n.id));
    assert!(!d.dismiss_toast(&n.id), "second dismiss is a no-op");

    sleep(ms(10)).await;
    assert_eq!(d.toast_phase(&n.id), Some(ToastPhase::Leaving));
    assert!(!d.dismiss_toast(&n.id));

    // Well past both the exit delay and the original timeout.
    sleep(ms(10_000)).await;
    assert_eq!(removals(&drain(&mut events), &n.id), 1);
    assert!(!d.dismiss_toast(&n.id));
}

#[tokio::test(start_paused = true)]
async fn dismiss_at_the_timeout_instant_still_removes_once() {
    let d = dispatcher();
    let mut events = d.subscribe();
    let n = d
        .notify(Some(&alice().id), NotificationDraft::system("race"))
        .unwrap();

    sleep(ms(5_000)).await;
    d.dismiss_toast(&n.id);
    sleep(ms(1_000)).await;

    assert_eq!(removals(&drain(&mut events), &n.id), 1);
}

#[tokio::test(start_paused = true)]
async fn dismiss_while_entering_skips_visible() {
    let d = dispatcher();
    let mut events = d.subscribe();
    let n = d
        .notify(Some(&alice().id), NotificationDraft::system("quick"))
        .unwrap();
    assert!(d.dismiss_toast(&n.id));

    sleep(ms(1_000)).await;
    let seen = drain(&mut events);
    assert!(!seen.iter().any(|e| matches!(e, SurfaceEvent::ToastVisible(_))));
    assert_eq!(removals(&seen, &n.id), 1);
}

#[tokio::test(start_paused = true)]
async fn rapid_adds_are_distinct() {
    let d = dispatcher();
    let user = alice().id;
    let first = d
        .notify(Some(&user), NotificationDraft::new(NotificationKind::Message, "one"))
        .unwrap();
    let second = d
        .notify(Some(&user), NotificationDraft::new(NotificationKind::Message, "two"))
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(d.repository().unread_count(&user).unwrap(), 2);
    assert_eq!(d.badge(), BadgeState::new(2, 9));
    assert_eq!(d.active_toasts(), vec![first.id, second.id]);
}

#[tokio::test(start_paused = true)]
async fn opening_dropdown_marks_seen_not_read() {
    let d = dispatcher();
    let user = alice().id;
    let mut ids = Vec::new();
    for i in 0..5 {
        ids.push(
            d.notify(Some(&user), NotificationDraft::system(format!("n{i}")))
                .unwrap()
                .id,
        );
    }
    d.repository().mark_read(&user, &ids[0]).unwrap();
    d.repository().mark_read(&user, &ids[1]).unwrap();
    d.refresh_badge(&user).unwrap();

    let items = d.open_dropdown(&user).unwrap();
    assert_eq!(items.len(), 5);

    let stored = d.repository().list_for_user(&user).unwrap();
    assert!(stored.iter().all(|n| n.seen));
    assert_eq!(d.repository().unread_count(&user).unwrap(), 3);
    assert_eq!(d.badge().label(), Some("3"));
}

#[tokio::test(start_paused = true)]
async fn open_dropdown_rerenders_on_new_notification() {
    let d = dispatcher();
    let user = alice().id;
    d.notify(Some(&user), NotificationDraft::system("old")).unwrap();
    d.open_dropdown(&user).unwrap();
    let mut events = d.subscribe();

    let fresh = d.notify(Some(&user), NotificationDraft::system("fresh")).unwrap();
    let updated = drain(&mut events)
        .into_iter()
        .find_map(|e| match e {
            SurfaceEvent::DropdownUpdated(items) => Some(items),
            _ => None,
        })
        .expect("open dropdown is re-rendered");
    assert_eq!(updated[0].id, fresh.id);
    assert!(!updated[0].seen, "arrived after opening");
}

#[tokio::test(start_paused = true)]
async fn dropdown_renders_at_most_limit() {
    let d = dispatcher();
    let user = alice().id;
    for i in 0..8 {
        d.notify(Some(&user), NotificationDraft::system(format!("n{i}")))
            .unwrap();
    }
    let items = d.open_dropdown(&user).unwrap();
    let messages: Vec<_> = items.iter().map(|v| v.message.as_str()).collect();
    assert_eq!(messages, vec!["n7", "n6", "n5", "n4", "n3"]);
}

#[tokio::test(start_paused = true)]
async fn badge_caps_label() {
    let d = dispatcher();
    let user = alice().id;
    for i in 0..12 {
        d.notify(Some(&user), NotificationDraft::system(format!("n{i}")))
            .unwrap();
    }
    assert_eq!(d.badge().label(), Some("9+"));
    d.mark_all_read(&user).unwrap();
    assert_eq!(d.badge(), BadgeState::Hidden);
}

fn simulator(
    d: &NotificationDispatcher,
    session: Arc<MockSession>,
) -> SimulatedEventSource {
    let config = SimulatorConfig {
        interval_secs: 30,
        probability: 1.0,
        seed: Some(11),
        ..SimulatorConfig::default()
    };
    SimulatedEventSource::new(d.clone(), session, config)
}

#[tokio::test(start_paused = true)]
async fn simulator_ticks_on_period() {
    let d = dispatcher();
    let session = Arc::new(MockSession::logged_in(alice()));
    let sim = simulator(&d, session);
    let user: UserId = alice().id;

    sim.start().unwrap();
    sim.start().unwrap();
    assert!(sim.is_running());

    sleep(Duration::from_secs(29)).await;
    assert_eq!(d.repository().unread_count(&user).unwrap(), 0);
    sleep(Duration::from_secs(2)).await;
    assert_eq!(d.repository().unread_count(&user).unwrap(), 1);
    sleep(Duration::from_secs(30)).await;
    assert_eq!(d.repository().unread_count(&user).unwrap(), 2);

    sim.stop();
    sim.stop();
    assert!(!sim.is_running());
}

#[tokio::test(start_paused = true)]
async fn tick_after_logout_is_a_no_op() {
    let d = dispatcher();
    let session = Arc::new(MockSession::logged_in(alice()));
    let sim = simulator(&d, session.clone());
    let user = alice().id;

    sim.start().unwrap();
    sleep(Duration::from_secs(10)).await;
    session.logout();
    d.clear_session();

    // The tick scheduled before logout fires into an anonymous session.
    sleep(Duration::from_secs(120)).await;
    assert!(sim.is_running());
    assert_eq!(d.repository().list_for_user(&user).unwrap().len(), 0);
    sim.stop();
}

#[tokio::test(start_paused = true)]
async fn stopped_simulator_stays_quiet() {
    let d = dispatcher();
    let session = Arc::new(MockSession::logged_in(alice()));
    let sim = simulator(&d, session);
    let user = alice().id;

    sim.start().unwrap();
    sleep(Duration::from_secs(31)).await;
    sim.stop();
    sleep(Duration::from_secs(300)).await;
    assert_eq!(d.repository().list_for_user(&user).unwrap().len(), 1);

    // Restarting resumes production.
    sim.start().unwrap();
    sleep(Duration::from_secs(31)).await;
    assert_eq!(d.repository().list_for_user(&user).unwrap().len(), 2);
    sim.stop();
}
