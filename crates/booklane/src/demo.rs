// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `demo`: run the live surfaces with the simulated event source and print
//! every surface transition until the time is up or ctrl-c.

use std::sync::Arc;
use std::time::Duration;

use booklane_config::SimulatorConfig;
use booklane_core::{BooklaneError, EventSource, User};
use booklane_notify::{SimulatedEventSource, SurfaceEvent};
use tracing::{info, warn};

use crate::engine::Engine;
use crate::output::Output;
use crate::session::LocalSession;

pub async fn run_demo(
    engine: &Engine,
    out: &Output,
    user: User,
    seconds: u64,
    interval_secs: Option<u64>,
) -> Result<(), BooklaneError> {
    let mut config: SimulatorConfig = engine.config.simulator.clone();
    if let Some(secs) = interval_secs {
        config.interval_secs = secs.max(1);
    }

    let session = Arc::new(LocalSession::new(user.clone()));
    let simulator = SimulatedEventSource::new(engine.dispatcher.clone(), session.clone(), config);

    let badge = engine.dispatcher.refresh_badge(&user.id)?;
    print_event(out, &SurfaceEvent::BadgeChanged(badge));
    let mut events = engine.dispatcher.subscribe();

    if engine.config.simulator.enabled {
        simulator.start()?;
    } else {
        warn!("simulator disabled in config, only existing state is shown");
    }

    let deadline = tokio::time::sleep(Duration::from_secs(seconds));
    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(deadline, interrupt);
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => print_event(out, &event),
                None => break,
            },
            _ = &mut deadline => break,
            _ = &mut interrupt => {
                info!("interrupted");
                break;
            }
        }
    }

    simulator.stop();
    session.logout();
    engine.dispatcher.clear_session();
    while let Ok(event) = events.try_recv() {
        print_event(out, &event);
    }
    Ok(())
}

fn print_event(out: &Output, event: &SurfaceEvent) {
    if out.json {
        // One object per line so the stream can be piped.
        println!(
            "{}",
            serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string())
        );
        return;
    }
    match event {
        SurfaceEvent::BadgeChanged(badge) => out.badge(badge),
        SurfaceEvent::ToastEntered(view) => {
            print!("  toast ▸ ");
            out.notification(view);
        }
        SurfaceEvent::ToastVisible(_) => {}
        SurfaceEvent::ToastLeaving(id) => println!("  toast ◂ {id} leaving"),
        SurfaceEvent::ToastRemoved(id) => println!("  toast ✕ {id}"),
        SurfaceEvent::DropdownOpened(items) | SurfaceEvent::DropdownUpdated(items) => {
            out.notifications(items)
        }
        SurfaceEvent::DropdownClosed => println!("  dropdown closed"),
        SurfaceEvent::Navigate(to) => println!("  → {to}"),
    }
}
