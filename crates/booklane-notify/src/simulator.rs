// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Simulated event source: a local stand-in for server push.
//!
//! While running, a fixed-period timer ticks. Each tick, if someone is
//! logged in, a coin flip decides whether to synthesize one notification
//! and feed it through the dispatcher. Logging out makes ticks inert;
//! [`SimulatedEventSource::stop`] cancels the timer outright.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use booklane_config::SimulatorConfig;
use booklane_core::{
    Adapter, AdapterType, BooklaneError, EventSource, Notification, SessionProvider,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::runtime::Handle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::dispatcher::NotificationDispatcher;
use crate::templates;

struct Inner {
    dispatcher: NotificationDispatcher,
    session: Arc<dyn SessionProvider>,
    config: SimulatorConfig,
    rng: Mutex<StdRng>,
    running: Mutex<Option<CancellationToken>>,
}

impl Inner {
    fn running(&self) -> MutexGuard<'_, Option<CancellationToken>> {
        self.running.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn tick(&self) -> Result<Option<Notification>, BooklaneError> {
        let Some(user) = self.session.current_user() else {
            debug!("simulator tick without user");
            return Ok(None);
        };

        let draft = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            if !rng.gen_bool(probability(self.config.probability)) {
                return Ok(None);
            }
            templates::random_draft(&mut *rng)
        };
        self.dispatcher.notify(Some(&user.id), draft).map(Some)
    }
}

/// `gen_bool` panics outside [0, 1]; config validation should prevent that.
fn probability(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

#[derive(Clone)]
pub struct SimulatedEventSource {
    inner: Arc<Inner>,
}

impl SimulatedEventSource {
    pub fn new(
        dispatcher: NotificationDispatcher,
        session: Arc<dyn SessionProvider>,
        config: SimulatorConfig,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            inner: Arc::new(Inner {
                dispatcher,
                session,
                config,
                rng: Mutex::new(rng),
                running: Mutex::new(None),
            }),
        }
    }

    /// Run one tick now. Returns the notification produced, if any.
    pub fn tick(&self) -> Result<Option<Notification>, BooklaneError> {
        self.inner.tick()
    }
}

impl Adapter for SimulatedEventSource {
    fn name(&self) -> &str {
        "simulator"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::EventSource
    }
}

impl EventSource for SimulatedEventSource {
    fn start(&self) -> Result<(), BooklaneError> {
        let runtime = Handle::try_current()
            .map_err(|e| BooklaneError::Internal(format!("simulator needs a tokio runtime: {e}")))?;

        let mut running = self.inner.running();
        if running.is_some() {
            debug!("simulator already running");
            return Ok(());
        }
        let cancel = CancellationToken::new();
        *running = Some(cancel.clone());
        drop(running);

        let inner = Arc::clone(&self.inner);
        let period = inner.config.interval();
        runtime.spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticks.tick() => {
                        if cancel.is_cancelled() {
                            break;
                        }
                        if let Err(e) = inner.tick() {
                            warn!(error = %e, "simulated notification failed");
                        }
                    }
                    _ = cancel.cancelled() => break,
                }
            }
            debug!("simulator loop exited");
        });

        info!(
            period_secs = period.as_secs(),
            probability = self.inner.config.probability,
            "simulator started"
        );
        Ok(())
    }

    fn stop(&self) {
        if let Some(cancel) = self.inner.running().take() {
            cancel.cancel();
            info!("simulator stopped");
        }
    }

    fn is_running(&self) -> bool {
        self.inner.running().is_some()
    }
}
